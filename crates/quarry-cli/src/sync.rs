use crate::Config;

use anyhow::Result;
use clap::Parser;
use console::style;
use quarry::{sync::SyncReport, Db};

#[derive(Parser, Debug)]
pub struct SyncCommand {
    /// Print the planned statements without executing them
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Run table rebuilds outside of a transaction
    #[arg(long)]
    pub(crate) no_transaction: bool,
}

impl SyncCommand {
    pub(crate) async fn run(self, db: &Db, config: &Config) -> Result<()> {
        println!();
        println!("  {}", style("Sync Schema").cyan().bold().underlined());
        println!();

        let mut sync = config.sync.clone();
        sync.dry_run |= self.dry_run;
        sync.rebuild_in_transaction &= !self.no_transaction;

        let report = db.synchronizer(sync).run().await?;
        print_report(db, &report)?;

        Ok(())
    }
}

fn print_report(db: &Db, report: &SyncReport) -> Result<()> {
    if report.is_unchanged() {
        println!(
            "  {}",
            style("Schema is up to date. Nothing to do.").green().dim()
        );
        println!();
        return Ok(());
    }

    for table in &report.tables {
        if table.is_unchanged() {
            continue;
        }

        println!(
            "  {} {:?} {}",
            style("→").cyan(),
            table.action,
            style(&table.table).bold()
        );

        for statement in table.statements() {
            let compiled = db.compile(statement.clone())?;
            println!("      {}", style(compiled.sql).dim());
        }
    }

    println!();
    if report.dry_run {
        println!(
            "  {}",
            style("Dry run: no statements were executed.").magenta().dim()
        );
    } else {
        println!("  {}", style("Schema synchronized.").green().bold());
    }
    println!();

    Ok(())
}
