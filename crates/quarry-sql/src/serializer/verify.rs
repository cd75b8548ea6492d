use crate::stmt::{ClauseKind, Operand, Query, Statement, StatementKind};

use quarry_core::{Error, Result};

/// Rejects statements that cannot be rendered.
pub(super) fn verify(stmt: &Statement) -> Result<()> {
    match stmt {
        Statement::Query(query) => verify_query(query),
        Statement::CopyTable(copy) if copy.columns.is_empty() => Err(Error::invalid_statement(
            format!("copying `{}` into `{}` needs at least one column", copy.source, copy.target),
        )),
        Statement::CreateTable(create) if create.columns.is_empty() => Err(
            Error::invalid_statement(format!("table `{}` has no columns", create.name)),
        ),
        _ => Ok(()),
    }
}

fn verify_query(query: &Query) -> Result<()> {
    if query.table.is_none() {
        return Err(Error::invalid_statement("query has no table"));
    }

    match &query.kind {
        StatementKind::Select | StatementKind::Delete => {}
        StatementKind::Insert(rows) => {
            let Some(first) = rows.first() else {
                return Err(Error::invalid_statement("insert has no rows"));
            };

            for row in rows {
                let mismatch = row.len() != first.len()
                    || first.columns().any(|column| row.get(column).is_none());
                if mismatch {
                    return Err(Error::invalid_statement(
                        "inserted rows must all set the same columns",
                    ));
                }

                for (_, value) in row.iter() {
                    verify_operand(value)?;
                }
            }
        }
        StatementKind::Update(assignments) => {
            if assignments.is_empty() {
                return Err(Error::invalid_statement("update has no assignments"));
            }

            for (_, value) in assignments.iter() {
                verify_operand(value)?;
            }
        }
    }

    for clause in &query.clauses {
        match &clause.kind {
            ClauseKind::Basic { value, .. } => verify_operand(value)?,
            ClauseKind::SubSelect { query, .. } => verify_sub_query(query)?,
            _ => {}
        }
    }

    Ok(())
}

fn verify_operand(operand: &Operand) -> Result<()> {
    match operand {
        Operand::Query(query) => verify_sub_query(query),
        _ => Ok(()),
    }
}

fn verify_sub_query(query: &Query) -> Result<()> {
    if !query.is_select() {
        return Err(Error::invalid_statement("sub-queries must be selects"));
    }
    verify_query(query)
}
