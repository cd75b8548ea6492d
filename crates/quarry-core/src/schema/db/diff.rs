use super::{Column, Table};

use std::collections::HashMap;

/// Differences between a live table and its declared shape.
///
/// Items come in application order: drops, adds, type changes, then key
/// promotions, which only make sense once the column shape is correct.
#[derive(Debug)]
pub struct ColumnsDiff<'a> {
    items: Vec<ColumnsDiffItem<'a>>,
}

#[derive(Debug, PartialEq)]
pub enum ColumnsDiffItem<'a> {
    /// Declared but not live
    AddColumn(&'a Column),

    /// Live but not declared
    DropColumn(&'a Column),

    /// Present in both with a different storage type
    AlterColumn { from: &'a Column, to: &'a Column },

    /// Declared primary key that the live table does not mark as one
    PromoteColumn(&'a Column),
}

impl<'a> ColumnsDiff<'a> {
    pub fn from(live: &'a Table, declared: &'a Table) -> Self {
        let mut drops = vec![];
        let mut adds = vec![];
        let mut alters = vec![];
        let mut promotions = vec![];

        let live_map = HashMap::<&str, &'a Column>::from_iter(
            live.columns.iter().map(|c| (c.name.as_str(), c)),
        );
        let declared_map = HashMap::<&str, &'a Column>::from_iter(
            declared.columns.iter().map(|c| (c.name.as_str(), c)),
        );

        for from in &live.columns {
            if !declared_map.contains_key(from.name.as_str()) {
                drops.push(ColumnsDiffItem::DropColumn(from));
            }
        }

        for to in &declared.columns {
            match live_map.get(to.name.as_str()) {
                Some(from) => {
                    if from.ty != to.ty {
                        alters.push(ColumnsDiffItem::AlterColumn { from, to });
                    }
                    if to.primary_key && !from.primary_key {
                        promotions.push(ColumnsDiffItem::PromoteColumn(to));
                    }
                }
                None => {
                    adds.push(ColumnsDiffItem::AddColumn(to));
                    if to.primary_key {
                        promotions.push(ColumnsDiffItem::PromoteColumn(to));
                    }
                }
            }
        }

        let mut items = drops;
        items.extend(adds);
        items.extend(alters);
        items.extend(promotions);

        Self { items }
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ColumnsDiffItem<'a>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnsDiffItem<'a>> {
        self.items.iter()
    }
}
