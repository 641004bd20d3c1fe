//! `INSERT` statement rendering

use super::Table;
use crate::fields::{SqlValue, format_timestamp};
use crate::model::Snapshot;

/// Rendered statements, grouped per table in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlInserts {
    tables: Vec<(Table, Vec<String>)>,
}

impl SqlInserts {
    /// Statements for one table, empty if the table has no rows
    pub fn statements(&self, table: Table) -> &[String] {
        self.tables
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, statements)| statements.as_slice())
            .unwrap_or_default()
    }

    /// Iterate `(table, statements)` in load order
    pub fn iter(&self) -> impl Iterator<Item = (Table, &[String])> {
        self.tables
            .iter()
            .map(|(table, statements)| (*table, statements.as_slice()))
    }

    /// Total number of statements across all tables
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render a single `INSERT INTO <table> (<columns>) VALUES (<literals>);`
pub fn insert_statement(table: Table, values: &[SqlValue<'_>]) -> String {
    debug_assert_eq!(table.columns().len(), values.len());

    let literals = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table.name(),
        table.columns().join(", "),
        literals
    )
}

/// Render every entity of the snapshot, one table at a time
///
/// Statement order follows collection order, so ids ascend within each table.
pub fn render_inserts(snapshot: &Snapshot) -> SqlInserts {
    let cuisines = snapshot
        .cuisines
        .iter()
        .map(|(description, id)| {
            insert_statement(Table::Cuisine, &[(*id).into(), description.into()])
        })
        .collect();

    let inspection_types = snapshot
        .inspection_types
        .iter()
        .map(|(description, id)| {
            insert_statement(
                Table::InspectionType,
                &[(*id).into(), description.into(), description.into()],
            )
        })
        .collect();

    let actions = snapshot
        .actions
        .iter()
        .map(|(description, id)| insert_statement(Table::Action, &[(*id).into(), description.into()]))
        .collect();

    let addresses = snapshot
        .addresses
        .iter()
        .map(|(key, id)| {
            let line1 = key.line1();
            insert_statement(
                Table::Address,
                &[
                    (*id).into(),
                    line1.as_ref().into(),
                    key.zip_code.as_ref().into(),
                    key.borough.as_ref().into(),
                    key.city.as_ref().into(),
                    key.state.as_ref().into(),
                ],
            )
        })
        .collect();

    let restaurants = snapshot
        .restaurants
        .iter()
        .map(|(_, restaurant)| {
            insert_statement(
                Table::Restaurant,
                &[
                    restaurant.id.into(),
                    (&restaurant.external_id).into(),
                    restaurant.name.as_ref().into(),
                    restaurant.cuisine_id.into(),
                    restaurant.address_id.into(),
                ],
            )
        })
        .collect();

    let inspections = snapshot
        .inspections
        .iter()
        .map(|(_, inspection)| {
            let date = format_timestamp(&inspection.inspection_date);
            insert_statement(
                Table::Inspection,
                &[
                    inspection.id.into(),
                    inspection.restaurant_id.into(),
                    inspection.inspection_type_id.into(),
                    (&date).into(),
                    inspection.action_id.into(),
                ],
            )
        })
        .collect();

    let violations = snapshot
        .violations
        .iter()
        .map(|violation| {
            insert_statement(
                Table::Violation,
                &[
                    violation.id.into(),
                    violation.inspection_id.into(),
                    (&violation.code).into(),
                    violation.description.as_ref().into(),
                    violation.critical_flag.as_ref().into(),
                ],
            )
        })
        .collect();

    SqlInserts {
        tables: vec![
            (Table::Cuisine, cuisines),
            (Table::InspectionType, inspection_types),
            (Table::Action, actions),
            (Table::Address, addresses),
            (Table::Restaurant, restaurants),
            (Table::Inspection, inspections),
            (Table::Violation, violations),
        ],
    }
}
