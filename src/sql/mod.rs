//! SQL rendering for the normalized schema
//!
//! Turns a [`Snapshot`](crate::model::Snapshot) into one list of `INSERT`
//! statements per table. Writing those lists to disk is the job of
//! [`SqlFileWriter`](crate::storage::SqlFileWriter).

mod insert;
mod table;

pub use insert::{SqlInserts, insert_statement, render_inserts};
pub use table::Table;
