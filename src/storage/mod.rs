pub mod db;
mod tables;

pub use db::{Database, DatabaseError, Record};
pub use tables::QueryTable;
