pub mod app;

pub mod db;

mod name;
pub use name::{foreign_key_name, pivot_table_name};
