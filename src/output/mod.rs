pub mod write;

pub use write::{flatten, write_table, OutputRow, HEADER};
