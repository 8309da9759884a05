pub mod executor;
pub mod gateway;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod result_set;
pub mod stats;

pub use executor::{Statement, create_statement, run_query, run_statement, run_update};
pub use gateway::{Session, close, connect, live_sessions};
pub use result_set::{ResultSet, RowRef, SqlValue};
