pub mod apartments;
pub mod connection;

pub use apartments::StatusCounts;
pub use connection::{init_db, Database};
