pub mod fixtures;
pub mod table;

pub use fixtures::FixtureSet;
pub use table::RecordTable;
