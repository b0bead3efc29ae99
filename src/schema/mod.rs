pub mod derive;
pub mod record;
pub mod types;

pub use derive::SchemaReport;
pub use record::EnergyRecord;
pub use types::EnergySource;
