pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    CatalystId, CatalystRecord, ComputedCatalystEntry, Decimal, ManualOverride, PriceSettings,
};
pub use engine::{compute_all_entries, compute_entry};
pub use error::AppError;
