pub mod config;
pub mod core;
pub mod domain;
pub mod persistence;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;
pub use core::registry::Registry;
pub use core::reports::Reports;
pub use persistence::CsvStore;
pub use ui::Console;
pub use utils::error::{Result, SigaError};
