pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{InteractiveCollector, PresetCollector, Report, ReportFormat};
pub use config::TomlConfig;
pub use crate::core::{budget, engine::BudgetEngine, physiology};
pub use domain::model::{
    BudgetInputs, BudgetResult, Gas, GasUsage, PhysiologyInputs, PhysiologyResult, ProgramSettings,
};
pub use utils::error::{BudgetError, Result};
