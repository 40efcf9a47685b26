pub mod budget;
pub mod engine;
pub mod physiology;

pub use crate::domain::model::{
    BudgetInputs, BudgetResult, Gas, GasUsage, PhysiologyInputs, PhysiologyResult, ProgramSettings,
};
pub use crate::domain::ports::InputCollector;
pub use crate::utils::error::Result;
