pub mod prompt;
pub mod report;

pub use prompt::{InteractiveCollector, PresetCollector, Prompter};
pub use report::{Report, ReportFormat};
