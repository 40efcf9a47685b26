use crate::domain::model::ProgramSettings;
use crate::utils::error::Result;

/// Supplies the settings a run is computed from.
///
/// Implementations receive the configured defaults and return the values to
/// use. They are responsible for rejecting invalid values; the estimators
/// downstream assume in-domain inputs.
pub trait InputCollector {
    fn collect(&mut self, defaults: &ProgramSettings) -> Result<ProgramSettings>;
}
