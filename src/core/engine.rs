use crate::app::report::Report;
use crate::core::{budget, physiology};
use crate::domain::model::ProgramSettings;
use crate::domain::ports::InputCollector;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs one calculation: collect settings, estimate physiology, then the
/// budget driven by the estimated ventilation rate.
pub struct BudgetEngine<C: InputCollector> {
    collector: C,
}

impl<C: InputCollector> BudgetEngine<C> {
    pub fn new(collector: C) -> Self {
        Self { collector }
    }

    pub fn run(&mut self, defaults: &ProgramSettings) -> Result<Report> {
        tracing::info!("Collecting program inputs...");
        let settings = self.collector.collect(defaults)?;
        settings.validate()?;
        tracing::debug!("Collected settings: {:?}", settings);

        Ok(evaluate(&settings))
    }

    pub fn into_collector(self) -> C {
        self.collector
    }
}

/// The pure half of the pipeline, for callers that already hold valid settings.
pub fn evaluate(settings: &ProgramSettings) -> Report {
    tracing::info!("Estimating physiology at {:.0} ft", settings.altitude_ft);
    let physiology = physiology::estimate(&settings.physiology_inputs());

    let ventilation_rate = physiology.ventilation_rate_l_per_min;
    tracing::info!(
        "Estimating gas budget at {:.2} L/min for {} weeks",
        ventilation_rate,
        settings.weeks
    );
    let budget = budget::estimate(&settings.budget_inputs(ventilation_rate));

    tracing::info!(
        "✅ Total cost with contingency: {:.2} {}",
        budget.total_cost_with_contingency,
        settings.currency
    );

    Report::new(settings.clone(), physiology, budget)
}
