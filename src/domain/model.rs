use serde::{Deserialize, Serialize};

/// Altitude exposure to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysiologyInputs {
    /// Simulated altitude in feet.
    pub altitude_ft: f64,
    /// Time spent at altitude in minutes. Echoed, never transformed.
    pub duration_minutes: Option<f64>,
}

impl PhysiologyInputs {
    pub fn at_altitude(altitude_ft: f64) -> Self {
        Self {
            altitude_ft,
            duration_minutes: None,
        }
    }

    pub fn with_duration(mut self, duration_minutes: f64) -> Self {
        self.duration_minutes = Some(duration_minutes);
        self
    }
}

/// Resting-adult estimates at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysiologyResult {
    pub altitude_ft: f64,
    pub altitude_m: f64,
    #[serde(rename = "pressure_at_altitude_mmHg")]
    pub pressure_at_altitude_mmhg: f64,
    #[serde(rename = "PaO2_mmHg")]
    pub pao2_mmhg: f64,
    #[serde(rename = "SaO2_percent")]
    pub sao2_percent: f64,
    #[serde(rename = "ventilation_rate_L_per_min")]
    pub ventilation_rate_l_per_min: f64,
    pub heart_rate_bpm: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration_minutes: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    pub students_per_week: u32,
    pub weeks: u32,
    pub session_duration_minutes: f64,
    pub recovery_duration_minutes: f64,
    /// L/min, normally taken from [`PhysiologyResult::ventilation_rate_l_per_min`].
    pub ventilation_rate: f64,
    pub price_air: f64,
    pub price_nitrogen: f64,
    pub price_oxygen: f64,
    /// Fractional markup, 0.10 means +10%.
    pub contingency_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gas {
    Air,
    Nitrogen,
    Oxygen,
}

impl Gas {
    pub const ALL: [Gas; 3] = [Gas::Air, Gas::Nitrogen, Gas::Oxygen];

    pub fn label(&self) -> &'static str {
        match self {
            Gas::Air => "Compressed Air",
            Gas::Nitrogen => "Nitrogen",
            Gas::Oxygen => "Oxygen",
        }
    }
}

/// Volumes in cubic meters, costs in the configured currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GasUsage {
    pub per_session_m3: f64,
    pub weekly_m3: f64,
    pub total_m3: f64,
    pub weekly_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub air: GasUsage,
    pub nitrogen: GasUsage,
    pub oxygen: GasUsage,
    pub total_cost: f64,
    pub total_cost_with_contingency: f64,
}

impl BudgetResult {
    pub fn usage(&self, gas: Gas) -> &GasUsage {
        match gas {
            Gas::Air => &self.air,
            Gas::Nitrogen => &self.nitrogen,
            Gas::Oxygen => &self.oxygen,
        }
    }
}

/// Every recognized program option with its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSettings {
    pub students_per_week: u32,
    pub weeks: u32,
    pub session_duration_minutes: f64,
    pub recovery_duration_minutes: f64,
    pub altitude_ft: f64,
    pub exposure_duration_minutes: Option<f64>,
    pub price_air: f64,
    pub price_nitrogen: f64,
    pub price_oxygen: f64,
    pub contingency_percentage: f64,
    pub currency: String,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            students_per_week: 20,
            weeks: 26,
            session_duration_minutes: 20.0,
            recovery_duration_minutes: 5.0,
            altitude_ft: 25000.0,
            exposure_duration_minutes: None,
            price_air: 17853.0,
            price_nitrogen: 17838.0,
            price_oxygen: 19654.0,
            contingency_percentage: 0.10,
            currency: "COP".to_string(),
        }
    }
}

impl ProgramSettings {
    pub fn physiology_inputs(&self) -> PhysiologyInputs {
        PhysiologyInputs {
            altitude_ft: self.altitude_ft,
            duration_minutes: self.exposure_duration_minutes,
        }
    }

    pub fn budget_inputs(&self, ventilation_rate: f64) -> BudgetInputs {
        BudgetInputs {
            students_per_week: self.students_per_week,
            weeks: self.weeks,
            session_duration_minutes: self.session_duration_minutes,
            recovery_duration_minutes: self.recovery_duration_minutes,
            ventilation_rate,
            price_air: self.price_air,
            price_nitrogen: self.price_nitrogen,
            price_oxygen: self.price_oxygen,
            contingency_percentage: self.contingency_percentage,
        }
    }
}
