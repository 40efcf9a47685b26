//! Resting-adult physiology at simulated altitude.
//!
//! Barometric pressure follows the standard-atmosphere barometric formula.
//! Ventilation and heart rate use simple threshold models: they stay at
//! sea-level values up to a threshold altitude and then rise linearly.
//! These are approximations for budgeting, not clinical models.

use crate::domain::model::{PhysiologyInputs, PhysiologyResult};

pub const FEET_TO_METERS: f64 = 0.3048;

/// mmHg
pub const SEA_LEVEL_PRESSURE: f64 = 760.0;
/// L/min at rest
pub const SEA_LEVEL_VENTILATION: f64 = 6.0;
/// bpm at rest
pub const SEA_LEVEL_HEART_RATE: f64 = 70.0;

/// Fraction of inspired oxygen in dry air.
pub const INSPIRED_O2_FRACTION: f64 = 0.2095;
/// mmHg at body temperature
pub const WATER_VAPOR_PRESSURE: f64 = 47.0;
/// Alveolar-arterial gradient, mmHg.
pub const AA_GRADIENT: f64 = 5.0;

const LAPSE_COEFFICIENT: f64 = 2.25577e-5;
const BAROMETRIC_EXPONENT: f64 = 5.25588;

/// PaO2 giving 50% on the cubic dissociation curve.
const DISSOCIATION_HALF_POINT: f64 = 150.0;

const VENTILATION_THRESHOLD_M: f64 = 1500.0;
/// Ventilation rises by 100% of baseline per this many meters above threshold.
const VENTILATION_STEP_M: f64 = 1000.0;
pub const MAX_VENTILATION: f64 = 60.0;

const HEART_RATE_THRESHOLD_M: f64 = 1000.0;
/// +1 bpm per this many meters above threshold.
const HEART_RATE_STEP_M: f64 = 100.0;

/// Altitude where the barometric base `1 - k*h` reaches zero.
pub const BAROMETRIC_CEILING_M: f64 = 1.0 / LAPSE_COEFFICIENT;
pub const BAROMETRIC_CEILING_FT: f64 = BAROMETRIC_CEILING_M / FEET_TO_METERS;

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

/// Barometric pressure in mmHg at `altitude_m`.
pub fn pressure_at(altitude_m: f64) -> f64 {
    SEA_LEVEL_PRESSURE * (1.0 - LAPSE_COEFFICIENT * altitude_m).powf(BAROMETRIC_EXPONENT)
}

/// Arterial saturation (%) from PaO2 via a cubic sigmoid.
pub fn saturation_from_pao2(pao2: f64) -> f64 {
    let cubed = pao2.powi(3);
    100.0 * cubed / (cubed + DISSOCIATION_HALF_POINT.powi(3))
}

pub fn ventilation_at(altitude_m: f64) -> f64 {
    let factor = (altitude_m - VENTILATION_THRESHOLD_M).max(0.0) / VENTILATION_STEP_M;
    (SEA_LEVEL_VENTILATION * (1.0 + factor)).min(MAX_VENTILATION)
}

pub fn heart_rate_at(altitude_m: f64) -> f64 {
    SEA_LEVEL_HEART_RATE + (altitude_m - HEART_RATE_THRESHOLD_M).max(0.0) / HEART_RATE_STEP_M
}

/// Estimates resting physiology at the requested altitude.
///
/// Pure and infallible. The caller keeps `altitude_ft` positive and below
/// [`BAROMETRIC_CEILING_FT`]; above that the pressure is NaN.
pub fn estimate(inputs: &PhysiologyInputs) -> PhysiologyResult {
    let altitude_m = feet_to_meters(inputs.altitude_ft);
    let pressure = pressure_at(altitude_m);

    let pio2 = (pressure - WATER_VAPOR_PRESSURE) * INSPIRED_O2_FRACTION;
    let pao2 = pio2 - AA_GRADIENT;
    let sao2 = saturation_from_pao2(pao2);

    if pao2 <= 0.0 {
        tracing::warn!(
            "⚠️ PaO2 is {:.2} mmHg at {:.0} ft; saturation estimate is not meaningful",
            pao2,
            inputs.altitude_ft
        );
    }

    let ventilation = ventilation_at(altitude_m);
    let heart_rate = heart_rate_at(altitude_m);

    tracing::debug!(
        "Physiology at {:.0} m: P={:.2} mmHg, PiO2={:.2}, PaO2={:.2}, SaO2={:.2}%, VE={:.2} L/min, HR={:.2} bpm",
        altitude_m,
        pressure,
        pio2,
        pao2,
        sao2,
        ventilation,
        heart_rate
    );

    PhysiologyResult {
        altitude_ft: inputs.altitude_ft,
        altitude_m,
        pressure_at_altitude_mmhg: pressure,
        pao2_mmhg: pao2,
        sao2_percent: sao2,
        ventilation_rate_l_per_min: ventilation,
        heart_rate_bpm: heart_rate,
        duration_minutes: inputs.duration_minutes,
    }
}
