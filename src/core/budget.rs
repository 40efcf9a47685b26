//! Gas consumption and cost for a training program.
//!
//! One session per student per week. Compressed air is breathed for the
//! session, nitrogen is added at a fixed ratio of the air volume, and pure
//! oxygen is breathed during recovery. Ventilation is assumed constant
//! across both phases.

use crate::domain::model::{BudgetInputs, BudgetResult, GasUsage};

pub const DEFAULT_CONTINGENCY: f64 = 0.10;

/// Nitrogen added per unit of air to build the hypoxic mixture.
pub const NITROGEN_TO_AIR_RATIO: f64 = 0.05;

pub const LITERS_PER_CUBIC_METER: f64 = 1000.0;

fn usage(per_session_m3: f64, sessions_per_week: f64, weeks: f64, price: f64) -> GasUsage {
    let weekly_m3 = per_session_m3 * sessions_per_week;
    let weekly_cost = weekly_m3 * price;
    GasUsage {
        per_session_m3,
        weekly_m3,
        total_m3: weekly_m3 * weeks,
        weekly_cost,
        total_cost: weekly_cost * weeks,
    }
}

/// Computes per-session, weekly and total volumes and costs.
///
/// No validation happens here; callers supply non-negative inputs.
pub fn estimate(inputs: &BudgetInputs) -> BudgetResult {
    let sessions_per_week = f64::from(inputs.students_per_week);
    let weeks = f64::from(inputs.weeks);

    let air_per_session =
        inputs.ventilation_rate * inputs.session_duration_minutes / LITERS_PER_CUBIC_METER;
    let nitrogen_per_session = air_per_session * NITROGEN_TO_AIR_RATIO;
    let oxygen_per_session =
        inputs.ventilation_rate * inputs.recovery_duration_minutes / LITERS_PER_CUBIC_METER;

    let air = usage(air_per_session, sessions_per_week, weeks, inputs.price_air);
    let nitrogen = usage(nitrogen_per_session, sessions_per_week, weeks, inputs.price_nitrogen);
    let oxygen = usage(oxygen_per_session, sessions_per_week, weeks, inputs.price_oxygen);

    let total_cost = air.total_cost + nitrogen.total_cost + oxygen.total_cost;
    let total_cost_with_contingency = total_cost * (1.0 + inputs.contingency_percentage);

    tracing::debug!(
        "Budget: {} sessions/week x {} weeks, air {:.3} m3, N2 {:.3} m3, O2 {:.3} m3 per session, total {:.2}",
        inputs.students_per_week,
        inputs.weeks,
        air_per_session,
        nitrogen_per_session,
        oxygen_per_session,
        total_cost
    );

    BudgetResult {
        air,
        nitrogen,
        oxygen,
        total_cost,
        total_cost_with_contingency,
    }
}
