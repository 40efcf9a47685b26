use crate::domain::model::{BudgetResult, Gas, PhysiologyResult, ProgramSettings};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub settings: ProgramSettings,
    pub physiology: PhysiologyResult,
    pub budget: BudgetResult,
}

/// One reported quantity, shared by the text and CSV renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub section: &'static str,
    pub metric: String,
    pub value: f64,
    pub unit: String,
}

impl ReportRow {
    fn new(section: &'static str, metric: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            section,
            metric: metric.into(),
            value,
            unit: unit.into(),
        }
    }
}

const PHYSIOLOGY: &str = "physiology";
const BUDGET: &str = "budget";

impl Report {
    pub fn new(settings: ProgramSettings, physiology: PhysiologyResult, budget: BudgetResult) -> Self {
        Self {
            generated_at: Utc::now(),
            settings,
            physiology,
            budget,
        }
    }

    pub fn physiology_rows(&self) -> Vec<ReportRow> {
        let p = &self.physiology;
        let mut rows = vec![
            ReportRow::new(PHYSIOLOGY, "Altitude", p.altitude_ft, "ft"),
            ReportRow::new(PHYSIOLOGY, "Altitude", p.altitude_m, "m"),
            ReportRow::new(PHYSIOLOGY, "Pressure At Altitude", p.pressure_at_altitude_mmhg, "mmHg"),
            ReportRow::new(PHYSIOLOGY, "PaO2", p.pao2_mmhg, "mmHg"),
            ReportRow::new(PHYSIOLOGY, "SaO2", p.sao2_percent, "%"),
            ReportRow::new(PHYSIOLOGY, "Ventilation Rate", p.ventilation_rate_l_per_min, "L/min"),
            ReportRow::new(PHYSIOLOGY, "Heart Rate", p.heart_rate_bpm, "bpm"),
        ];
        if let Some(minutes) = p.duration_minutes {
            rows.push(ReportRow::new(PHYSIOLOGY, "Time At Altitude", minutes, "minutes"));
        }
        rows
    }

    pub fn budget_rows(&self) -> Vec<ReportRow> {
        let currency = self.settings.currency.as_str();
        let mut rows = Vec::new();

        for gas in Gas::ALL {
            let usage = self.budget.usage(gas);
            let name = gas.label();
            rows.push(ReportRow::new(BUDGET, format!("Per-Session {} Consumption", name), usage.per_session_m3, "m³"));
            rows.push(ReportRow::new(BUDGET, format!("Weekly {} Consumption", name), usage.weekly_m3, "m³"));
            rows.push(ReportRow::new(BUDGET, format!("Total {} Consumption", name), usage.total_m3, "m³"));
        }
        for gas in Gas::ALL {
            let usage = self.budget.usage(gas);
            let name = gas.label();
            rows.push(ReportRow::new(BUDGET, format!("Weekly {} Cost", name), usage.weekly_cost, currency));
            rows.push(ReportRow::new(BUDGET, format!("Total {} Cost", name), usage.total_cost, currency));
        }

        rows.push(ReportRow::new(BUDGET, "Total Cost", self.budget.total_cost, currency));
        rows.push(ReportRow::new(
            BUDGET,
            format!(
                "Total Cost With Contingency ({:.0}%)",
                self.settings.contingency_percentage * 100.0
            ),
            self.budget.total_cost_with_contingency,
            currency,
        ));
        rows
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => self.to_csv(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // String 寫入不會失敗
        let _ = writeln!(out, "\n=== Physiological Parameters ===\n");
        for row in self.physiology_rows() {
            let _ = writeln!(out, "{}: {:.2} {}", row.metric, row.value, row.unit);
        }

        let _ = writeln!(out, "\n=== Budget Summary ===\n");
        let _ = writeln!(
            out,
            "Program: {} sessions/week for {} weeks, {} min sessions + {} min recovery",
            self.settings.students_per_week,
            self.settings.weeks,
            self.settings.session_duration_minutes,
            self.settings.recovery_duration_minutes
        );
        for row in self.budget_rows() {
            let _ = writeln!(out, "{}: {:.2} {}", row.metric, row.value, row.unit);
        }

        let _ = writeln!(out, "\n=== End of Calculation ===");
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in self.physiology_rows().into_iter().chain(self.budget_rows()) {
            writer.serialize(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::evaluate;

    fn default_report() -> Report {
        evaluate(&ProgramSettings::default())
    }

    #[test]
    fn test_text_report_sections_and_units() {
        let text = default_report().to_text();

        assert!(text.contains("=== Physiological Parameters ==="));
        assert!(text.contains("=== Budget Summary ==="));
        assert!(text.trim_end().ends_with("=== End of Calculation ==="));
        assert!(text.contains("Altitude: 25000.00 ft"));
        assert!(text.contains("Altitude: 7620.00 m"));
        assert!(text.contains("Ventilation Rate: 42.72 L/min"));
        assert!(text.contains("Heart Rate: 136.20 bpm"));
        assert!(text.contains("Total Cost With Contingency (10%): "));
        assert!(text.contains(" m³"));
        assert!(text.contains(" COP"));
        assert!(!text.contains("Time At Altitude"));
    }

    #[test]
    fn test_text_report_includes_duration_when_given() {
        let settings = ProgramSettings {
            exposure_duration_minutes: Some(30.0),
            ..ProgramSettings::default()
        };
        let text = evaluate(&settings).to_text();
        assert!(text.contains("Time At Altitude: 30.00 minutes"));
    }

    #[test]
    fn test_json_report_keys() {
        let report = default_report();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["physiology"]["altitude_ft"], 25000.0);
        assert!(json["physiology"]["ventilation_rate_L_per_min"].is_number());
        assert!(json["physiology"]["PaO2_mmHg"].is_number());
        assert!(json["physiology"]["SaO2_percent"].is_number());
        assert!(json["physiology"].get("duration_minutes").is_none());
        assert!(json["budget"]["air"]["weekly_m3"].is_number());
        let adjusted = json["budget"]["total_cost_with_contingency"].as_f64().unwrap();
        assert!((adjusted - report.budget.total_cost_with_contingency).abs() < 1e-6);
        assert_eq!(json["settings"]["currency"], "COP");
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_csv_report_rows() {
        let report = default_report();
        let csv_text = report.to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["section", "metric", "value", "unit"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let expected = report.physiology_rows().len() + report.budget_rows().len();
        assert_eq!(records.len(), expected);

        let total = records.iter().find(|r| &r[1] == "Total Cost").unwrap();
        assert_eq!(&total[0], "budget");
        assert_eq!(total[2].parse::<f64>().unwrap(), report.budget.total_cost);
        assert_eq!(&total[3], "COP");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let report = default_report();
        assert_eq!(report.render(ReportFormat::Text).unwrap(), report.to_text());
        assert!(report.render(ReportFormat::Json).unwrap().starts_with('{'));
        assert!(report.render(ReportFormat::Csv).unwrap().starts_with("section,metric,value,unit"));
    }
}
