use crate::app::report::ReportFormat;
use crate::config::toml_config::TomlConfig;
use crate::domain::model::ProgramSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hypoxia-budget")]
#[command(about = "Normobaric hypoxia training budget calculator with physiological estimates")]
pub struct CliConfig {
    /// Path to a TOML file overriding the built-in defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Use the configured values without prompting
    #[arg(long)]
    pub non_interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long)]
    pub students_per_week: Option<u32>,

    #[arg(long)]
    pub weeks: Option<u32>,

    /// Session duration in minutes
    #[arg(long)]
    pub session_duration: Option<f64>,

    /// Recovery duration on 100% oxygen, in minutes
    #[arg(long)]
    pub recovery_duration: Option<f64>,

    /// Simulated altitude in feet
    #[arg(long)]
    pub altitude_ft: Option<f64>,

    /// Time at altitude in minutes, echoed in the report
    #[arg(long)]
    pub exposure_duration: Option<f64>,

    /// Compressed air price per m3
    #[arg(long)]
    pub price_air: Option<f64>,

    /// Nitrogen price per m3
    #[arg(long)]
    pub price_nitrogen: Option<f64>,

    /// Oxygen price per m3
    #[arg(long)]
    pub price_oxygen: Option<f64>,

    /// Contingency as a decimal, e.g. 0.10
    #[arg(long)]
    pub contingency: Option<f64>,

    /// Currency code used in prompts and the report
    #[arg(long)]
    pub currency: Option<String>,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, settings: &mut ProgramSettings) {
        if let Some(v) = self.students_per_week {
            settings.students_per_week = v;
        }
        if let Some(v) = self.weeks {
            settings.weeks = v;
        }
        if let Some(v) = self.session_duration {
            settings.session_duration_minutes = v;
        }
        if let Some(v) = self.recovery_duration {
            settings.recovery_duration_minutes = v;
        }
        if let Some(v) = self.altitude_ft {
            settings.altitude_ft = v;
        }
        if let Some(v) = self.exposure_duration {
            settings.exposure_duration_minutes = Some(v);
        }
        if let Some(v) = self.price_air {
            settings.price_air = v;
        }
        if let Some(v) = self.price_nitrogen {
            settings.price_nitrogen = v;
        }
        if let Some(v) = self.price_oxygen {
            settings.price_oxygen = v;
        }
        if let Some(v) = self.contingency {
            settings.contingency_percentage = v;
        }
        if let Some(v) = &self.currency {
            settings.currency = v.clone();
        }
    }

    /// 內建預設 -> 設定檔 -> 命令列，合併後驗證
    pub fn load_settings(&self) -> Result<ProgramSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.to_settings()
            }
            None => ProgramSettings::default(),
        };
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }
}
