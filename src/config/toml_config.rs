use crate::domain::model::ProgramSettings;
use crate::utils::error::{BudgetError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔：每個欄位都可省略，省略時沿用內建預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub program: Option<ProgramSection>,
    pub prices: Option<PriceSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSection {
    pub students_per_week: Option<u32>,
    pub weeks: Option<u32>,
    pub session_duration_minutes: Option<f64>,
    pub recovery_duration_minutes: Option<f64>,
    pub altitude_ft: Option<f64>,
    pub exposure_duration_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceSection {
    pub currency: Option<String>,
    pub air: Option<f64>,
    pub nitrogen: Option<f64>,
    pub oxygen: Option<f64>,
    pub contingency_percentage: Option<f64>,
}

fn set<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BudgetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BudgetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ALTITUDE_FT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BudgetError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把設定檔的值覆蓋到既有設定上
    pub fn apply_to(&self, settings: &mut ProgramSettings) {
        if let Some(program) = &self.program {
            set(&mut settings.students_per_week, &program.students_per_week);
            set(&mut settings.weeks, &program.weeks);
            set(&mut settings.session_duration_minutes, &program.session_duration_minutes);
            set(&mut settings.recovery_duration_minutes, &program.recovery_duration_minutes);
            set(&mut settings.altitude_ft, &program.altitude_ft);
            if program.exposure_duration_minutes.is_some() {
                settings.exposure_duration_minutes = program.exposure_duration_minutes;
            }
        }

        if let Some(prices) = &self.prices {
            set(&mut settings.currency, &prices.currency);
            set(&mut settings.price_air, &prices.air);
            set(&mut settings.price_nitrogen, &prices.nitrogen);
            set(&mut settings.price_oxygen, &prices.oxygen);
            set(&mut settings.contingency_percentage, &prices.contingency_percentage);
        }
    }

    /// 內建預設值加上設定檔覆蓋
    pub fn to_settings(&self) -> ProgramSettings {
        let mut settings = ProgramSettings::default();
        self.apply_to(&mut settings);
        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[program]
students_per_week = 12
weeks = 10
session_duration_minutes = 25
recovery_duration_minutes = 4.5
altitude_ft = 18000
exposure_duration_minutes = 30

[prices]
currency = "USD"
air = 4.5
nitrogen = 4
oxygen = 6.25
contingency_percentage = 0.15
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.to_settings();

        assert_eq!(settings.students_per_week, 12);
        assert_eq!(settings.weeks, 10);
        assert_eq!(settings.session_duration_minutes, 25.0);
        assert_eq!(settings.recovery_duration_minutes, 4.5);
        assert_eq!(settings.altitude_ft, 18000.0);
        assert_eq!(settings.exposure_duration_minutes, Some(30.0));
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.price_air, 4.5);
        assert_eq!(settings.price_nitrogen, 4.0);
        assert_eq!(settings.price_oxygen, 6.25);
        assert_eq!(settings.contingency_percentage, 0.15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_content = r#"
[program]
weeks = 8
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().to_settings();
        assert_eq!(
            settings,
            ProgramSettings {
                weeks: 8,
                ..ProgramSettings::default()
            }
        );
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config =
            TomlConfig::from_toml_str(include_str!("../../hypoxia-budget.example.toml")).unwrap();
        assert_eq!(config.to_settings(), ProgramSettings::default());
    }

    #[test]
    fn test_empty_config_is_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.to_settings(), ProgramSettings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HYPOXIA_TEST_ALTITUDE_FT", "30000");

        let toml_content = r#"
[program]
altitude_ft = ${HYPOXIA_TEST_ALTITUDE_FT}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.to_settings().altitude_ft, 30000.0);

        std::env::remove_var("HYPOXIA_TEST_ALTITUDE_FT");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[prices]
currency = "${HYPOXIA_TEST_UNSET_CURRENCY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.to_settings().currency,
            "${HYPOXIA_TEST_UNSET_CURRENCY}"
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TomlConfig::from_toml_str("[program]\nstudents = 3\n").unwrap_err();
        assert!(matches!(err, BudgetError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(TomlConfig::from_toml_str("[program]\nweeks = \"many\"\n").is_err());
        assert!(TomlConfig::from_toml_str("[program]\nweeks = 2.5\n").is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[prices]\nair = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[program]\nstudents_per_week = 5\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.to_settings().students_per_week, 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/hypoxia-budget.toml").unwrap_err();
        assert!(matches!(err, BudgetError::IoError(_)));
    }
}
