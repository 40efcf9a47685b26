use crate::core::physiology::BAROMETRIC_CEILING_FT;
use crate::domain::model::ProgramSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_below, validate_non_empty_string, validate_non_negative, validate_positive,
    validate_positive_count, Validate,
};

impl Validate for ProgramSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_count("students_per_week", self.students_per_week, 1)?;
        validate_positive_count("weeks", self.weeks, 1)?;
        validate_positive("session_duration_minutes", self.session_duration_minutes)?;
        validate_positive("recovery_duration_minutes", self.recovery_duration_minutes)?;

        validate_positive("altitude_ft", self.altitude_ft)?;
        validate_below("altitude_ft", self.altitude_ft, BAROMETRIC_CEILING_FT)?;
        if let Some(minutes) = self.exposure_duration_minutes {
            validate_positive("exposure_duration_minutes", minutes)?;
        }

        validate_positive("price_air", self.price_air)?;
        validate_positive("price_nitrogen", self.price_nitrogen)?;
        validate_positive("price_oxygen", self.price_oxygen)?;
        validate_non_negative("contingency_percentage", self.contingency_percentage)?;
        validate_non_empty_string("currency", &self.currency)?;

        Ok(())
    }
}
