use crate::core::physiology::BAROMETRIC_CEILING_FT;
use crate::domain::model::ProgramSettings;
use crate::domain::ports::InputCollector;
use crate::utils::error::{BudgetError, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Numeric types the prompt loop can parse.
pub trait PromptValue: FromStr + Copy + Display {
    const KIND: &'static str;

    fn as_f64(&self) -> f64;
}

impl PromptValue for u32 {
    const KIND: &'static str = "integer";

    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
}

impl PromptValue for f64 {
    const KIND: &'static str = "number";

    fn as_f64(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    Positive,
    NonNegative,
    /// Positive and strictly below the bound.
    PositiveBelow(f64),
}

impl Constraint {
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Constraint::Positive => value > 0.0,
            Constraint::NonNegative => value >= 0.0,
            Constraint::PositiveBelow(limit) => value > 0.0 && value < *limit,
        }
    }

    fn hint(&self, kind: &str) -> String {
        match self {
            Constraint::Positive => format!("Please enter a positive {}.", kind),
            Constraint::NonNegative => format!("Please enter a {} of zero or more.", kind),
            Constraint::PositiveBelow(limit) => {
                format!("Please enter a positive {} below {:.0}.", kind, limit)
            }
        }
    }
}

/// Re-prompts until the answer parses and satisfies its constraint.
///
/// An empty answer selects the default. End of input aborts with
/// [`BudgetError::Interrupted`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BudgetError::Interrupted);
        }
        Ok(line.trim().to_string())
    }

    /// `Ok(None)` asks again, `Ok(Some(None))` is an empty answer.
    fn parse_answer<T: PromptValue>(
        &mut self,
        field: &str,
        answer: &str,
        constraint: Constraint,
    ) -> Result<Option<Option<T>>> {
        if answer.is_empty() {
            return Ok(Some(None));
        }
        match answer.parse::<T>() {
            Ok(value) if constraint.accepts(value.as_f64()) => Ok(Some(Some(value))),
            Ok(_) => {
                tracing::debug!("Rejected '{}' for {}: out of range", answer, field);
                writeln!(self.output, "Invalid input. {}", constraint.hint(T::KIND))?;
                Ok(None)
            }
            Err(_) => {
                tracing::debug!("Rejected '{}' for {}: not a valid {}", answer, field, T::KIND);
                writeln!(self.output, "Invalid input. Please enter a valid {}.", T::KIND)?;
                Ok(None)
            }
        }
    }

    pub fn ask<T: PromptValue>(
        &mut self,
        field: &str,
        prompt: &str,
        default: T,
        constraint: Constraint,
    ) -> Result<T> {
        loop {
            let answer = self.read_answer(prompt)?;
            if let Some(parsed) = self.parse_answer::<T>(field, &answer, constraint)? {
                return Ok(parsed.unwrap_or(default));
            }
        }
    }

    pub fn ask_optional<T: PromptValue>(
        &mut self,
        field: &str,
        prompt: &str,
        default: Option<T>,
        constraint: Constraint,
    ) -> Result<Option<T>> {
        loop {
            let answer = self.read_answer(prompt)?;
            if let Some(parsed) = self.parse_answer::<T>(field, &answer, constraint)? {
                return Ok(parsed.or(default));
            }
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Asks for every setting on the terminal, offering the configured defaults.
pub struct InteractiveCollector<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> InteractiveCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        self.prompter.into_inner()
    }
}

impl<R: BufRead, W: Write> InputCollector for InteractiveCollector<R, W> {
    fn collect(&mut self, defaults: &ProgramSettings) -> Result<ProgramSettings> {
        let p = &mut self.prompter;
        p.say("=== Normobaric Hypoxia Training Budget Calculator ===\n")?;

        let students_per_week = p.ask(
            "students_per_week",
            &format!(
                "Enter the number of students per week (default is {}): ",
                defaults.students_per_week
            ),
            defaults.students_per_week,
            Constraint::Positive,
        )?;
        let weeks = p.ask(
            "weeks",
            &format!(
                "Enter the number of weeks for the training program (default is {}): ",
                defaults.weeks
            ),
            defaults.weeks,
            Constraint::Positive,
        )?;
        let session_duration_minutes = p.ask(
            "session_duration_minutes",
            &format!(
                "Enter the duration of each session in minutes (default is {}): ",
                defaults.session_duration_minutes
            ),
            defaults.session_duration_minutes,
            Constraint::Positive,
        )?;
        let recovery_duration_minutes = p.ask(
            "recovery_duration_minutes",
            &format!(
                "Enter the recovery duration in minutes (default is {}): ",
                defaults.recovery_duration_minutes
            ),
            defaults.recovery_duration_minutes,
            Constraint::Positive,
        )?;
        let altitude_ft = p.ask(
            "altitude_ft",
            &format!(
                "Enter the simulated altitude in feet (default is {} ft): ",
                defaults.altitude_ft
            ),
            defaults.altitude_ft,
            Constraint::PositiveBelow(BAROMETRIC_CEILING_FT),
        )?;

        let exposure_default = match defaults.exposure_duration_minutes {
            Some(minutes) => format!("default is {}", minutes),
            None => "optional, press Enter to skip".to_string(),
        };
        let exposure_duration_minutes = p.ask_optional(
            "exposure_duration_minutes",
            &format!("Enter the time at altitude in minutes ({}): ", exposure_default),
            defaults.exposure_duration_minutes,
            Constraint::Positive,
        )?;

        let currency = defaults.currency.clone();
        let price_air = p.ask(
            "price_air",
            &format!(
                "Enter the price of Compressed Air per m3 in {} (default is {}): ",
                currency, defaults.price_air
            ),
            defaults.price_air,
            Constraint::Positive,
        )?;
        let price_nitrogen = p.ask(
            "price_nitrogen",
            &format!(
                "Enter the price of Nitrogen per m3 in {} (default is {}): ",
                currency, defaults.price_nitrogen
            ),
            defaults.price_nitrogen,
            Constraint::Positive,
        )?;
        let price_oxygen = p.ask(
            "price_oxygen",
            &format!(
                "Enter the price of Oxygen per m3 in {} (default is {}): ",
                currency, defaults.price_oxygen
            ),
            defaults.price_oxygen,
            Constraint::Positive,
        )?;
        let contingency_percentage = p.ask(
            "contingency_percentage",
            &format!(
                "Enter the contingency percentage as a decimal (default is {}): ",
                defaults.contingency_percentage
            ),
            defaults.contingency_percentage,
            Constraint::NonNegative,
        )?;

        Ok(ProgramSettings {
            students_per_week,
            weeks,
            session_duration_minutes,
            recovery_duration_minutes,
            altitude_ft,
            exposure_duration_minutes,
            price_air,
            price_nitrogen,
            price_oxygen,
            contingency_percentage,
            currency,
        })
    }
}

/// Uses the configured settings as-is, for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetCollector;

impl PresetCollector {
    pub fn new() -> Self {
        Self
    }
}

impl InputCollector for PresetCollector {
    fn collect(&mut self, defaults: &ProgramSettings) -> Result<ProgramSettings> {
        tracing::debug!("Non-interactive run, using configured settings");
        Ok(defaults.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_inner().1).unwrap()
    }

    #[test]
    fn test_empty_answer_selects_default() {
        let mut p = prompter("\n");
        let value: u32 = p.ask("weeks", "Weeks: ", 26, Constraint::Positive).unwrap();
        assert_eq!(value, 26);
    }

    #[test]
    fn test_answer_is_trimmed_and_parsed() {
        let mut p = prompter("  12.5  \n");
        let value: f64 = p.ask("session", "Session: ", 20.0, Constraint::Positive).unwrap();
        assert_eq!(value, 12.5);
    }

    #[test]
    fn test_reprompts_on_parse_failure() {
        let mut p = prompter("abc\n3.5\n7\n");
        let value: u32 = p.ask("weeks", "Weeks: ", 26, Constraint::Positive).unwrap();
        assert_eq!(value, 7);

        let out = output_of(p);
        assert_eq!(out.matches("Weeks: ").count(), 3);
        assert_eq!(out.matches("Invalid input. Please enter a valid integer.").count(), 2);
    }

    #[test]
    fn test_reprompts_on_constraint_failure() {
        let mut p = prompter("0\n-4\nnan\ninf\n15\n");
        let value: f64 = p.ask("price_air", "Price: ", 1.0, Constraint::Positive).unwrap();
        assert_eq!(value, 15.0);

        let out = output_of(p);
        assert_eq!(out.matches("Please enter a positive number.").count(), 4);
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        let mut p = prompter("-0.1\n0\n");
        let value: f64 = p
            .ask("contingency_percentage", "Contingency: ", 0.1, Constraint::NonNegative)
            .unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_positive_below_rejects_ceiling() {
        let mut p = prompter("200000\n30000\n");
        let value: f64 = p
            .ask("altitude_ft", "Altitude: ", 25000.0, Constraint::PositiveBelow(BAROMETRIC_CEILING_FT))
            .unwrap();
        assert_eq!(value, 30000.0);
        assert!(output_of(p).contains("below 145442"));
    }

    #[test]
    fn test_eof_is_interrupt() {
        let mut p = prompter("");
        let err = p.ask::<u32>("weeks", "Weeks: ", 26, Constraint::Positive).unwrap_err();
        assert!(matches!(err, BudgetError::Interrupted));
    }

    #[test]
    fn test_eof_after_invalid_answers_is_interrupt() {
        let mut p = prompter("x\ny\n");
        let err = p.ask::<f64>("altitude_ft", "Altitude: ", 1.0, Constraint::Positive).unwrap_err();
        assert!(matches!(err, BudgetError::Interrupted));
    }

    #[test]
    fn test_optional_answer() {
        let mut p = prompter("\n\n30\n");
        assert_eq!(p.ask_optional::<f64>("d", "D: ", None, Constraint::Positive).unwrap(), None);
        assert_eq!(p.ask_optional("d", "D: ", Some(10.0), Constraint::Positive).unwrap(), Some(10.0));
        assert_eq!(p.ask_optional("d", "D: ", None, Constraint::Positive).unwrap(), Some(30.0));
    }

    #[test]
    fn test_interactive_collector_all_defaults() {
        let defaults = ProgramSettings::default();
        let mut collector =
            InteractiveCollector::new(Cursor::new("\n".repeat(10).into_bytes()), Vec::new());
        let settings = collector.collect(&defaults).unwrap();
        assert_eq!(settings, defaults);

        let out = String::from_utf8(collector.into_inner().1).unwrap();
        assert!(out.contains("Enter the number of students per week (default is 20): "));
        assert!(out.contains("Enter the simulated altitude in feet (default is 25000 ft): "));
        assert!(out.contains("per m3 in COP (default is 17853)"));
        assert!(out.contains("(default is 0.1)"));
    }

    #[test]
    fn test_interactive_collector_custom_answers() {
        let answers = "10\n12\n30\n8\n15000\n45\n100\n200\n300\n0.25\n";
        let mut collector = InteractiveCollector::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new());
        let settings = collector.collect(&ProgramSettings::default()).unwrap();

        assert_eq!(settings.students_per_week, 10);
        assert_eq!(settings.weeks, 12);
        assert_eq!(settings.session_duration_minutes, 30.0);
        assert_eq!(settings.recovery_duration_minutes, 8.0);
        assert_eq!(settings.altitude_ft, 15000.0);
        assert_eq!(settings.exposure_duration_minutes, Some(45.0));
        assert_eq!(settings.price_air, 100.0);
        assert_eq!(settings.price_nitrogen, 200.0);
        assert_eq!(settings.price_oxygen, 300.0);
        assert_eq!(settings.contingency_percentage, 0.25);
        assert_eq!(settings.currency, "COP");
    }

    #[test]
    fn test_preset_collector_returns_defaults() {
        let defaults = ProgramSettings {
            weeks: 4,
            ..ProgramSettings::default()
        };
        assert_eq!(PresetCollector::new().collect(&defaults).unwrap(), defaults);
    }
}
