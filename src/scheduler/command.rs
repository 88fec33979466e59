//! Text command protocol: `START <minutes>` and `STOP`

use std::time::Duration;

use thiserror::Error;

const START_PREFIX: &str = "START ";
const STOP_COMMAND: &str = "STOP";

/// A decoded command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `START ` followed by its raw argument. The argument is validated by
    /// [`CookPlan::parse`] after the previous session has been cancelled.
    Start(&'a str),
    Stop,
    Unrecognized(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a raw line; surrounding whitespace is ignored
    pub fn parse(raw: &'a str) -> Self {
        let command = raw.trim();

        if let Some(argument) = command.strip_prefix(START_PREFIX) {
            Command::Start(argument)
        } else if command == STOP_COMMAND {
            Command::Stop
        } else {
            Command::Unrecognized(command)
        }
    }
}

/// Malformed `START` argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("missing minutes argument")]
    MissingMinutes,

    #[error("'{0}' is not a whole number of minutes")]
    InvalidMinutes(String),

    #[error("{0} minutes is too long to schedule")]
    DurationOverflow(u64),
}

/// Delays of one cook session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookPlan {
    pub minutes: u64,
    /// Delay until the ready stage
    pub total: Duration,
    /// Delay until the cooking stage
    pub cooking_offset: Duration,
}

impl CookPlan {
    /// Parse the argument that followed `START `.
    ///
    /// Only the first space-separated field is read; anything after it is
    /// ignored. The field must be unsigned decimal digits.
    pub fn parse(argument: &str) -> Result<Self, CommandError> {
        let token = argument.split(' ').next().unwrap_or_default();

        if token.is_empty() {
            return Err(CommandError::MissingMinutes);
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::InvalidMinutes(token.to_string()));
        }

        let minutes = token
            .parse::<u64>()
            .map_err(|_| CommandError::InvalidMinutes(token.to_string()))?;
        Self::from_minutes(minutes)
    }

    pub fn from_minutes(minutes: u64) -> Result<Self, CommandError> {
        let total_seconds = minutes
            .checked_mul(60)
            .ok_or(CommandError::DurationOverflow(minutes))?;
        // Cooking starts one minute before the end, immediately for M <= 1
        let cooking_seconds = minutes.saturating_sub(1) * 60;

        Ok(Self {
            minutes,
            total: Duration::from_secs(total_seconds),
            cooking_offset: Duration::from_secs(cooking_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_commands() {
        assert_eq!(Command::parse("START 5"), Command::Start("5"));
        assert_eq!(Command::parse("  START 5\r\n"), Command::Start("5"));
        assert_eq!(Command::parse("STOP"), Command::Stop);
        assert_eq!(Command::parse(" STOP \n"), Command::Stop);
        assert_eq!(Command::parse("STOP now"), Command::Unrecognized("STOP now"));
        assert_eq!(Command::parse("stop"), Command::Unrecognized("stop"));
        assert_eq!(Command::parse("START"), Command::Unrecognized("START"));
        assert_eq!(Command::parse("START "), Command::Unrecognized("START"));
        assert_eq!(Command::parse("STARTS 5"), Command::Unrecognized("STARTS 5"));
    }

    #[test]
    fn plan_for_five_minutes() {
        let plan = CookPlan::parse("5").unwrap();
        assert_eq!(plan.minutes, 5);
        assert_eq!(plan.total, Duration::from_secs(300));
        assert_eq!(plan.cooking_offset, Duration::from_secs(240));
    }

    #[test]
    fn short_plans_start_cooking_immediately() {
        let zero = CookPlan::from_minutes(0).unwrap();
        assert_eq!(zero.total, Duration::ZERO);
        assert_eq!(zero.cooking_offset, Duration::ZERO);

        let one = CookPlan::from_minutes(1).unwrap();
        assert_eq!(one.total, Duration::from_secs(60));
        assert_eq!(one.cooking_offset, Duration::ZERO);
    }

    #[test]
    fn only_first_field_is_read() {
        assert_eq!(CookPlan::parse("5 extra").unwrap().minutes, 5);
        assert_eq!(CookPlan::parse(" 5"), Err(CommandError::MissingMinutes));
    }

    #[test]
    fn rejects_malformed_minutes() {
        assert_eq!(CookPlan::parse(""), Err(CommandError::MissingMinutes));
        assert_eq!(CookPlan::parse("abc"), Err(CommandError::InvalidMinutes("abc".into())));
        assert_eq!(CookPlan::parse("-3"), Err(CommandError::InvalidMinutes("-3".into())));
        assert_eq!(CookPlan::parse("+3"), Err(CommandError::InvalidMinutes("+3".into())));
        assert_eq!(CookPlan::parse("2.5"), Err(CommandError::InvalidMinutes("2.5".into())));
        assert!(matches!(
            CookPlan::parse("99999999999999999999999"),
            Err(CommandError::InvalidMinutes(_))
        ));
    }

    #[test]
    fn rejects_overflowing_duration() {
        assert_eq!(
            CookPlan::from_minutes(u64::MAX),
            Err(CommandError::DurationOverflow(u64::MAX))
        );
    }
}
