//! XML-style durations (`P1DT2H30M`) as used throughout the wire protocol.
//!
//! Each component is optional. An unset component is not rendered, and
//! neither is one that is zero or negative, which means an all-zero duration
//! would render as a bare `P`; that case falls back to `PT0S`.
//!
//! # Grammar
//!
//! ```text
//! duration := ['-'] 'P' date-part ['T' time-part]
//! date-part := (digits ('Y' | 'M' | 'D'))*
//! time-part := (digits-or-dots ('H' | 'M' | 'S'))*
//! ```
//!
//! Parsing runs a small state machine over the input one character at a time:
//!
//! ```text
//! Sign ──'-'──► Designator ──'P'──► Date ──'T'──► Time
//!   └────────────'P'──────────────────┘
//! ```
//!
//! Digits accumulate inside `Date`/`Time` until a unit letter closes the run.
//! Fractional time values are truncated to their integer part.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Syntax errors raised while parsing a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The string does not start with `P` or `-P`.
    #[error("Duration '{input}' is not in the xml duration format")]
    NotDuration { input: String },

    /// A character that is not valid at its position.
    #[error("Unrecognized token '{token}' in '{input}'")]
    UnrecognizedToken { token: char, input: String },

    /// A number with no unit letter after it.
    #[error("Number '{number}' in '{input}' has no unit designator")]
    MissingDesignator { number: String, input: String },

    /// A digit run that could not be read as an integer.
    #[error("Invalid number '{number}' in '{input}'")]
    InvalidNumber { number: String, input: String },
}

/// A signed calendar/clock duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub negative: bool,
}

impl Duration {
    /// A duration with every component unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clock duration. Inputs are rounded to whole units.
    pub fn create_time(hours: f64, minutes: f64, seconds: f64, negative: bool) -> Self {
        Self {
            hours: Some(hours.round() as i64),
            minutes: Some(minutes.round() as i64),
            seconds: Some(seconds.round() as i64),
            negative,
            ..Self::default()
        }
    }

    /// Build a calendar duration. Inputs are rounded to whole units.
    pub fn create_date(years: f64, months: f64, days: f64, negative: bool) -> Self {
        Self {
            years: Some(years.round() as i64),
            months: Some(months.round() as i64),
            days: Some(days.round() as i64),
            negative,
            ..Self::default()
        }
    }

    /// Build a duration with both calendar and clock parts.
    #[allow(clippy::too_many_arguments)]
    pub fn create_date_time(
        years: f64,
        months: f64,
        days: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
        negative: bool,
    ) -> Self {
        Self {
            years: Some(years.round() as i64),
            months: Some(months.round() as i64),
            days: Some(days.round() as i64),
            hours: Some(hours.round() as i64),
            minutes: Some(minutes.round() as i64),
            seconds: Some(seconds.round() as i64),
            negative,
        }
    }

    /// True when at least one component is set to a non-negative value.
    pub fn is_valid(&self) -> bool {
        self.components().iter().any(|c| matches!(c, Some(v) if *v >= 0))
    }

    /// Clock part in seconds, saturating at `i64::MAX`. Calendar components
    /// are ignored.
    pub fn to_seconds(&self) -> i64 {
        let val = positive(self.seconds)
            .saturating_add(positive(self.minutes).saturating_mul(60))
            .saturating_add(positive(self.hours).saturating_mul(3600));
        if self.negative {
            -val
        } else {
            val
        }
    }

    /// Length in days, counting a month as 30 days and a year as 365.25.
    pub fn to_days(&self) -> f64 {
        let val = positive(self.hours) as f64 / 24.0
            + positive(self.days) as f64
            + 30.0 * positive(self.months) as f64
            + 365.25 * positive(self.years) as f64;
        if self.negative {
            -val
        } else {
            val
        }
    }

    /// Compare by day count first, then by the clock part.
    pub fn is_less_than(&self, other: &Duration) -> bool {
        let mine = self.to_days();
        let theirs = other.to_days();
        if mine < theirs {
            true
        } else if mine == theirs {
            self.to_seconds() < other.to_seconds()
        } else {
            false
        }
    }

    fn components(&self) -> [Option<i64>; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    /// Parse a duration string.
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        DurationParser::new(input).run()
    }
}

fn positive(value: Option<i64>) -> i64 {
    value.filter(|v| *v > 0).unwrap_or(0)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from(if self.negative { "-P" } else { "P" });
        let bare = out.len();

        for (value, unit) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if let Some(v) = value.filter(|v| *v > 0) {
                out.push_str(&format!("{}{}", v, unit));
            }
        }

        let time = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];
        if time.iter().any(|(v, _)| matches!(v, Some(x) if *x > 0)) {
            out.push('T');
            for (value, unit) in time {
                if let Some(v) = value.filter(|v| *v > 0) {
                    out.push_str(&format!("{}{}", v, unit));
                }
            }
        }

        if out.len() == bare {
            out.push_str("T0S");
        }
        f.write_str(&out)
    }
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Duration::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Sign,
    Designator,
    Date,
    Time,
}

struct DurationParser<'a> {
    input: &'a str,
    state: State,
    digits: String,
    result: Duration,
}

impl<'a> DurationParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::Sign,
            digits: String::new(),
            result: Duration::default(),
        }
    }

    fn run(mut self) -> Result<Duration, DurationError> {
        for token in self.input.chars() {
            self.state = self.step(token)?;
        }

        match self.state {
            State::Sign | State::Designator => Err(self.not_duration()),
            State::Date | State::Time if !self.digits.is_empty() => {
                Err(DurationError::MissingDesignator {
                    number: self.digits,
                    input: self.input.to_string(),
                })
            }
            State::Date | State::Time => Ok(self.result),
        }
    }

    fn step(&mut self, token: char) -> Result<State, DurationError> {
        match (self.state, token) {
            (State::Sign, '-') => {
                self.result.negative = true;
                Ok(State::Designator)
            }
            (State::Sign | State::Designator, 'P') => Ok(State::Date),
            (State::Sign | State::Designator, _) => Err(self.not_duration()),

            (State::Date, '0'..='9') => {
                self.digits.push(token);
                Ok(State::Date)
            }
            (State::Date, 'T') if self.digits.is_empty() => Ok(State::Time),
            (State::Date, 'Y' | 'M' | 'D') if !self.digits.is_empty() => {
                let value = self.take_number()?;
                match token {
                    'Y' => self.result.years = Some(value),
                    'M' => self.result.months = Some(value),
                    _ => self.result.days = Some(value),
                }
                Ok(State::Date)
            }

            (State::Time, '0'..='9' | '.') => {
                self.digits.push(token);
                Ok(State::Time)
            }
            (State::Time, 'H' | 'M' | 'S') if !self.digits.is_empty() => {
                let value = self.take_number()?;
                match token {
                    'H' => self.result.hours = Some(value),
                    'M' => self.result.minutes = Some(value),
                    _ => self.result.seconds = Some(value),
                }
                Ok(State::Time)
            }

            (State::Date | State::Time, _) => Err(DurationError::UnrecognizedToken {
                token,
                input: self.input.to_string(),
            }),
        }
    }

    /// Consume the pending digit run, truncating any fractional part.
    fn take_number(&mut self) -> Result<i64, DurationError> {
        let number = std::mem::take(&mut self.digits);
        let whole = number.split('.').next().unwrap_or_default();
        whole
            .parse::<i64>()
            .map_err(|_| DurationError::InvalidNumber {
                number: number.clone(),
                input: self.input.to_string(),
            })
    }

    fn not_duration(&self) -> DurationError {
        DurationError::NotDuration {
            input: self.input.to_string(),
        }
    }
}
