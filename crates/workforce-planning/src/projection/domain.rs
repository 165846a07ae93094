use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest horizon accepted for a single projection run.
pub const MAX_HORIZON_YEARS: u32 = 100;

const BASIS_POINTS_PER_UNIT: i128 = 10_000;

const MAX_BASIS_POINTS: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("{series} series has {found} years, expected {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("headcount no longer fits in 64 bits at year index {index}")]
    HeadcountOverflow { index: usize },
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// A rate expressed in percent, stored exactly in basis points.
///
/// Input is a decimal percent (12.5 means 12.5%) rounded half up to the
/// nearest hundredth of a percent. Parsing works on the decimal digits, and an
/// `f64` is read through its shortest round-trip representation, so `0.285`
/// becomes 29 basis points even though the nearest double lies just below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent {
    basis_points: i64,
}

impl Percent {
    pub const ZERO: Self = Self { basis_points: 0 };
    pub const HUNDRED: Self = Self {
        basis_points: 10_000,
    };

    pub const fn from_basis_points(basis_points: i64) -> Self {
        Self { basis_points }
    }

    pub fn from_percent(value: f64) -> Result<Self, ProjectionError> {
        if !value.is_finite() {
            return Err(ProjectionError::invalid(
                "percent",
                format!("{value} is not a finite number"),
            ));
        }

        value.to_string().parse()
    }

    pub const fn basis_points(self) -> i64 {
        self.basis_points
    }

    pub fn as_percent(self) -> f64 {
        self.basis_points as f64 / 100.0
    }

}

impl FromStr for Percent {
    type Err = ProjectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let well_formed = !(whole.is_empty() && fraction.is_empty())
            && whole
                .bytes()
                .chain(fraction.bytes())
                .all(|byte| byte.is_ascii_digit());
        if !well_formed {
            return Err(ProjectionError::invalid(
                "percent",
                format!("`{trimmed}` is not a decimal number"),
            ));
        }

        let out_of_range =
            || ProjectionError::invalid("percent", format!("{trimmed}% is out of range"));
        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        let mut fraction_digits = fraction.bytes().map(|byte| i64::from(byte - b'0'));
        let hundredths =
            fraction_digits.next().unwrap_or(0) * 10 + fraction_digits.next().unwrap_or(0);
        let carry = i64::from(fraction_digits.next().is_some_and(|digit| digit >= 5));

        let magnitude = whole_value
            .checked_mul(100)
            .and_then(|value| value.checked_add(hundredths + carry))
            .filter(|value| *value <= MAX_BASIS_POINTS)
            .ok_or_else(out_of_range)?;

        Ok(Self {
            basis_points: if negative { -magnitude } else { magnitude },
        })
    }
}

impl TryFrom<f64> for Percent {
    type Error = ProjectionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_percent(value)
    }
}

impl From<Percent> for f64 {
    fn from(value: Percent) -> Self {
        value.as_percent()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// `round(value * basis_points / 10_000)`, rounding halves away from zero.
///
/// Every recurrence and weighted share in the engine goes through here so the
/// rounding rule stays identical across the demand and supply models.
pub(crate) fn scale_half_up(value: i64, basis_points: i64) -> Option<i64> {
    let product = (value as i128).checked_mul(basis_points as i128)?;
    let half = BASIS_POINTS_PER_UNIT / 2;
    let rounded = if product >= 0 {
        (product + half) / BASIS_POINTS_PER_UNIT
    } else {
        -((-product + half) / BASIS_POINTS_PER_UNIT)
    };
    i64::try_from(rounded).ok()
}

/// `floor(value * basis_points / 10_000)`.
///
/// Department shares truncate so that weights totalling at most 100% never
/// allocate more heads than the macro figure they split.
pub(crate) fn scale_floor(value: i64, basis_points: i64) -> Option<i64> {
    let product = (value as i128).checked_mul(basis_points as i128)?;
    i64::try_from(product.div_euclid(BASIS_POINTS_PER_UNIT)).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Execs,
    Managers,
    Engineers,
    Ops,
    #[serde(rename = "hr")]
    HR,
    #[serde(rename = "it")]
    IT,
    Finance,
}

impl Department {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Execs,
            Self::Managers,
            Self::Engineers,
            Self::Ops,
            Self::HR,
            Self::IT,
            Self::Finance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Execs => "Execs",
            Self::Managers => "Managers",
            Self::Engineers => "Engineers",
            Self::Ops => "Ops",
            Self::HR => "HR",
            Self::IT => "IT",
            Self::Finance => "Finance",
        }
    }

    /// Accepts labels and the abbreviations used in departmental returns
    /// (`Mngrs`, `Engrs`, `Fin`), ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .replace('\u{feff}', "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "execs" | "exec" | "executives" => Some(Self::Execs),
            "managers" | "mngrs" => Some(Self::Managers),
            "engineers" | "engrs" | "engineering" => Some(Self::Engineers),
            "ops" | "operations" => Some(Self::Ops),
            "hr" | "human resources" => Some(Self::HR),
            "it" => Some(Self::IT),
            "finance" | "fin" => Some(Self::Finance),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs for one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    pub starting_headcount: i64,
    pub annual_growth_rate: Percent,
    pub annual_attrition_rate: Percent,
    pub horizon_years: u32,
    /// Calendar year used as the label of index 0.
    pub start_year: i32,
}

impl ProjectionParameters {
    pub fn new(
        starting_headcount: i64,
        annual_growth_rate: Percent,
        annual_attrition_rate: Percent,
        horizon_years: u32,
        start_year: i32,
    ) -> Self {
        Self {
            starting_headcount,
            annual_growth_rate,
            annual_attrition_rate,
            horizon_years,
            start_year,
        }
    }

    pub fn current_year() -> i32 {
        Local::now().year()
    }

    /// Checks the inputs the demand model depends on.
    pub fn validate_demand(&self) -> Result<(), ProjectionError> {
        if self.horizon_years < 1 {
            return Err(ProjectionError::invalid(
                "horizon_years",
                "horizon must cover at least one year",
            ));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ProjectionError::invalid(
                "horizon_years",
                format!("horizon may not exceed {MAX_HORIZON_YEARS} years"),
            ));
        }
        if self.starting_headcount < 0 {
            return Err(ProjectionError::invalid(
                "starting_headcount",
                format!("{} is negative", self.starting_headcount),
            ));
        }
        if self.annual_growth_rate < Percent::from_basis_points(-10_000) {
            return Err(ProjectionError::invalid(
                "annual_growth_rate",
                format!(
                    "{} would shrink the workforce below zero",
                    self.annual_growth_rate
                ),
            ));
        }
        Ok(())
    }

    /// Checks the demand inputs plus the attrition rate bounds.
    pub fn validate_supply(&self) -> Result<(), ProjectionError> {
        self.validate_demand()?;
        if self.annual_attrition_rate < Percent::ZERO
            || self.annual_attrition_rate > Percent::HUNDRED
        {
            return Err(ProjectionError::invalid(
                "annual_attrition_rate",
                format!(
                    "{} is outside the 0% to 100% range",
                    self.annual_attrition_rate
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn year_label(&self, index: usize) -> i32 {
        self.start_year.saturating_add(index as i32)
    }
}
