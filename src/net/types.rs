//! Resource DTOs exchanged with the API.
//!
//! DESIGN
//! ======
//! Every DTO is a flat, fully optional record so the same type can hold a
//! server payload or a partially filled form. Outgoing bodies are built by the
//! per-resource projections in `resources`, which pick the declared fields and
//! drop everything else (including `None`s). Foreign keys stay plain ids.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource identifier. The API issues UUID strings; numeric ids are kept
/// numeric on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Id> for Value {
    fn from(value: Id) -> Self {
        match value {
            Id::Num(n) => Value::from(n),
            Id::Text(s) => Value::String(s),
        }
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    /// Integers become [`Id::Num`]; anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::Text(s.to_owned()), Self::Num))
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// A registered user, shown as an entrepreneur.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entrepreneur {
    pub id: Option<Id>,
    pub username: Option<String>,
    #[serde(alias = "fullName")]
    pub full_name: Option<String>,
    /// ISO 8601 date or timestamp, passed through untouched.
    pub birthday: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub role: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: Option<Id>,
    pub owner_id: Option<Id>,
    pub name: Option<String>,
    /// Activity field id. Sent as `activity_field_id`.
    #[serde(alias = "activity_field_id")]
    pub activity_field: Option<Id>,
    pub city: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: Option<Id>,
    pub owner_id: Option<Id>,
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Link between a user and a skill.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSkill {
    pub id: Option<Id>,
    #[serde(alias = "userId")]
    pub user_id: Option<Id>,
    #[serde(alias = "skillId")]
    pub skill_id: Option<Id>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityField {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
}

/// Quarterly financial figures for a company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialReport {
    pub id: Option<Id>,
    pub company_id: Option<Id>,
    pub revenue: Option<f64>,
    pub costs: Option<f64>,
    /// Server-computed; never sent.
    pub taxes: Option<f64>,
    /// Server-computed; never sent.
    pub tax_load: Option<f64>,
    pub year: Option<i32>,
    pub quarter: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub id: Option<Id>,
    #[serde(alias = "reviewer")]
    pub reviewer_id: Option<Id>,
    #[serde(alias = "target")]
    pub target_id: Option<Id>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

/// `data` payload of a successful `POST /login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginData {
    /// Empty when the server omitted it.
    #[serde(default)]
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// REPORT PERIOD
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("expected `<year>_<quarter>-<year>_<quarter>`, got `{0}`")]
    Format(String),
    #[error("quarter must be 1-4, got {0}")]
    Quarter(u8),
}

/// Inclusive range of quarters used by the company report endpoint.
///
/// Renders as the path token `2021_1-2022_4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_year: i32,
    pub start_quarter: u8,
    pub end_year: i32,
    pub end_quarter: u8,
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}-{}_{}", self.start_year, self.start_quarter, self.end_year, self.end_quarter)
    }
}

impl FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || PeriodParseError::Format(s.to_owned());
        let (start, end) = s.split_once('-').ok_or_else(format_err)?;
        let (start_year, start_quarter) = parse_year_quarter(start).ok_or_else(format_err)?;
        let (end_year, end_quarter) = parse_year_quarter(end).ok_or_else(format_err)?;
        for quarter in [start_quarter, end_quarter] {
            if !(1..=4).contains(&quarter) {
                return Err(PeriodParseError::Quarter(quarter));
            }
        }
        Ok(Self { start_year, start_quarter, end_year, end_quarter })
    }
}

fn parse_year_quarter(raw: &str) -> Option<(i32, u8)> {
    let (year, quarter) = raw.split_once('_')?;
    Some((year.parse().ok()?, quarter.parse().ok()?))
}
