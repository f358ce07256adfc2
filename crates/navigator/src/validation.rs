//! Query parameter validation for the proxy boundary
//!
//! Every helper takes the raw (possibly absent) parameter and returns either a
//! normalized value or a [`ValidationError`] carrying a human readable message.
//! Absent and empty parameters are treated the same.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::ValidationError;
use crate::models::House;

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Length limit and presence requirement for a free-text parameter
#[derive(Debug, Clone, Copy)]
pub struct StringRule {
  pub max_len: usize,
  pub required: bool,
}

impl StringRule {
  pub const fn optional(max_len: usize) -> Self {
    Self { max_len, required: false }
  }

  pub const fn required(max_len: usize) -> Self {
    Self { max_len, required: true }
  }
}

/// Inclusive bounds, default and presence requirement for an integer parameter
#[derive(Debug, Clone, Copy)]
pub struct IntRule {
  pub min: i64,
  pub max: i64,
  pub default: Option<i64>,
  pub required: bool,
}

impl IntRule {
  pub const fn range(min: i64, max: i64) -> Self {
    Self { min, max, default: None, required: false }
  }

  pub const fn with_default(self, default: i64) -> Self {
    Self { default: Some(default), ..self }
  }

  pub const fn required(self) -> Self {
    Self { required: true, ..self }
  }
}

pub const SEARCH_QUERY: StringRule = StringRule::required(200);
pub const SEARCH_TERM: StringRule = StringRule::optional(200);
pub const SECTION: StringRule = StringRule::optional(100);
pub const MEMBER_NAME: StringRule = StringRule::optional(100);
pub const HOUSE_FILTER: StringRule = StringRule::optional(20);

pub const SKIP: IntRule = IntRule::range(0, 10_000).with_default(0);
pub const TAKE: IntRule = IntRule::range(1, 100).with_default(20);
pub const MEMBER_ID: IntRule = IntRule::range(1, 99_999);

fn is_absent(value: Option<&str>) -> bool {
  value.map_or(true, |v| v.trim().is_empty())
}

/// Trim a free-text parameter and enforce its length cap
pub fn validate_string(value: Option<&str>, rule: StringRule) -> Result<Option<String>, ValidationError> {
  let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
    if rule.required {
      return Err(ValidationError::new("Required parameter is missing"));
    }
    return Ok(None);
  };

  if value.chars().count() > rule.max_len {
    return Err(ValidationError::new(format!(
      "Value exceeds maximum length of {}",
      rule.max_len
    )));
  }

  Ok(Some(value.to_string()))
}

/// Parse a decimal integer and check it against the rule's bounds
pub fn validate_int(value: Option<&str>, rule: IntRule) -> Result<Option<i64>, ValidationError> {
  if is_absent(value) {
    if rule.required {
      return Err(ValidationError::new("Required parameter is missing"));
    }
    return Ok(rule.default);
  }

  let number: i64 = value
    .unwrap_or_default()
    .trim()
    .parse()
    .map_err(|_| ValidationError::new("Invalid integer value"))?;

  if number < rule.min || number > rule.max {
    return Err(ValidationError::new(format!(
      "Value must be between {} and {}",
      rule.min, rule.max
    )));
  }

  Ok(Some(number))
}

/// Validate a `YYYY-MM-DD` calendar date
pub fn validate_date(value: Option<&str>, required: bool) -> Result<Option<NaiveDate>, ValidationError> {
  let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
    if required {
      return Err(ValidationError::new("Required date parameter is missing"));
    }
    return Ok(None);
  };

  if !DATE_FORMAT.is_match(value) {
    return Err(ValidationError::new("Invalid date format. Use YYYY-MM-DD"));
  }

  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| ValidationError::new("Invalid date value"))
}

/// Case-normalize a house name; absent means `default`
pub fn validate_house(value: Option<&str>, default: House) -> Result<House, ValidationError> {
  let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
    return Ok(default);
  };

  match value.to_lowercase().as_str() {
    "commons" => Ok(House::Commons),
    "lords" => Ok(House::Lords),
    _ => Err(ValidationError::new("House must be 'Commons' or 'Lords'")),
  }
}

/// Member ids are required positive integers below 100000
pub fn validate_member_id(value: Option<&str>) -> Result<u32, ValidationError> {
  let id = validate_int(value, MEMBER_ID.required())?
    .ok_or_else(|| ValidationError::new("Required parameter is missing"))?;
  u32::try_from(id).map_err(|_| ValidationError::new("Invalid member id"))
}

/// Anything other than the literal `false` means current members only
pub fn validate_current_flag(value: Option<&str>) -> bool {
  value != Some("false")
}

/// Sort orders accepted by the Bills API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  DateUpdatedDescending,
  DateUpdatedAscending,
  TitleAscending,
  TitleDescending,
}

impl SortOrder {
  pub const ALL: [SortOrder; 4] = [
    SortOrder::DateUpdatedDescending,
    SortOrder::DateUpdatedAscending,
    SortOrder::TitleAscending,
    SortOrder::TitleDescending,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      SortOrder::DateUpdatedDescending => "DateUpdatedDescending",
      SortOrder::DateUpdatedAscending => "DateUpdatedAscending",
      SortOrder::TitleAscending => "TitleAscending",
      SortOrder::TitleDescending => "TitleDescending",
    }
  }

  /// Never fails: unrecognized values fall back to the default order
  pub fn from_param(value: Option<&str>) -> Self {
    let value = value.map(str::trim).unwrap_or_default();
    Self::ALL.into_iter().find(|order| order.as_str() == value).unwrap_or_default()
  }
}

impl fmt::Display for SortOrder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
