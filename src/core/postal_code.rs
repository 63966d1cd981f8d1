//! Validation and formatting of Japanese postal codes.
//!
//! Accepted canonical forms are `NNN-NNNN` and `NNNNNNN`.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static WITH_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{4}$").expect("static pattern"));
static WITHOUT_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7}$").expect("static pattern"));

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalCodeError {
    #[error("please enter a postal code")]
    Empty,

    #[error("digits and hyphen only")]
    InvalidCharacters,

    #[error("must be 7 digits, with or without one hyphen in the 3-4 position")]
    InvalidFormat,
}

/// `error` is present exactly when the code is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    error: Option<PostalCodeError>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self { error: None }
    }

    fn invalid(error: PostalCodeError) -> Self {
        Self { error: Some(error) }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<PostalCodeError> {
        self.error
    }

    pub fn into_result(self) -> Result<(), PostalCodeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// 依序檢查：空白、字元集、格式；第一個失敗的檢查決定錯誤
pub fn validate(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::invalid(PostalCodeError::Empty);
    }

    // 字元集與格式都檢查原始輸入，前後空白也算非法字元
    if !raw.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return ValidationResult::invalid(PostalCodeError::InvalidCharacters);
    }

    if !WITH_HYPHEN.is_match(raw) && !WITHOUT_HYPHEN.is_match(raw) {
        return ValidationResult::invalid(PostalCodeError::InvalidFormat);
    }

    ValidationResult::valid()
}

/// Removes every hyphen. Does not validate.
pub fn normalize(raw: &str) -> String {
    raw.replace('-', "")
}

/// Normalizes, then re-hyphenates 7-character results as `NNN-NNNN`.
/// Anything else comes back exactly as given.
pub fn format(raw: &str) -> String {
    if WITH_HYPHEN.is_match(raw) {
        return raw.to_string();
    }

    let normalized = normalize(raw);
    hyphenate(&normalized).unwrap_or_else(|| raw.to_string())
}

/// Display formatter for codes that are already canonical. Input that already
/// contains a hyphen is returned untouched without re-validation.
pub fn format_display(code: &str) -> String {
    if code.contains('-') {
        return code.to_string();
    }

    hyphenate(code).unwrap_or_else(|| code.to_string())
}

fn hyphenate(code: &str) -> Option<String> {
    if code.chars().count() != 7 {
        return None;
    }

    let split = code.char_indices().nth(3).map(|(i, _)| i)?;
    let (head, tail) = code.split_at(split);
    Some(format!("{}-{}", head, tail))
}
