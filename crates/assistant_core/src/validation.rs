//! Request field validation run before entity mutations.
//!
//! # Responsibility
//! - Normalize (trim) user input for titles, names and phone numbers.
//! - Report every failing rule with a user-facing message.
//!
//! # Invariants
//! - Entities perform no field validation; callers must pass input through
//!   this module first.
//! - Length limits count characters, not bytes.
//! - A missing name or phone skips the remaining checks for that field.
//! - Name rules are defined once and shared by contact create and edit.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("valid phone number regex"));
static ALPHABETIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid alphabetic regex"));

pub const DEFAULT_TITLE_MAX_CHARS: usize = 100;
pub const DEFAULT_NAME_MAX_CHARS: usize = 25;

/// Upper bounds applied to user-supplied text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub title_max_chars: usize,
    pub name_max_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            name_max_chars: DEFAULT_NAME_MAX_CHARS,
        }
    }
}

/// Which contact name field a name rule failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl Display for NameField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "First"),
            Self::Last => write!(f, "Last"),
        }
    }
}

/// One failed validation rule. `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ListTitleRequired,
    ListTitleTooLong { max: usize },
    ListTitleNotUnique,
    TodoTitleRequired,
    TodoTitleTooLong { max: usize },
    NameRequired(NameField),
    NameTooLong { field: NameField, max: usize },
    NameNotAlphabetic(NameField),
    PhoneNumberRequired,
    PhoneNumberInvalidFormat,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListTitleRequired => write!(f, "The list title is required."),
            Self::ListTitleTooLong { max } => {
                write!(f, "List title must be between 1 and {max} characters.")
            }
            Self::ListTitleNotUnique => write!(f, "List title must be unique."),
            Self::TodoTitleRequired => write!(f, "The todo title is required."),
            Self::TodoTitleTooLong { max } => {
                write!(f, "Todo title must be between 1 and {max} characters.")
            }
            Self::NameRequired(field) => write!(f, "{field} name is required."),
            Self::NameTooLong { field, max } => write!(
                f,
                "{field} name is too long. Maximum length is {max} characters."
            ),
            Self::NameNotAlphabetic(field) => write!(
                f,
                "{field} name contains invalid characters. The name must be alphabetic."
            ),
            Self::PhoneNumberRequired => write!(f, "Phone number is required."),
            Self::PhoneNumberInvalidFormat => {
                write!(f, "Invalid phone number format. Use ###-###-####.")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// Trimmed, validated contact fields ready for `Contact::new` / `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Validates a todo list title against length and uniqueness rules.
///
/// `existing_titles` are compared exactly (case-sensitive) with the trimmed
/// candidate. Returns the trimmed title.
pub fn validate_list_title<'a>(
    title: &str,
    existing_titles: impl IntoIterator<Item = &'a str>,
    limits: &ValidationLimits,
) -> ValidationResult<String> {
    let trimmed = title.trim();
    let mut errors = Vec::new();

    if trimmed.is_empty() {
        errors.push(ValidationError::ListTitleRequired);
    }
    if char_len(trimmed) > limits.title_max_chars {
        errors.push(ValidationError::ListTitleTooLong {
            max: limits.title_max_chars,
        });
    }
    if existing_titles.into_iter().any(|existing| existing == trimmed) {
        errors.push(ValidationError::ListTitleNotUnique);
    }

    finish(trimmed, errors)
}

/// Validates a todo title. Returns the trimmed title.
pub fn validate_todo_title(title: &str, limits: &ValidationLimits) -> ValidationResult<String> {
    let trimmed = title.trim();
    let mut errors = Vec::new();

    if trimmed.is_empty() {
        errors.push(ValidationError::TodoTitleRequired);
    }
    if char_len(trimmed) > limits.title_max_chars {
        errors.push(ValidationError::TodoTitleTooLong {
            max: limits.title_max_chars,
        });
    }

    finish(trimmed, errors)
}

/// Validates the three contact fields, in field order.
pub fn validate_contact(
    first_name: &str,
    last_name: &str,
    phone_number: &str,
    limits: &ValidationLimits,
) -> ValidationResult<ContactFields> {
    let mut errors = Vec::new();
    let first_name = check_name(first_name, NameField::First, limits, &mut errors);
    let last_name = check_name(last_name, NameField::Last, limits, &mut errors);
    let phone_number = check_phone_number(phone_number, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ContactFields {
        first_name,
        last_name,
        phone_number,
    })
}

fn check_name(
    value: &str,
    field: NameField,
    limits: &ValidationLimits,
    errors: &mut Vec<ValidationError>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::NameRequired(field));
        return String::new();
    }
    if char_len(trimmed) > limits.name_max_chars {
        errors.push(ValidationError::NameTooLong {
            field,
            max: limits.name_max_chars,
        });
    }
    if !ALPHABETIC_RE.is_match(trimmed) {
        errors.push(ValidationError::NameNotAlphabetic(field));
    }
    trimmed.to_string()
}

fn check_phone_number(value: &str, errors: &mut Vec<ValidationError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::PhoneNumberRequired);
        return String::new();
    }
    if !PHONE_NUMBER_RE.is_match(trimmed) {
        errors.push(ValidationError::PhoneNumberInvalidFormat);
    }
    trimmed.to_string()
}

fn finish(trimmed: &str, errors: Vec<ValidationError>) -> ValidationResult<String> {
    if errors.is_empty() {
        Ok(trimmed.to_string())
    } else {
        Err(errors)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
