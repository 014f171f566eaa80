//! Payload validation
//!
//! [`UserValidator`] checks create and update payloads field by field and
//! collects every violation before returning. It is built once at startup
//! and handed to whoever needs it; there is no global instance.

use crate::types::{CreateUser, NewUser, UpdateUser, UserPatch, UserStatus};
use regex::Regex;
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const UPDATE_AGE_MAX: i64 = 150;

/// E.164: optional leading country digit, then 7 to 14 digits
const E164_PATTERN: &str = r"^\+[1-9]?[0-9]{7,14}$";

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every violation found in one payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", self.summary())]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violations joined into one line, in field order
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// True if `field` has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Accumulates violations while a payload is checked
#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            reason: reason.into(),
        });
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { violations: self.0 })
        }
    }
}

/// Field-level constraints for user payloads
#[derive(Debug, Clone)]
pub struct UserValidator {
    phone: Regex,
}

impl UserValidator {
    /// Build a validator with its compiled patterns
    ///
    /// # Errors
    /// Returns an error if the phone pattern fails to compile
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            phone: Regex::new(E164_PATTERN)?,
        })
    }

    /// Validate a create payload; every field is mandatory
    ///
    /// A zero status is accepted here and resolved to `Active` when the
    /// entity is built.
    pub fn validate_create(&self, payload: &CreateUser) -> Result<NewUser, ValidationError> {
        let mut violations = Violations::default();

        required_name(&mut violations, "firstName", &payload.first_name);
        required_name(&mut violations, "lastName", &payload.last_name);

        if payload.email.is_empty() {
            violations.push("email", "is required");
        } else {
            check_email(&mut violations, &payload.email);
        }

        if payload.phone.is_empty() {
            violations.push("phone", "is required");
        } else {
            self.check_phone(&mut violations, &payload.phone);
        }

        if payload.age == 0 {
            violations.push("age", "is required");
        } else if payload.age < 0 {
            violations.push("age", "must be greater than 0");
        } else if i32::try_from(payload.age).is_err() {
            violations.push("age", format!("must be at most {}", i32::MAX));
        }

        let status = check_status(&mut violations, payload.status);

        violations.finish(NewUser {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            age: payload.age,
            status,
        })
    }

    /// Validate an update payload; empty or zero fields are skipped
    pub fn validate_update(&self, payload: &UpdateUser) -> Result<UserPatch, ValidationError> {
        let mut violations = Violations::default();

        if !payload.first_name.is_empty() {
            check_name(&mut violations, "firstName", &payload.first_name);
        }
        if !payload.last_name.is_empty() {
            check_name(&mut violations, "lastName", &payload.last_name);
        }
        if !payload.email.is_empty() {
            check_email(&mut violations, &payload.email);
        }
        if !payload.phone.is_empty() {
            self.check_phone(&mut violations, &payload.phone);
        }
        if !(0..=UPDATE_AGE_MAX).contains(&payload.age) {
            violations.push("age", format!("must be between 0 and {}", UPDATE_AGE_MAX));
        }

        let status = check_status(&mut violations, payload.status);

        violations.finish(UserPatch {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            age: payload.age,
            status,
        })
    }

    fn check_phone(&self, violations: &mut Violations, value: &str) {
        if !self.phone.is_match(value) {
            violations.push("phone", "must be a valid E.164 phone number");
        }
    }
}

fn required_name(violations: &mut Violations, field: &'static str, value: &str) {
    if value.is_empty() {
        violations.push(field, "is required");
    } else {
        check_name(violations, field, value);
    }
}

fn check_name(violations: &mut Violations, field: &'static str, value: &str) {
    let chars = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        violations.push(
            field,
            format!(
                "must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ),
        );
    }
}

fn check_email(violations: &mut Violations, value: &str) {
    if !value.validate_email() {
        violations.push("email", "must be a valid email address");
    }
}

fn check_status(violations: &mut Violations, code: i64) -> UserStatus {
    UserStatus::from_code(code).unwrap_or_else(|_| {
        violations.push("status", "must be 1 (active) or 2 (inactive)");
        UserStatus::Unspecified
    })
}
