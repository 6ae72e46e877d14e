//! Request validation for registration

use regex::Regex;
use std::sync::OnceLock;

use super::models::RegisterRequest;
use crate::common::{ValidationResult, Validator};

pub const MIN_PASSWORD_BYTES: usize = 6;
/// bcrypt ignores input past 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;
const MAX_EMAIL_LENGTH: usize = 254;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        let email = data.email.trim();

        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else {
            result.check(
                email.len() <= MAX_EMAIL_LENGTH && email_regex().is_match(email),
                "email",
                "Email address is not valid",
            );
        }

        let len = data.password.len();
        result.check(
            len >= MIN_PASSWORD_BYTES,
            "password",
            "Password must be at least 6 characters",
        );
        result.check(
            len <= MAX_PASSWORD_BYTES,
            "password",
            "Password must be at most 72 bytes",
        );

        result
    }
}
