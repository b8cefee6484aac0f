//! Field rules for admin accounts created or changed from the CLI

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

const USERNAME_LENGTH: RangeInclusive<usize> = 3..=32;
const EMAIL_MAX_LENGTH: usize = 254;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]*$").expect("Failed to compile username regex")
    })
}

/// Check an admin login name
///
/// Logins compare usernames exactly, so a name that would only match after
/// trimming is refused here instead.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    if username.trim() != username {
        return Err("Username must not start or end with whitespace".to_string());
    }

    if !USERNAME_LENGTH.contains(&username.chars().count()) {
        return Err(format!(
            "Username must be {} to {} characters long",
            USERNAME_LENGTH.start(),
            USERNAME_LENGTH.end()
        ));
    }

    if !username_pattern().is_match(username) {
        return Err("Username must start with a letter and use only letters, numbers, \
                    dots, dashes and underscores"
            .to_string());
    }

    Ok(())
}

/// Check the contact address kept on an admin account
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > EMAIL_MAX_LENGTH {
        return Err(format!(
            "Email must be at most {} characters long",
            EMAIL_MAX_LENGTH
        ));
    }

    let well_formed = email.split_once('@').is_some_and(|(mailbox, domain)| {
        !mailbox.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !email.contains(char::is_whitespace)
    });

    if !well_formed {
        return Err(format!("'{}' is not a valid email address", email));
    }

    Ok(())
}

/// Validate a new admin password
///
/// Admin passwords need a letter and a digit; symbol and case rules are left
/// to the clinic's own policy.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("Password must contain at least one letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}
