//! Field validation shared by the request payloads

use regex::Regex;
use std::sync::OnceLock;

/// Require a non-blank value, reporting `field` by its JSON name
pub fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// Validate email
pub fn validate_email(field: &str, email: &str) -> Result<(), String> {
    require(field, email)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if email.len() > 254 || !regex.is_match(email.trim()) {
        return Err(format!("{} is not a valid email address", field));
    }

    Ok(())
}

/// Validate a phone number: up to 30 digits, spaces, `+`, `-`, `(`, `)` or `.`
///
/// Internal extensions are accepted, so there is no minimum length beyond one
/// digit.
pub fn validate_phone(field: &str, phone: &str) -> Result<(), String> {
    require(field, phone)?;

    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9+()\-. ]{1,30}$").expect("Failed to compile phone regex")
    });

    let phone = phone.trim();
    if !regex.is_match(phone) || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("{} is not a valid phone number", field));
    }

    Ok(())
}

/// Validate a URL slug: lowercase letters, digits and single dashes
pub fn validate_slug(field: &str, slug: &str) -> Result<(), String> {
    require(field, slug)?;

    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = SLUG_REGEX
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Failed to compile slug regex"));

    if !regex.is_match(slug) {
        return Err(format!(
            "{} may only contain lowercase letters, digits and dashes",
            field
        ));
    }

    Ok(())
}

/// Derive a slug from a title, e.g. "Teeth Whitening!" -> "teeth-whitening"
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
