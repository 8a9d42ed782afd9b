//! Input validation utilities
//!
//! These mirror the native constraints of the registry form inputs:
//! `required` text fields and `type=url` for the website link.

use reqwest::Url;
use validator::ValidationError;

/// A required text input rejects empty and whitespace-only values
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a website link; an empty link is allowed since the field is optional
///
/// Any absolute URL is accepted, whatever its scheme, as a `type=url` input does.
pub fn validate_website_url(url: &str) -> bool {
    url.is_empty() || Url::parse(url).is_ok()
}

/// Validate an endpoint base URL used by the admin client
pub fn validate_endpoint_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// `validator` hook for required text fields
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// `validator` hook for the optional website link
pub fn website_url(value: &str) -> Result<(), ValidationError> {
    if validate_website_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}
