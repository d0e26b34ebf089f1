//! Request payload validation
//!
//! The store trusts its input, so every shape check happens here before a
//! store call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use signup_core::{NewContact, NewNewsletterSubscription};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validation result
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: ValidationError) -> Self {
        self.push(error);
        self
    }

    pub fn push(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// One line per failing field, e.g. `email: Invalid email address`
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "Required".to_string(),
            code: "REQUIRED".to_string(),
        }
    }

    fn invalid_email(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "Invalid email address".to_string(),
            code: "INVALID_EMAIL".to_string(),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self {
            field: "body".to_string(),
            message: message.into(),
            code: "INVALID_BODY".to_string(),
        }
    }
}

/// Contact form body as received; every field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub school: Option<String>,
    pub role: Option<String>,
    pub student_count: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsletterRequest {
    pub email: Option<String>,
}

fn required(
    value: Option<String>,
    field: &str,
    result: &mut ValidationResult,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            result.push(ValidationError::required(field));
            None
        }
    }
}

fn email(value: Option<String>, field: &str, result: &mut ValidationResult) -> Option<String> {
    let value = required(value, field, result)?;
    if EMAIL_RE.is_match(&value) {
        Some(value)
    } else {
        result.push(ValidationError::invalid_email(field));
        None
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ContactRequest {
    pub fn validate(self) -> Result<NewContact, ValidationResult> {
        let mut result = ValidationResult::ok();

        let first_name = required(self.first_name, "firstName", &mut result);
        let last_name = required(self.last_name, "lastName", &mut result);
        let email = email(self.email, "email", &mut result);
        let school = required(self.school, "school", &mut result);

        match (first_name, last_name, email, school) {
            (Some(first_name), Some(last_name), Some(email), Some(school)) => Ok(NewContact {
                first_name,
                last_name,
                email,
                school,
                role: optional(self.role),
                student_count: optional(self.student_count),
                message: optional(self.message),
            }),
            _ => Err(result),
        }
    }
}

impl NewsletterRequest {
    pub fn validate(self) -> Result<NewNewsletterSubscription, ValidationResult> {
        let mut result = ValidationResult::ok();

        match email(self.email, "email", &mut result) {
            Some(email) => Ok(NewNewsletterSubscription { email }),
            None => Err(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_contact() -> ContactRequest {
        ContactRequest {
            first_name: Some(" Jane ".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@school.edu".to_string()),
            school: Some("Lincoln Elementary".to_string()),
            role: Some("".to_string()),
            student_count: Some("1-50".to_string()),
            message: None,
        }
    }

    #[test]
    fn test_valid_contact_is_normalized() {
        let contact = full_contact().validate().unwrap();

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.role, None);
        assert_eq!(contact.student_count.as_deref(), Some("1-50"));
        assert_eq!(contact.message, None);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let result = ContactRequest::default().validate().unwrap_err();

        assert!(!result.valid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "lastName", "email", "school"]);
        assert!(result.errors.iter().all(|e| e.code == "REQUIRED"));
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let mut request = full_contact();
        request.school = Some("   ".to_string());

        let result = request.validate().unwrap_err();
        assert_eq!(result.errors, vec![ValidationError::required("school")]);
        assert_eq!(result.message(), "school: Required");
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        for bad in ["jane", "jane@", "@school.edu", "jane@school", "ja ne@school.edu"] {
            let result = NewsletterRequest {
                email: Some(bad.to_string()),
            }
            .validate()
            .unwrap_err();
            assert_eq!(result.errors[0].code, "INVALID_EMAIL", "{}", bad);
        }
    }

    #[test]
    fn test_newsletter_email_is_trimmed() {
        let sub = NewsletterRequest {
            email: Some("  x@y.com ".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(sub.email, "x@y.com");
    }

    #[test]
    fn test_push_marks_result_invalid() {
        let mut result = ValidationResult::ok();
        assert!(result.valid);

        result.push(ValidationError::required("school"));
        let result = result.with_error(ValidationError::invalid_email("email"));

        assert!(!result.valid);
        assert_eq!(result.message(), "school: Required; email: Invalid email address");
    }
}
