//! Contact (demo request) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields supplied by a contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub role: Option<String>,
    pub student_count: Option<String>,
    pub message: Option<String>,
}

/// A stored contact submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub role: Option<String>,
    pub student_count: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Build the stored record from its payload and store-assigned fields
    pub fn new(id: i64, contact: NewContact, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            school: contact.school,
            role: contact.role,
            student_count: contact.student_count,
            message: contact.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let contact = ContactSubmission::new(
            7,
            NewContact {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@school.edu".to_string(),
                school: "Lincoln Elementary".to_string(),
                role: Some("teacher".to_string()),
                student_count: None,
                message: None,
            },
            Utc::now(),
        );

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["role"], "teacher");
        assert!(value["studentCount"].is_null());
        assert!(value["createdAt"].is_string());
        assert!(value.get("first_name").is_none());
    }
}
