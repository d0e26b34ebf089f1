//! Newsletter subscription types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNewsletterSubscription {
    pub email: String,
}

/// A stored newsletter subscription. `email` is unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl NewsletterSubscription {
    pub fn new(id: i64, subscription: NewNewsletterSubscription, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: subscription.email,
            created_at,
        }
    }
}
