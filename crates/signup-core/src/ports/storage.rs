//! Storage traits for submissions
//!
//! Both collections are append-only. Ids are assigned by the store, start at 1
//! and are never reused. Listings return owned snapshots in insertion order.

use crate::Result;
use async_trait::async_trait;
use signup_types::{ContactSubmission, NewContact, NewNewsletterSubscription, NewsletterSubscription};

/// Contact store
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a new contact. Contacts are never deduplicated.
    async fn create_contact(&self, contact: NewContact) -> Result<ContactSubmission>;
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>>;
}

/// Newsletter store
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Insert a subscription, or return the existing one for the same email
    /// unchanged. Lookup and insert are a single atomic step.
    async fn subscribe_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription>;
    async fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>>;
}

/// Everything the HTTP layer needs from a backend
pub trait SubmissionStore: ContactStore + NewsletterStore {}

impl<T: ContactStore + NewsletterStore> SubmissionStore for T {}
