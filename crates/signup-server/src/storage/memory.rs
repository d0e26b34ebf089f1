//! In-memory submission store
//!
//! Each collection sits behind its own `RwLock`: writes to a collection are
//! serialized, reads clone a snapshot under the read guard.

use async_trait::async_trait;
use chrono::Utc;
use signup_core::{
    ContactStore, ContactSubmission, NewContact, NewNewsletterSubscription, NewsletterStore,
    NewsletterSubscription, Result,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

pub struct MemoryStore {
    contacts: RwLock<Contacts>,
    newsletters: RwLock<Newsletters>,
}

struct Contacts {
    records: Vec<ContactSubmission>,
    next_id: i64,
}

struct Newsletters {
    records: Vec<NewsletterSubscription>,
    /// email -> position in `records`
    by_email: HashMap<String, usize>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            contacts: RwLock::new(Contacts {
                records: Vec::new(),
                next_id: 1,
            }),
            newsletters: RwLock::new(Newsletters {
                records: Vec::new(),
                by_email: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create_contact(&self, contact: NewContact) -> Result<ContactSubmission> {
        let mut contacts = self.contacts.write().await;

        let id = contacts.next_id;
        contacts.next_id += 1;

        let record = ContactSubmission::new(id, contact, Utc::now());
        contacts.records.push(record.clone());
        debug!("Stored contact {} ({})", record.id, record.email);

        Ok(record)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>> {
        Ok(self.contacts.read().await.records.clone())
    }
}

#[async_trait]
impl NewsletterStore for MemoryStore {
    async fn subscribe_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription> {
        // Lookup and insert under one write guard
        let mut newsletters = self.newsletters.write().await;

        if let Some(&pos) = newsletters.by_email.get(&subscription.email) {
            debug!("Email {} already subscribed", subscription.email);
            return Ok(newsletters.records[pos].clone());
        }

        let id = newsletters.next_id;
        newsletters.next_id += 1;

        let record = NewsletterSubscription::new(id, subscription, Utc::now());
        let pos = newsletters.records.len();
        newsletters.records.push(record.clone());
        newsletters.by_email.insert(record.email.clone(), pos);
        debug!("Stored newsletter subscription {} ({})", record.id, record.email);

        Ok(record)
    }

    async fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>> {
        Ok(self.newsletters.read().await.records.clone())
    }
}
