//! SQLite submission store (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signup_core::{
    ContactStore, ContactSubmission, NewContact, NewNewsletterSubscription, NewsletterStore,
    NewsletterSubscription, SignupError,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    pub async fn open(database_path: &str) -> Result<Self> {
        info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::create_tables(&pool)
            .await
            .context("Failed to create submission tables")?;

        info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn create_tables(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids from ever being reused
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                school TEXT NOT NULL,
                role TEXT,
                student_count TEXT,
                message TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS newsletters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn unavailable(e: sqlx::Error) -> SignupError {
    error!("SQLite error: {}", e);
    SignupError::StorageUnavailable(e.to_string())
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn create_contact(&self, contact: NewContact) -> signup_core::Result<ContactSubmission> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO contacts (first_name, last_name, email, school, role, student_count, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.school)
        .bind(&contact.role)
        .bind(&contact.student_count)
        .bind(&contact.message)
        .bind(created_at)
        .execute(&*self.pool)
        .await
        .map_err(unavailable)?;

        let id = result.last_insert_rowid();
        debug!("Stored contact {} ({})", id, contact.email);

        Ok(ContactSubmission::new(id, contact, created_at))
    }

    async fn list_contacts(&self) -> signup_core::Result<Vec<ContactSubmission>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, school, role,
                   student_count, message, created_at
            FROM contacts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[async_trait]
impl NewsletterStore for SqliteStore {
    async fn subscribe_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> signup_core::Result<NewsletterSubscription> {
        // The unique constraint picks the winner; losers read the winner's row
        let result = sqlx::query(
            r#"
            INSERT INTO newsletters (email, created_at)
            VALUES (?1, ?2)
            ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(&subscription.email)
        .bind(Utc::now())
        .execute(&*self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            debug!("Email {} already subscribed", subscription.email);
        }

        let row: NewsletterRow = sqlx::query_as(
            r#"
            SELECT id, email, created_at FROM newsletters WHERE email = ?1
            "#,
        )
        .bind(&subscription.email)
        .fetch_one(&*self.pool)
        .await
        .map_err(unavailable)?;

        Ok(row.into())
    }

    async fn list_newsletter_subscriptions(
        &self,
    ) -> signup_core::Result<Vec<NewsletterSubscription>> {
        let rows: Vec<NewsletterRow> = sqlx::query_as(
            r#"
            SELECT id, email, created_at FROM newsletters ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    school: String,
    role: Option<String>,
    student_count: Option<String>,
    message: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactSubmission {
    fn from(r: ContactRow) -> Self {
        ContactSubmission {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            school: r.school,
            role: r.role,
            student_count: r.student_count,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NewsletterRow {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<NewsletterRow> for NewsletterSubscription {
    fn from(r: NewsletterRow) -> Self {
        NewsletterSubscription {
            id: r.id,
            email: r.email,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    async fn temp_store() -> (SqliteStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("signup.db");
        let store = SqliteStore::open(path.to_str().unwrap()).await.unwrap();
        (store, dir)
    }

    fn contact(first_name: &str) -> NewContact {
        NewContact {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: "jane@school.edu".to_string(),
            school: "Lincoln Elementary".to_string(),
            role: Some("principal".to_string()),
            student_count: Some("51-200".to_string()),
            message: None,
        }
    }

    fn email(addr: &str) -> NewNewsletterSubscription {
        NewNewsletterSubscription {
            email: addr.to_string(),
        }
    }

    #[tokio::test]
    async fn test_contacts_roundtrip_in_insertion_order() {
        let (store, _dir) = temp_store().await;

        assert!(store.list_contacts().await.unwrap().is_empty());

        let first = store.create_contact(contact("Jane")).await.unwrap();
        let second = store.create_contact(contact("Jane")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let listed = store.list_contacts().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(listed[0].role.as_deref(), Some("principal"));
        assert_eq!(listed[0].message, None);
    }

    #[tokio::test]
    async fn test_subscribe_returns_existing_record() {
        let (store, _dir) = temp_store().await;

        let first = store.subscribe_newsletter(email("x@y.com")).await.unwrap();
        let second = store.subscribe_newsletter(email("x@y.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(store.list_newsletter_subscriptions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let (store, _dir) = temp_store().await;

        let lower = store.subscribe_newsletter(email("a@x.com")).await.unwrap();
        let upper = store.subscribe_newsletter(email("A@x.com")).await.unwrap();
        let again = store.subscribe_newsletter(email("a@x.com")).await.unwrap();

        assert_ne!(lower.id, upper.id);
        assert_eq!(again.id, lower.id);
        assert_eq!(upper.email, "A@x.com");
        assert_eq!(store.list_newsletter_subscriptions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let (store, _dir) = temp_store().await;

        assert!(store.list_newsletter_subscriptions().await.unwrap().is_empty());

        store.create_contact(contact("Jane")).await.unwrap();
        store.create_contact(contact("Jane")).await.unwrap();
        let sub = store.subscribe_newsletter(email("jane@school.edu")).await.unwrap();

        // independent id counters
        assert_eq!(sub.id, 1);
        assert_eq!(store.list_contacts().await.unwrap().len(), 2);
        assert_eq!(store.list_newsletter_subscriptions().await.unwrap(), vec![sub]);
    }

    #[tokio::test]
    async fn test_listing_is_a_snapshot() {
        let (store, _dir) = temp_store().await;

        let created = store.create_contact(contact("Jane")).await.unwrap();
        let snapshot = store.list_contacts().await.unwrap();
        store.create_contact(contact("John")).await.unwrap();

        assert_eq!(snapshot, vec![created]);
        assert_eq!(store.list_contacts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signup.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::open(path).await.unwrap();
            store.create_contact(contact("Jane")).await.unwrap();
            store.subscribe_newsletter(email("x@y.com")).await.unwrap();
        }

        let store = tokio_test::assert_ok!(SqliteStore::open(path).await);
        let again = store.subscribe_newsletter(email("x@y.com")).await.unwrap();
        let next = store.create_contact(contact("John")).await.unwrap();

        assert_eq!(again.id, 1);
        assert_eq!(next.id, 2);
        assert_eq!(store.list_newsletter_subscriptions().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_subscribe_inserts_once() {
        let (store, _dir) = temp_store().await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.subscribe_newsletter(email("race@x.com")).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().unwrap().id);
        }

        assert_eq!(ids.len(), 1);
        assert_eq!(store.list_newsletter_subscriptions().await.unwrap().len(), 1);
    }
}
