//! Process-local store implementing both repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::entities::{ClickLog, NewClickLog, NewShortLink, ShortLink};
use crate::domain::repositories::{ClickLogRepository, LinkFilter, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_link_id: i64,
    next_log_id: i64,
    links: BTreeMap<i64, ShortLink>,
    /// Keyed by `(short_link_id, ip_address)`, mirroring the unique constraint.
    click_logs: BTreeMap<(i64, String), ClickLog>,
}

/// In-memory store for demos, local runs and tests.
///
/// A single mutex serializes every operation, which gives the same guarantees
/// as the PostgreSQL constraints: one click log per `(link, ip)`, atomic click
/// increments and cascading deletes. Data is lost when the process exits.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut tables = self.tables.lock().await;
        tables.next_link_id += 1;

        let link = ShortLink::new(
            tables.next_link_id,
            new_link.original_url,
            Utc::now(),
            new_link.expiration,
            new_link.password_hash,
        );
        tables.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        Ok(self.tables.lock().await.links.get(&id).cloned())
    }

    async fn register_click(&self, id: i64, at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        match tables.links.get_mut(&id) {
            Some(link) => {
                link.clicks += 1;
                link.last_clicked = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_password_hash(
        &self,
        id: i64,
        password_hash: Option<String>,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        match tables.links.get_mut(&id) {
            Some(link) => {
                link.password_hash = password_hash;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_clicked_between(
        &self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let tables = self.tables.lock().await;
        let count = tables
            .links
            .values()
            .filter_map(|link| link.last_clicked)
            .filter(|clicked| *clicked >= from && to.is_none_or(|to| *clicked < to))
            .count();

        Ok(count as i64)
    }

    async fn list(&self, filter: LinkFilter) -> Result<Vec<ShortLink>, AppError> {
        let tables = self.tables.lock().await;
        let needle = filter.search.map(|s| s.to_lowercase());

        let mut links: Vec<ShortLink> = tables
            .links
            .values()
            .filter(|link| {
                needle
                    .as_deref()
                    .is_none_or(|n| link.original_url.to_lowercase().contains(n))
            })
            .filter(|link| filter.created_since.is_none_or(|since| link.created_at >= since))
            .cloned()
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        links.truncate(filter.limit.max(0) as usize);

        Ok(links)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.links.remove(&id).is_none() {
            return Ok(false);
        }
        tables.click_logs.retain(|(link_id, _), _| *link_id != id);

        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl ClickLogRepository for InMemoryStore {
    async fn record_if_absent(&self, new_log: NewClickLog) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        if !tables.links.contains_key(&new_log.short_link_id) {
            return Err(AppError::bad_request(
                "Short link does not exist",
                json!({ "short_link_id": new_log.short_link_id }),
            ));
        }

        let key = (new_log.short_link_id, new_log.ip_address.clone());
        if tables.click_logs.contains_key(&key) {
            return Ok(false);
        }

        tables.next_log_id += 1;
        let log = ClickLog {
            id: tables.next_log_id,
            short_link_id: new_log.short_link_id,
            ip_address: new_log.ip_address,
            user_agent: new_log.user_agent,
            clicked_at: new_log.clicked_at,
        };
        tables.click_logs.insert(key, log);

        Ok(true)
    }

    async fn count_for_link(&self, short_link_id: i64) -> Result<i64, AppError> {
        let tables = self.tables.lock().await;
        let count = tables
            .click_logs
            .keys()
            .filter(|(link_id, _)| *link_id == short_link_id)
            .count();

        Ok(count as i64)
    }

    async fn list_for_link(
        &self,
        short_link_id: i64,
        limit: i64,
    ) -> Result<Vec<ClickLog>, AppError> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<ClickLog> = tables
            .click_logs
            .values()
            .filter(|log| log.short_link_id == short_link_id)
            .cloned()
            .collect();

        logs.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));
        logs.truncate(limit.max(0) as usize);

        Ok(logs)
    }
}
