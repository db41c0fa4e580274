use dashmap::{mapref::entry::Entry, DashMap};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::{error::FetchError, models::MetadataRecord, services::providers::MetadataProvider};

/// State of a cached title. A title with no entry has never been requested.
#[derive(Debug, Clone)]
enum CacheEntry {
    /// A fetch has been claimed; the receiver yields its result
    InFlight(watch::Receiver<Option<MetadataRecord>>),
    Resolved(MetadataRecord),
}

enum Lookup {
    Hit(MetadataRecord),
    Wait(watch::Receiver<Option<MetadataRecord>>),
    Claimed(watch::Sender<Option<MetadataRecord>>),
}

/// Cache key for a title: trimmed and case-folded
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Memoizing wrapper around a [`MetadataProvider`]
///
/// Each normalized title is fetched at most once for the lifetime of the
/// cache. Concurrent callers for a title that is being fetched wait for that
/// fetch instead of starting their own; unrelated titles never block each
/// other. Failures and timeouts resolve to [`MetadataRecord::placeholder`]
/// and are cached like any other result.
///
/// Cloning is cheap and every clone shares the same entries.
#[derive(Clone)]
pub struct MetadataCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    provider: Arc<dyn MetadataProvider>,
    timeout: Duration,
}

impl MetadataCache {
    /// Creates an empty cache; each remote fetch is bounded by `timeout`
    pub fn new(provider: Arc<dyn MetadataProvider>, timeout: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            provider,
            timeout,
        }
    }

    /// Returns metadata for `title`, fetching it on first use
    ///
    /// Never fails: remote errors surface as the placeholder record.
    pub async fn get(&self, title: &str) -> MetadataRecord {
        let key = normalize_title(title);

        // The shard lock is held only for this statement, which makes the
        // absent -> in-flight transition atomic per key.
        let lookup = match self.entries.entry(key.clone()) {
            Entry::Occupied(entry) => match entry.get() {
                CacheEntry::Resolved(record) => Lookup::Hit(record.clone()),
                CacheEntry::InFlight(rx) => Lookup::Wait(rx.clone()),
            },
            Entry::Vacant(entry) => {
                let (tx, rx) = watch::channel(None);
                entry.insert(CacheEntry::InFlight(rx));
                Lookup::Claimed(tx)
            }
        };

        match lookup {
            Lookup::Hit(record) => {
                tracing::debug!(title = %key, "Metadata cache hit");
                record
            }
            Lookup::Wait(rx) => {
                tracing::debug!(title = %key, "Metadata fetch in flight, waiting");
                Self::wait(rx, &key).await
            }
            Lookup::Claimed(tx) => {
                tracing::debug!(title = %key, "Metadata cache miss");
                let rx = tx.subscribe();

                // Resolution runs detached so a cancelled caller cannot strand
                // the key in flight.
                let cache = self.clone();
                let query = title.trim().to_string();
                tokio::spawn(cache.resolve(key.clone(), query, tx));

                Self::wait(rx, &key).await
            }
        }
    }

    /// Fetches every title concurrently, returning records in input order
    pub async fn get_many(&self, titles: &[String]) -> Vec<MetadataRecord> {
        let mut tasks = Vec::with_capacity(titles.len());

        for title in titles {
            let cache = self.clone();
            let title = title.clone();
            tasks.push(tokio::spawn(async move { cache.get(&title).await }));
        }

        let mut records = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::error!(error = %e, "Metadata task join error");
                    records.push(MetadataRecord::placeholder());
                }
            }
        }

        records
    }

    /// Returns the resolved record for `title` without fetching
    pub fn peek(&self, title: &str) -> Option<MetadataRecord> {
        match self.entries.get(&normalize_title(title))?.value() {
            CacheEntry::Resolved(record) => Some(record.clone()),
            CacheEntry::InFlight(_) => None,
        }
    }

    /// Number of titles that have been requested, resolved or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    async fn resolve(
        self,
        key: String,
        title: String,
        tx: watch::Sender<Option<MetadataRecord>>,
    ) {
        let outcome = match tokio::time::timeout(self.timeout, self.provider.fetch(&title)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        };

        let record = match outcome {
            Ok(metadata) => {
                tracing::info!(
                    title = %key,
                    provider = self.provider.name(),
                    "Metadata cached"
                );
                MetadataRecord::Remote(metadata)
            }
            Err(e) => {
                tracing::warn!(
                    title = %key,
                    provider = self.provider.name(),
                    error = %e,
                    "Metadata fetch failed, caching placeholder"
                );
                MetadataRecord::placeholder()
            }
        };

        self.entries.insert(key, CacheEntry::Resolved(record.clone()));
        tx.send_replace(Some(record));
    }

    async fn wait(mut rx: watch::Receiver<Option<MetadataRecord>>, key: &str) -> MetadataRecord {
        let resolved = rx
            .wait_for(|value| value.is_some())
            .await
            .map(|value| (*value).clone());

        match resolved {
            Ok(Some(record)) => record,
            Ok(None) | Err(_) => {
                tracing::error!(title = %key, "Metadata fetch ended without a result");
                MetadataRecord::placeholder()
            }
        }
    }
}
