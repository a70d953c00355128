//! Concurrent application storage with per-entry locking.
//!
//! [`ApplicationStore`] is the seam the registry writes through.
//! [`InMemoryApplicationStore`] keeps every record in a `HashMap` whose
//! entries are individually protected by a [`tokio::sync::RwLock`], so an
//! overwrite of one application never serializes reads or writes of
//! another.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Application, ApplicationId};

/// Keyed container of registered applications.
///
/// All methods are safe to call concurrently. For a single id, readers
/// observe either the record before or after a `put`, never a mix.
pub trait ApplicationStore: Send + Sync + std::fmt::Debug {
    /// Inserts or overwrites the record for `id`, returning the previous one.
    fn put(
        &self,
        id: ApplicationId,
        application: Application,
    ) -> impl Future<Output = Option<Application>> + Send;

    /// Returns the record for `id`, if any.
    fn get(&self, id: &ApplicationId) -> impl Future<Output = Option<Application>> + Send;

    /// Returns a snapshot of every record.
    fn get_all(&self) -> impl Future<Output = Vec<Application>> + Send;

    /// Returns every record whose name equals `name` exactly.
    fn get_by_name(&self, name: &str) -> impl Future<Output = Vec<Application>> + Send;

    /// Removes and returns the record for `id`, if any.
    fn remove(&self, id: &ApplicationId) -> impl Future<Output = Option<Application>> + Send;

    /// Returns the number of stored records.
    fn len(&self) -> impl Future<Output = usize> + Send;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> impl Future<Output = bool> + Send {
        async move { self.len().await == 0 }
    }
}

/// Process-lifetime store backed by a map of per-entry locks.
///
/// # Concurrency
///
/// - Overwriting an existing id takes the outer read lock and that
///   entry's write lock only.
/// - Inserting a new id or removing one takes the outer write lock.
/// - Reads clone the record under the entry's read lock.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    applications: RwLock<HashMap<ApplicationId, Arc<RwLock<Application>>>>,
}

impl InMemoryApplicationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_where<F>(&self, predicate: F) -> Vec<Application>
    where
        F: Fn(&Application) -> bool,
    {
        let map = self.applications.read().await;
        let mut out = Vec::with_capacity(map.len());
        for slot in map.values() {
            let guard = slot.read().await;
            let application: &Application = &guard;
            if predicate(application) {
                out.push(application.clone());
            }
        }
        out
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    async fn put(&self, id: ApplicationId, application: Application) -> Option<Application> {
        {
            let map = self.applications.read().await;
            if let Some(slot) = map.get(&id) {
                let mut current = slot.write().await;
                return Some(std::mem::replace(&mut *current, application));
            }
        }

        // Another writer may have inserted the id between the two locks.
        let mut map = self.applications.write().await;
        match map.entry(id) {
            Entry::Occupied(slot) => {
                let mut current = slot.get().write().await;
                Some(std::mem::replace(&mut *current, application))
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(application)));
                None
            }
        }
    }

    async fn get(&self, id: &ApplicationId) -> Option<Application> {
        let slot = self.applications.read().await.get(id).cloned()?;
        let application = slot.read().await;
        Some(application.clone())
    }

    async fn get_all(&self) -> Vec<Application> {
        self.collect_where(|_| true).await
    }

    async fn get_by_name(&self, name: &str) -> Vec<Application> {
        self.collect_where(|application| application.name() == name)
            .await
    }

    async fn remove(&self, id: &ApplicationId) -> Option<Application> {
        let slot = self.applications.write().await.remove(id)?;
        let application = slot.read().await;
        Some(application.clone())
    }

    async fn len(&self) -> usize {
        self.applications.read().await.len()
    }
}
