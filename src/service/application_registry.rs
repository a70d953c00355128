//! Application registry: validates registrations, assigns ids, and emits events.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    Application, ApplicationCandidate, ApplicationId, ApplicationIdGenerator, ApplicationStore,
    EventPublisher, HashingUrlIdGenerator, InMemoryApplicationStore, RegistrationKind,
    RegistryEvent,
};
use crate::error::RegistryError;

/// Orchestration layer for all registry operations.
///
/// Holds no mutable state of its own: the [`ApplicationStore`] owns the
/// records, the [`ApplicationIdGenerator`] and [`EventPublisher`] are
/// immutable collaborators. Every mutation follows the pattern: validate
/// → derive id → write store → publish event → return record.
#[derive(Debug)]
pub struct ApplicationRegistry<S = InMemoryApplicationStore> {
    store: Arc<S>,
    id_generator: Arc<dyn ApplicationIdGenerator>,
    publisher: Arc<dyn EventPublisher>,
}

impl<S> Clone for ApplicationRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            id_generator: Arc::clone(&self.id_generator),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<S: ApplicationStore> ApplicationRegistry<S> {
    /// Creates a registry with explicit collaborators.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        id_generator: Arc<dyn ApplicationIdGenerator>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            id_generator,
            publisher,
        }
    }

    /// Creates a registry over `store` that derives ids by hashing the
    /// health URL.
    #[must_use]
    pub fn with_hashing_ids(store: Arc<S>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self::new(store, Arc::new(HashingUrlIdGenerator::new()), publisher)
    }

    /// Returns a reference to the inner store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validates and stores `candidate`, returning the stored record.
    ///
    /// Registering a health URL that is already known overwrites every
    /// field of the existing record and keeps its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if a required field is missing
    /// or a URL is malformed; the store is left untouched in that case.
    /// Returns [`RegistryError::InvalidInput`] if the id generator rejects
    /// a candidate that passed validation.
    pub async fn register(
        &self,
        candidate: ApplicationCandidate,
    ) -> Result<Application, RegistryError> {
        if let Err(err) = candidate.validate() {
            tracing::warn!(name = %candidate.name, error = %err, "registration rejected");
            return Err(err);
        }

        let id = self.id_generator.generate(&candidate).inspect_err(|err| {
            tracing::error!(error = %err, "id generator rejected a validated application");
        })?;

        let application = Application::from_candidate(id.clone(), candidate);
        let previous = self.store.put(id.clone(), application.clone()).await;

        let kind = if previous.is_some() {
            tracing::debug!(%id, name = application.name(), "application re-registered");
            RegistrationKind::Updated
        } else {
            tracing::info!(
                %id,
                name = application.name(),
                health_url = application.health_url(),
                "application registered"
            );
            RegistrationKind::Created
        };

        self.notify(RegistryEvent::Registered {
            application: application.clone(),
            kind,
            timestamp: Utc::now(),
        });

        Ok(application)
    }

    /// Registers each candidate in turn, collecting the per-candidate results.
    pub async fn register_all<I>(&self, candidates: I) -> Vec<Result<Application, RegistryError>>
    where
        I: IntoIterator<Item = ApplicationCandidate>,
    {
        let mut results = Vec::new();
        for candidate in candidates {
            results.push(self.register(candidate).await);
        }
        results
    }

    /// Returns the application registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if nothing is registered under `id`.
    pub async fn get_application(&self, id: &ApplicationId) -> Result<Application, RegistryError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Returns a snapshot of every registered application.
    pub async fn get_applications(&self) -> Vec<Application> {
        self.store.get_all().await
    }

    /// Returns every registered application named `name`; empty if none.
    pub async fn get_applications_by_name(&self, name: &str) -> Vec<Application> {
        self.store.get_by_name(name).await
    }

    /// Removes the application registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if nothing is registered under `id`.
    pub async fn unregister(&self, id: &ApplicationId) -> Result<Application, RegistryError> {
        let application = self
            .store
            .remove(id)
            .await
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        tracing::info!(%id, name = application.name(), "application unregistered");

        self.notify(RegistryEvent::Deregistered {
            application: application.clone(),
            timestamp: Utc::now(),
        });

        Ok(application)
    }

    /// Hands `event` to the publisher. Failures are logged and swallowed.
    fn notify(&self, event: RegistryEvent) {
        let event_type = event.event_type_str();
        let id = event.application_id().clone();
        match self.publisher.publish(event) {
            Ok(receivers) => {
                tracing::trace!(%id, event_type, receivers, "event published");
            }
            Err(err) => {
                tracing::warn!(%id, event_type, error = %err, "event publication failed");
            }
        }
    }
}
