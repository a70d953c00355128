//! Domain events reflecting registry mutations.
//!
//! Every successful `register` or `unregister` emits a [`RegistryEvent`]
//! through an [`super::EventPublisher`]. Observers such as a UI push
//! channel or a health-check scheduler consume them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Application, ApplicationId};

/// Whether a registration created a new record or overwrote one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationKind {
    /// No record existed for the id.
    Created,
    /// A record with the same id was replaced.
    Updated,
}

/// Domain event emitted after every store mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// Emitted after an application is stored.
    Registered {
        /// The record as stored.
        application: Application,
        /// New id or overwrite.
        kind: RegistrationKind,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an application is removed.
    Deregistered {
        /// The record that was removed.
        application: Application,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// Returns the application carried by this event.
    #[must_use]
    pub fn application(&self) -> &Application {
        match self {
            Self::Registered { application, .. } | Self::Deregistered { application, .. } => {
                application
            }
        }
    }

    /// Returns the id of the application carried by this event.
    #[must_use]
    pub fn application_id(&self) -> &ApplicationId {
        self.application().id()
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::Deregistered { .. } => "deregistered",
        }
    }
}
