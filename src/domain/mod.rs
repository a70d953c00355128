//! Domain layer: application records, identity, storage, and events.
//!
//! This module contains the registry's data model (candidates, stored
//! applications and their ids), the id generator, the concurrent
//! application store, and the event types and publisher used to announce
//! registry changes.

pub mod application;
pub mod application_id;
pub mod application_store;
pub mod event_bus;
pub mod id_generator;
pub mod registry_event;

pub use application::{Application, ApplicationCandidate};
pub use application_id::ApplicationId;
pub use application_store::{ApplicationStore, InMemoryApplicationStore};
pub use event_bus::{EventBus, EventPublisher};
pub use id_generator::{ApplicationIdGenerator, HashingUrlIdGenerator};
pub use registry_event::{RegistrationKind, RegistryEvent};
