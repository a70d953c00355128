//! Service layer: registry orchestration.
//!
//! [`ApplicationRegistry`] validates registrations, assigns ids through an
//! [`crate::domain::ApplicationIdGenerator`], writes them to an
//! [`crate::domain::ApplicationStore`], and emits events through an
//! [`crate::domain::EventPublisher`].

pub mod application_registry;

pub use application_registry::ApplicationRegistry;
