//! # app-registry
//!
//! In-process application registry for a service monitoring dashboard.
//!
//! Remote services register with a health URL, optional management and
//! service URLs, and a display name. The registry validates each
//! registration, derives a stable id from the health URL so that
//! re-registering is an overwrite rather than a duplicate, stores the
//! record, and announces the change to observers.
//!
//! ## Architecture
//!
//! ```text
//! Callers (transport layer, startup seed)
//!     │
//!     ├── ApplicationRegistry (service/)
//!     │       ├── validate candidate
//!     │       ├── ApplicationIdGenerator (domain/)
//!     │       ├── ApplicationStore (domain/)
//!     │       └── EventPublisher / EventBus (domain/)
//!     │
//!     └── Observers (subscribe to the EventBus)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod seed;
pub mod service;
