//! Gradus domain event infrastructure.
//!
//! The workflow layer publishes a [`DomainEvent`] after every committed
//! lifecycle mutation; external collaborators (notifiers, auditing)
//! subscribe rather than being called directly:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.

pub mod bus;
pub mod persistence;

pub use bus::{DomainEvent, EventBus};
pub use persistence::EventPersistence;
