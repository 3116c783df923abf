//! Entity lifecycle events.
//!
//! Provides the change notification type and the notifier the persistence
//! collaborator calls after each committed mutation. Handlers (cache
//! invalidation, and anything else interested in entity changes) register
//! with the notifier explicitly.

mod notification;
mod notifier;

pub use notification::*;
pub use notifier::*;
