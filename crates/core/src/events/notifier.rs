//! Lifecycle notifier and the handler trait.

use std::sync::Arc;

use log::debug;

use super::EntityChangeNotification;
use crate::errors::Result;

/// Trait for reacting to committed entity mutations.
///
/// # Design Rules
///
/// - `on_change()` runs on the committing thread, so it must be fast
///   (in-process work only, no network calls)
/// - An error returned here reaches the mutation's caller
/// - Handlers that must never fail the caller absorb their own errors
pub trait EntityChangeHandler: Send + Sync {
    /// Handle a single notification.
    fn on_change(&self, notification: &EntityChangeNotification) -> Result<()>;
}

/// Dispatches entity change notifications to registered handlers.
///
/// The persistence collaborator calls [`LifecycleNotifier::notify`] exactly
/// once per committed mutation, before reporting success to its own caller.
/// Dispatch is synchronous and follows registration order.
#[derive(Clone, Default)]
pub struct LifecycleNotifier {
    handlers: Vec<Arc<dyn EntityChangeHandler>>,
}

impl LifecycleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Handlers run in the order they were registered.
    pub fn register(&mut self, handler: Arc<dyn EntityChangeHandler>) {
        self.handlers.push(handler);
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_handler(mut self, handler: Arc<dyn EntityChangeHandler>) -> Self {
        self.register(handler);
        self
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch a notification to every handler.
    ///
    /// Handler errors are not caught: the first failure is returned and the
    /// remaining handlers are skipped.
    pub fn notify(&self, notification: EntityChangeNotification) -> Result<()> {
        debug!(
            "Dispatching {:?} on {} {} to {} handler(s)",
            notification.change_kind(),
            notification.entity_type(),
            notification.entity_id(),
            self.handlers.len()
        );

        for handler in &self.handlers {
            handler.on_change(&notification)?;
        }
        Ok(())
    }
}
