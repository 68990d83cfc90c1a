//! Tenant context: which company the signed-in user is operating in, how that
//! choice is resolved on route entry, and how it reaches outbound requests.

pub mod context_change_notifier;
pub mod error;
pub mod route_guard;
pub mod tenant_augmenter;
pub mod tenant_context_store;

pub use context_change_notifier::{
    ContextChangeEvent, ContextChangeNotifier, ContextListener, ContextSubscription, ListenerId,
};
pub use error::{Result, TenantError};
pub use route_guard::{GuardDecision, GuardOutcome, GuardState, GuardStep, RouteEntryGuard};
pub use tenant_augmenter::TenantAugmenter;
pub use tenant_context_store::TenantContextStore;

#[cfg(test)]
mod tests;
