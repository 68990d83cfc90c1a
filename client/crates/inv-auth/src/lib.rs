pub mod claims;
pub mod credential;
pub mod error;
pub mod identity_augmenter;
pub mod identity_store;
pub mod sign_out_listener;

pub use claims::Claims;
pub use credential::Credential;
pub use error::{AuthError, Result};
pub use identity_augmenter::IdentityAugmenter;
pub use identity_store::IdentityStore;
pub use sign_out_listener::SignOutListener;

#[cfg(test)]
mod tests;
