/// Notified synchronously by [`crate::IdentityStore::logout`] after the
/// credential is cleared and before navigation to sign-in is requested.
pub trait SignOutListener: Send + Sync {
    fn on_signed_out(&self);
}
