use crate::Route;

/// Requests a navigation from whatever owns the router.
///
/// Implementations must not block; the request is fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
