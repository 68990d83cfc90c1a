use crate::{Navigator, Route};

use log::{debug, warn};
use tokio::sync::mpsc;

/// Channel-backed [`Navigator`]: the UI shell drains the receiver and applies
/// each route in order.
#[derive(Debug, Clone)]
pub struct NavigationQueue {
    sender: mpsc::UnboundedSender<Route>,
}

impl NavigationQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for NavigationQueue {
    fn navigate(&self, route: Route) {
        debug!("Navigation requested: {route}");
        if self.sender.send(route).is_err() {
            warn!("Navigation to {route} dropped: no router is listening");
        }
    }
}
