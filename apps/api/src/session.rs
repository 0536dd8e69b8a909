//! Session cell: the observable "current user or none" value.
//!
//! Written only by the identity source (sign-in, sign-out, token refresh) and
//! read by every view. Injected where needed; there is no global instance.
//! Dropping a `SessionSubscription` unsubscribes it.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::auth::AuthUser;

#[derive(Clone)]
pub struct SessionCell {
    sender: Arc<watch::Sender<Option<AuthUser>>>,
}

impl SessionCell {
    /// A cell with nobody signed in.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.sender.borrow().clone()
    }

    /// Publishes a session change to every live subscriber.
    pub fn set(&self, user: Option<AuthUser>) {
        debug!(
            "Session changed: {}",
            user.as_ref().map(|u| u.uid.as_str()).unwrap_or("<signed out>")
        );
        self.sender.send_replace(user);
    }

    pub fn sign_in(&self, user: AuthUser) {
        self.set(Some(user));
    }

    pub fn sign_out(&self) {
        self.set(None);
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to session changes.
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<AuthUser>>,
}

impl SessionSubscription {
    /// The value as of this subscription's last observation.
    pub fn current(&self) -> Option<AuthUser> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next change and returns the new value.
    /// Returns `None` once the cell itself is gone.
    pub async fn changed(&mut self) -> Option<Option<AuthUser>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Explicit form of dropping the subscription.
    pub fn unsubscribe(self) {}
}
