//! Per-user activity tracking.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use storyboard_core::{UserActivity, UserIdentity};
use tracing::debug;

/// Store of per-user activity counters.
///
/// Injected into the controller so that tests and front ends can supply
/// their own backing storage.
pub trait ActivityStore: Send + Sync {
    /// Record a sign-in, creating the user's record if needed.
    fn record_login(&self, identity: &UserIdentity);

    /// Count one completed storyboard of `scene_count` scenes.
    fn record_generation(&self, identity: &UserIdentity, scene_count: usize);

    /// Activity for one email, if the user has ever signed in or generated.
    fn activity(&self, email: &str) -> Option<UserActivity>;

    /// Every known user's activity, in no particular order.
    fn all(&self) -> Vec<UserActivity>;
}

/// Process-local [`ActivityStore`]. Last writer wins.
///
/// # Examples
///
/// ```
/// use storyboard_core::UserIdentity;
/// use storyboard_pipeline::{ActivityStore, InMemoryActivityStore};
///
/// let store = InMemoryActivityStore::new();
/// let user = UserIdentity::from_email("keeper@example.com");
/// store.record_login(&user);
/// store.record_generation(&user, 6);
///
/// let activity = store.activity("keeper@example.com").unwrap();
/// assert_eq!(*activity.generations(), 1);
/// assert_eq!(*activity.scenes(), 6);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    users: Mutex<HashMap<String, UserActivity>>,
}

impl InMemoryActivityStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, identity: &UserIdentity, apply: impl FnOnce(&mut UserActivity)) {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = users
            .entry(identity.email().clone())
            .or_insert_with(|| UserActivity::new(identity));
        apply(entry);
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn record_login(&self, identity: &UserIdentity) {
        debug!(email = %identity.email(), "Recording login");
        self.update(identity, |activity| {
            activity.record_login(identity, Utc::now())
        });
    }

    fn record_generation(&self, identity: &UserIdentity, scene_count: usize) {
        debug!(email = %identity.email(), scene_count, "Recording generation");
        self.update(identity, |activity| {
            activity.record_generation(scene_count, Utc::now())
        });
    }

    fn activity(&self, email: &str) -> Option<UserActivity> {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    fn all(&self) -> Vec<UserActivity> {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_refreshes_name_without_counting() {
        let store = InMemoryActivityStore::new();
        store.record_login(&UserIdentity::from_email("a@b.io"));
        let renamed = UserIdentity::builder()
            .email("a@b.io")
            .name("Ada")
            .build()
            .unwrap();
        store.record_login(&renamed);

        let activity = store.activity("a@b.io").unwrap();
        assert_eq!(activity.name(), "Ada");
        assert_eq!(*activity.generations(), 0);
        assert!(activity.last_active().is_some());
    }

    #[test]
    fn generation_without_login_creates_record() {
        let store = InMemoryActivityStore::new();
        store.record_generation(&UserIdentity::from_email("x@y.io"), 12);
        assert_eq!(store.all().len(), 1);
        assert_eq!(*store.activity("x@y.io").unwrap().scenes(), 12);
    }

    #[test]
    fn unknown_user_has_no_activity() {
        assert!(InMemoryActivityStore::new().activity("ghost@nowhere").is_none());
    }
}
