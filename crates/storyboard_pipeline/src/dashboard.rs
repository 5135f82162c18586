//! Admin dashboard view over an activity store.

use crate::ActivityStore;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_core::UserActivity;

/// Point-in-time totals for the admin dashboard.
///
/// # Examples
///
/// ```
/// use storyboard_core::UserIdentity;
/// use storyboard_pipeline::{ActivityStore, DashboardSnapshot, InMemoryActivityStore};
///
/// let store = InMemoryActivityStore::new();
/// store.record_generation(&UserIdentity::from_email("b@x.io"), 6);
/// store.record_generation(&UserIdentity::from_email("a@x.io"), 12);
///
/// let snapshot = DashboardSnapshot::from_store(&store);
/// assert_eq!(*snapshot.total_users(), 2);
/// assert_eq!(*snapshot.total_scenes(), 18);
/// assert_eq!(snapshot.users()[0].email(), "a@x.io");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct DashboardSnapshot {
    /// User rows sorted by email
    users: Vec<UserActivity>,
    /// Number of known users
    total_users: usize,
    /// Completed storyboards across all users
    total_generations: u64,
    /// Scenes across all users
    total_scenes: u64,
}

impl DashboardSnapshot {
    /// Snapshot of everything currently in `store`.
    pub fn from_store(store: &(impl ActivityStore + ?Sized)) -> Self {
        Self::from_activity(store.all())
    }

    /// Snapshot of an explicit set of activity records.
    pub fn from_activity(mut users: Vec<UserActivity>) -> Self {
        users.sort_by(|a, b| a.email().cmp(b.email()));
        let total_generations = users.iter().map(|u| *u.generations()).sum();
        let total_scenes = users.iter().map(|u| *u.scenes()).sum();
        Self {
            total_users: users.len(),
            users,
            total_generations,
            total_scenes,
        }
    }
}
