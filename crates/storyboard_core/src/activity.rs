//! Per-user activity records.

use crate::UserIdentity;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Usage counters for one signed-in user.
///
/// # Examples
///
/// ```
/// use storyboard_core::{UserActivity, UserIdentity};
///
/// let mut activity = UserActivity::new(&UserIdentity::from_email("a@b.io"));
/// activity.record_generation(6, chrono::Utc::now());
/// assert_eq!(*activity.generations(), 1);
/// assert_eq!(*activity.scenes(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct UserActivity {
    /// Account email
    email: String,
    /// Display name at last sign-in
    name: String,
    /// Completed storyboards
    generations: u64,
    /// Scenes across all completed storyboards
    scenes: u64,
    /// Most recent sign-in or generation
    last_active: Option<DateTime<Utc>>,
}

impl UserActivity {
    /// Empty record for a user.
    pub fn new(identity: &UserIdentity) -> Self {
        Self {
            email: identity.email().clone(),
            name: identity.name().clone(),
            generations: 0,
            scenes: 0,
            last_active: None,
        }
    }

    /// Marks a sign-in, refreshing the display name.
    pub fn record_login(&mut self, identity: &UserIdentity, at: DateTime<Utc>) {
        self.name = identity.name().clone();
        self.last_active = Some(at);
    }

    /// Counts one completed storyboard of `scene_count` scenes.
    pub fn record_generation(&mut self, scene_count: usize, at: DateTime<Utc>) {
        self.generations += 1;
        self.scenes += scene_count as u64;
        self.last_active = Some(at);
    }
}
