//! Controller stages.

use crate::DashboardSnapshot;
use storyboard_core::{Scene, StoryboardRequest, UserIdentity};

/// Where the user is, with exactly the data valid there.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineStage {
    /// Nobody signed in
    #[default]
    LoggedOut,
    /// Admin credential prompt
    AdminLogin,
    /// Admin activity overview
    AdminDashboard(DashboardSnapshot),
    /// Topic, dialogue and duration entry
    Input {
        /// Signed-in user
        identity: UserIdentity,
        /// Previous request to prefill the form with
        request: Option<StoryboardRequest>,
    },
    /// Draft call in flight
    GeneratingDraft {
        /// Signed-in user
        identity: UserIdentity,
        /// Request being drafted
        request: StoryboardRequest,
    },
    /// Editable draft
    DraftReview {
        /// Signed-in user
        identity: UserIdentity,
        /// Request the draft was written for
        request: StoryboardRequest,
        /// Current draft text
        draft: String,
    },
    /// Scene call in flight
    GeneratingScenes {
        /// Signed-in user
        identity: UserIdentity,
        /// Request the draft was written for
        request: StoryboardRequest,
        /// Draft being decomposed
        draft: String,
    },
    /// Finished storyboard
    Results {
        /// Signed-in user
        identity: UserIdentity,
        /// Request the storyboard was made for
        request: StoryboardRequest,
        /// Draft the scenes came from
        draft: String,
        /// Scene list, replaced wholesale on regeneration
        scenes: Vec<Scene>,
    },
}

/// Data-free stage discriminant, broadcast on every stage change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
)]
pub enum StageKind {
    /// See [`PipelineStage::LoggedOut`]
    #[default]
    LoggedOut,
    /// See [`PipelineStage::AdminLogin`]
    AdminLogin,
    /// See [`PipelineStage::AdminDashboard`]
    AdminDashboard,
    /// See [`PipelineStage::Input`]
    Input,
    /// See [`PipelineStage::GeneratingDraft`]
    GeneratingDraft,
    /// See [`PipelineStage::DraftReview`]
    DraftReview,
    /// See [`PipelineStage::GeneratingScenes`]
    GeneratingScenes,
    /// See [`PipelineStage::Results`]
    Results,
}

impl StageKind {
    /// True while a generation call is in flight.
    pub fn is_generating(&self) -> bool {
        matches!(self, StageKind::GeneratingDraft | StageKind::GeneratingScenes)
    }
}

impl PipelineStage {
    /// Discriminant of this stage.
    pub fn kind(&self) -> StageKind {
        match self {
            PipelineStage::LoggedOut => StageKind::LoggedOut,
            PipelineStage::AdminLogin => StageKind::AdminLogin,
            PipelineStage::AdminDashboard(_) => StageKind::AdminDashboard,
            PipelineStage::Input { .. } => StageKind::Input,
            PipelineStage::GeneratingDraft { .. } => StageKind::GeneratingDraft,
            PipelineStage::DraftReview { .. } => StageKind::DraftReview,
            PipelineStage::GeneratingScenes { .. } => StageKind::GeneratingScenes,
            PipelineStage::Results { .. } => StageKind::Results,
        }
    }

    /// Signed-in user, outside the logged-out and admin stages.
    pub fn identity(&self) -> Option<&UserIdentity> {
        match self {
            PipelineStage::Input { identity, .. }
            | PipelineStage::GeneratingDraft { identity, .. }
            | PipelineStage::DraftReview { identity, .. }
            | PipelineStage::GeneratingScenes { identity, .. }
            | PipelineStage::Results { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Current request, if one has been submitted.
    pub fn request(&self) -> Option<&StoryboardRequest> {
        match self {
            PipelineStage::Input { request, .. } => request.as_ref(),
            PipelineStage::GeneratingDraft { request, .. }
            | PipelineStage::DraftReview { request, .. }
            | PipelineStage::GeneratingScenes { request, .. }
            | PipelineStage::Results { request, .. } => Some(request),
            _ => None,
        }
    }

    /// Draft text, once one exists.
    pub fn draft(&self) -> Option<&str> {
        match self {
            PipelineStage::DraftReview { draft, .. }
            | PipelineStage::GeneratingScenes { draft, .. }
            | PipelineStage::Results { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Scene list, in the results stage.
    pub fn scenes(&self) -> Option<&[Scene]> {
        match self {
            PipelineStage::Results { scenes, .. } => Some(scenes),
            _ => None,
        }
    }

    /// Dashboard snapshot, in the admin dashboard stage.
    pub fn dashboard(&self) -> Option<&DashboardSnapshot> {
        match self {
            PipelineStage::AdminDashboard(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
