//! The stage machine behind a storyboard session.

use crate::{
    ActivityStore, ClassifiedError, DashboardSnapshot, ErrorClassifier, PipelineStage, StageKind,
    StoryboardGenerator,
};
use std::sync::Arc;
use storyboard_core::{
    AdminConfig, ConsistencyMode, StoryboardConfig, StoryboardRequest, UserIdentity,
    decode_identity_token,
};
use storyboard_error::{PipelineError, PipelineErrorKind, StoryboardError, StoryboardResult};
use storyboard_interface::GenerationDriver;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Drives one user's session from sign-in to finished storyboard.
///
/// Every trigger is a method. Triggers that are not valid in the current
/// stage fail with `InvalidTransition` and leave the stage untouched. The
/// generation triggers take `&mut self` across the model call, so a single
/// controller never has two calls in flight. A failed call returns to the
/// last interactive stage with a classified error set.
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = PipelineController::new(generator, Arc::new(InMemoryActivityStore::new()));
/// let mut stages = controller.subscribe();
///
/// controller.login(UserIdentity::from_email("keeper@example.com"))?;
/// controller.submit_draft_request(StoryboardRequest::new("A lighthouse keeper", 1)?).await?;
/// controller.edit_draft("The keeper climbs the stairs at dusk.")?;
/// controller.submit_scene_request().await?;
/// assert_eq!(*stages.borrow_and_update(), StageKind::Results);
/// ```
pub struct PipelineController<D> {
    generator: StoryboardGenerator<D>,
    activity: Arc<dyn ActivityStore>,
    classifier: ErrorClassifier,
    admin: AdminConfig,
    stage: PipelineStage,
    error: Option<ClassifiedError>,
    stage_tx: watch::Sender<StageKind>,
}

impl<D: GenerationDriver> PipelineController<D> {
    /// Logged-out controller with the default classifier and no admin account.
    pub fn new(generator: StoryboardGenerator<D>, activity: Arc<dyn ActivityStore>) -> Self {
        let (stage_tx, _) = watch::channel(StageKind::LoggedOut);
        Self {
            generator,
            activity,
            classifier: ErrorClassifier::default(),
            admin: AdminConfig::default(),
            stage: PipelineStage::LoggedOut,
            error: None,
            stage_tx,
        }
    }

    /// Controller wired from configuration: generator settings, fallback
    /// message limit and admin credentials.
    pub fn from_config(
        driver: D,
        config: &StoryboardConfig,
        activity: Arc<dyn ActivityStore>,
    ) -> Self {
        Self::new(StoryboardGenerator::from_config(driver, config), activity)
            .with_classifier(ErrorClassifier::new(
                *config.pipeline().error_message_limit(),
            ))
            .with_admin(config.admin().clone())
    }

    /// Replace the error classifier.
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the admin dashboard credentials.
    pub fn with_admin(mut self, admin: AdminConfig) -> Self {
        self.admin = admin;
        self
    }

    /// Current stage.
    pub fn stage(&self) -> &PipelineStage {
        &self.stage
    }

    /// Current stage discriminant.
    pub fn stage_kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// Receiver that observes every stage change.
    pub fn subscribe(&self) -> watch::Receiver<StageKind> {
        self.stage_tx.subscribe()
    }

    /// Last classified failure, cleared when a new generation starts.
    pub fn error(&self) -> Option<&ClassifiedError> {
        self.error.as_ref()
    }

    /// The generator used for both calls.
    pub fn generator(&self) -> &StoryboardGenerator<D> {
        &self.generator
    }

    /// The injected activity store.
    pub fn activity(&self) -> &Arc<dyn ActivityStore> {
        &self.activity
    }

    /// Clear the error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn set_stage(&mut self, stage: PipelineStage) {
        let kind = stage.kind();
        debug!(stage = %kind, "Stage change");
        self.stage = stage;
        self.stage_tx.send_replace(kind);
    }

    #[track_caller]
    fn invalid(&self, trigger: &str) -> StoryboardError {
        warn!(trigger, stage = %self.stage.kind(), "Rejected trigger");
        PipelineError::new(PipelineErrorKind::InvalidTransition {
            trigger: trigger.to_string(),
            stage: self.stage.kind().to_string(),
        })
        .into()
    }

    fn fail(&mut self, error: StoryboardError) -> StoryboardError {
        let classified = self.classifier.classify(&error);
        warn!(category = %classified.category(), error = %error, "Step failed");
        self.error = Some(classified);
        error
    }

    /// Sign in with an already-verified identity.
    #[instrument(skip(self, identity), fields(email = %identity.email()))]
    pub fn login(&mut self, identity: UserIdentity) -> StoryboardResult<()> {
        if !matches!(self.stage, PipelineStage::LoggedOut) {
            return Err(self.invalid("log in"));
        }
        self.activity.record_login(&identity);
        self.error = None;
        info!("User signed in");
        self.set_stage(PipelineStage::Input {
            identity,
            request: None,
        });
        Ok(())
    }

    /// Sign in with an identity token. A bad token keeps the user logged out.
    #[instrument(skip(self, token))]
    pub fn login_with_token(&mut self, token: &str) -> StoryboardResult<()> {
        if !matches!(self.stage, PipelineStage::LoggedOut) {
            return Err(self.invalid("log in"));
        }
        match decode_identity_token(token) {
            Ok(identity) => self.login(identity),
            Err(e) => {
                let error = PipelineError::new(PipelineErrorKind::Login(e.message)).into();
                Err(self.fail(error))
            }
        }
    }

    /// Show the admin credential prompt.
    pub fn open_admin_login(&mut self) -> StoryboardResult<()> {
        if !matches!(self.stage, PipelineStage::LoggedOut) {
            return Err(self.invalid("open admin login"));
        }
        self.error = None;
        self.set_stage(PipelineStage::AdminLogin);
        Ok(())
    }

    /// Check admin credentials and open the dashboard.
    #[instrument(skip(self, password))]
    pub fn admin_login(&mut self, username: &str, password: &str) -> StoryboardResult<()> {
        if !matches!(self.stage, PipelineStage::AdminLogin) {
            return Err(self.invalid("log in as admin"));
        }
        if !self.admin.matches(username, password) {
            let error = PipelineError::new(PipelineErrorKind::AdminAuthentication).into();
            return Err(self.fail(error));
        }
        self.error = None;
        info!("Admin signed in");
        let snapshot = DashboardSnapshot::from_store(&*self.activity);
        self.set_stage(PipelineStage::AdminDashboard(snapshot));
        Ok(())
    }

    /// Re-read the activity store into the dashboard.
    pub fn refresh_dashboard(&mut self) -> StoryboardResult<()> {
        if !matches!(self.stage, PipelineStage::AdminDashboard(_)) {
            return Err(self.invalid("refresh dashboard"));
        }
        let snapshot = DashboardSnapshot::from_store(&*self.activity);
        self.set_stage(PipelineStage::AdminDashboard(snapshot));
        Ok(())
    }

    /// Leave the admin screens.
    pub fn admin_exit(&mut self) -> StoryboardResult<()> {
        if !matches!(
            self.stage,
            PipelineStage::AdminLogin | PipelineStage::AdminDashboard(_)
        ) {
            return Err(self.invalid("exit admin"));
        }
        self.error = None;
        self.set_stage(PipelineStage::LoggedOut);
        Ok(())
    }

    /// Generate a draft for `request` and move to draft review.
    ///
    /// On failure the controller returns to input with the request kept.
    #[instrument(skip(self, request), fields(minutes = *request.duration_minutes()))]
    pub async fn submit_draft_request(&mut self, request: StoryboardRequest) -> StoryboardResult<()> {
        let identity = match &self.stage {
            PipelineStage::Input { identity, .. } => identity.clone(),
            _ => return Err(self.invalid("submit draft request")),
        };

        self.error = None;
        self.set_stage(PipelineStage::GeneratingDraft {
            identity: identity.clone(),
            request: request.clone(),
        });

        let result = self
            .generator
            .request_draft(
                request.topic(),
                request.dialogue().as_deref(),
                *request.duration_minutes(),
            )
            .await;

        match result {
            Ok(draft) => {
                self.set_stage(PipelineStage::DraftReview {
                    identity,
                    request,
                    draft,
                });
                Ok(())
            }
            Err(e) => {
                self.set_stage(PipelineStage::Input {
                    identity,
                    request: Some(request),
                });
                Err(self.fail(e))
            }
        }
    }

    /// Replace the draft text.
    pub fn edit_draft(&mut self, text: impl Into<String>) -> StoryboardResult<()> {
        if let PipelineStage::DraftReview { draft, .. } = &mut self.stage {
            *draft = text.into();
            return Ok(());
        }
        Err(self.invalid("edit draft"))
    }

    /// Toggle the relaxed appearance mode for the scene call.
    pub fn set_allow_variations(&mut self, allow_variations: bool) -> StoryboardResult<()> {
        if let PipelineStage::DraftReview { request, .. } = &mut self.stage {
            *request = request
                .clone()
                .with_mode(ConsistencyMode::from_allow_variations(allow_variations));
            return Ok(());
        }
        Err(self.invalid("change consistency mode"))
    }

    /// Return from draft review to input, keeping the request.
    pub fn back_to_input(&mut self) -> StoryboardResult<()> {
        match std::mem::take(&mut self.stage) {
            PipelineStage::DraftReview {
                identity, request, ..
            } => {
                self.set_stage(PipelineStage::Input {
                    identity,
                    request: Some(request),
                });
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.invalid("go back to input"))
            }
        }
    }

    /// Decompose the current draft into scenes and show the results.
    ///
    /// On success the user's activity is updated. On failure the controller
    /// returns to draft review with the draft preserved.
    #[instrument(skip(self))]
    pub async fn submit_scene_request(&mut self) -> StoryboardResult<()> {
        let (identity, request, draft) = match &self.stage {
            PipelineStage::DraftReview {
                identity,
                request,
                draft,
            } => (identity.clone(), request.clone(), draft.clone()),
            _ => return Err(self.invalid("submit scene request")),
        };

        self.error = None;
        self.set_stage(PipelineStage::GeneratingScenes {
            identity: identity.clone(),
            request: request.clone(),
            draft: draft.clone(),
        });

        let result = self
            .generator
            .request_scenes(
                &draft,
                *request.duration_minutes(),
                request.mode().allows_variations(),
            )
            .await;

        match result {
            Ok(scenes) => {
                self.activity.record_generation(&identity, scenes.len());
                info!(scenes = scenes.len(), "Storyboard ready");
                self.set_stage(PipelineStage::Results {
                    identity,
                    request,
                    draft,
                    scenes,
                });
                Ok(())
            }
            Err(e) => {
                self.set_stage(PipelineStage::DraftReview {
                    identity,
                    request,
                    draft,
                });
                Err(self.fail(e))
            }
        }
    }

    /// Return from results to the draft for another scene pass.
    pub fn back_to_draft(&mut self) -> StoryboardResult<()> {
        match std::mem::take(&mut self.stage) {
            PipelineStage::Results {
                identity,
                request,
                draft,
                ..
            } => {
                self.set_stage(PipelineStage::DraftReview {
                    identity,
                    request,
                    draft,
                });
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.invalid("go back to draft"))
            }
        }
    }

    /// Start over from an empty input form. Callers confirm with the user first.
    pub fn new_story(&mut self) -> StoryboardResult<()> {
        match std::mem::take(&mut self.stage) {
            PipelineStage::Results { identity, .. } => {
                self.error = None;
                self.set_stage(PipelineStage::Input {
                    identity,
                    request: None,
                });
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.invalid("start a new story"))
            }
        }
    }

    /// Sign out from any stage, dropping all session state.
    pub fn logout(&mut self) {
        if let Some(identity) = self.stage.identity() {
            info!(email = %identity.email(), "User signed out");
        }
        self.error = None;
        self.set_stage(PipelineStage::LoggedOut);
    }
}
