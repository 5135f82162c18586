//! Tests for the pipeline stage machine.

mod test_utils;

use std::sync::Arc;
use storyboard_core::{AdminConfig, StoryboardRequest, UserIdentity};
use storyboard_error::{GenerationErrorKind, PipelineErrorKind, StoryboardErrorKind};
use storyboard_pipeline::{
    ActivityStore, ErrorCategory, InMemoryActivityStore, PipelineController, PipelineStage,
    StageKind, StoryboardGenerator,
};
use test_utils::{MockDriver, MockResponse, scene_list_json};

const KEEPER: &str = "Elderly man, grey beard, yellow oilskin coat";
const TOPIC: &str = "A lighthouse keeper finds a message in a bottle";

fn controller_with(
    responses: Vec<MockResponse>,
) -> (
    PipelineController<Arc<MockDriver>>,
    Arc<MockDriver>,
    Arc<InMemoryActivityStore>,
) {
    let driver = Arc::new(MockDriver::new_sequence(responses));
    let store = Arc::new(InMemoryActivityStore::new());
    let controller =
        PipelineController::new(StoryboardGenerator::new(driver.clone()), store.clone())
            .with_admin(AdminConfig::new("admin", "secret"));
    (controller, driver, store)
}

fn keeper() -> UserIdentity {
    UserIdentity::from_email("keeper@example.com")
}

fn is_invalid_transition(err: &storyboard_error::StoryboardError) -> bool {
    matches!(
        err.kind(),
        StoryboardErrorKind::Pipeline(e)
            if matches!(e.kind, PipelineErrorKind::InvalidTransition { .. })
    )
}

#[tokio::test]
async fn test_full_session() -> anyhow::Result<()> {
    let (mut controller, driver, store) = controller_with(vec![
        MockResponse::Success("The keeper finds a bottle.".to_string()),
        MockResponse::Success(scene_list_json(6, KEEPER)),
    ]);
    let mut stages = controller.subscribe();

    controller.login(keeper())?;
    assert_eq!(controller.stage_kind(), StageKind::Input);

    controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await?;
    assert_eq!(controller.stage_kind(), StageKind::DraftReview);
    assert_eq!(controller.stage().draft(), Some("The keeper finds a bottle."));
    assert!(driver.last_prompt().contains("6"));

    controller.edit_draft("The keeper finds a bottle at dawn.")?;
    controller.submit_scene_request().await?;

    assert_eq!(controller.stage_kind(), StageKind::Results);
    assert_eq!(controller.stage().scenes().map(<[_]>::len), Some(6));
    assert!(driver.last_prompt().contains("at dawn"));
    assert!(controller.error().is_none());
    assert_eq!(*stages.borrow_and_update(), StageKind::Results);

    let activity = store.activity("keeper@example.com").unwrap();
    assert_eq!(*activity.generations(), 1);
    assert_eq!(*activity.scenes(), 6);
    Ok(())
}

#[tokio::test]
async fn test_non_json_scenes_return_to_draft_review() -> anyhow::Result<()> {
    let (mut controller, _driver, store) = controller_with(vec![
        MockResponse::Success("The keeper finds a bottle.".to_string()),
        MockResponse::Success("Sorry, here is a list of scenes: one, two.".to_string()),
    ]);

    controller.login(keeper())?;
    controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await?;
    let err = controller.submit_scene_request().await.unwrap_err();

    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::Decode(_))
    ));
    assert_eq!(controller.stage_kind(), StageKind::DraftReview);
    assert_eq!(controller.stage().draft(), Some("The keeper finds a bottle."));
    assert_eq!(
        *controller.error().unwrap().category(),
        ErrorCategory::MalformedResponse
    );
    assert_eq!(*store.activity("keeper@example.com").unwrap().generations(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_returns_to_input_without_calling() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_unconfigured());
    let mut controller = PipelineController::new(
        StoryboardGenerator::new(driver.clone()),
        Arc::new(InMemoryActivityStore::new()),
    );
    let request = StoryboardRequest::new(TOPIC, 2)?;

    controller.login(keeper())?;
    assert!(controller.submit_draft_request(request.clone()).await.is_err());

    assert_eq!(driver.call_count(), 0);
    assert_eq!(
        controller.stage(),
        &PipelineStage::Input {
            identity: keeper(),
            request: Some(request),
        }
    );
    assert_eq!(
        *controller.error().unwrap().category(),
        ErrorCategory::MissingCredential
    );
    Ok(())
}

#[tokio::test]
async fn test_error_cleared_on_next_attempt() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) = controller_with(vec![
        MockResponse::Error(GenerationErrorKind::HttpError {
            status_code: 503,
            message: "overloaded".to_string(),
        }),
        MockResponse::Success("Second time lucky.".to_string()),
    ]);
    let request = StoryboardRequest::new(TOPIC, 1)?;

    controller.login(keeper())?;
    assert!(controller.submit_draft_request(request.clone()).await.is_err());
    assert_eq!(
        *controller.error().unwrap().category(),
        ErrorCategory::ServiceUnavailable
    );

    controller.submit_draft_request(request).await?;
    assert!(controller.error().is_none());
    assert_eq!(controller.stage_kind(), StageKind::DraftReview);
    Ok(())
}

#[tokio::test]
async fn test_invalid_triggers_leave_stage_unchanged() -> anyhow::Result<()> {
    let (mut controller, driver, _store) = controller_with(vec![MockResponse::Success(
        "draft".to_string(),
    )]);

    let err = controller.edit_draft("nope").unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(controller.stage_kind(), StageKind::LoggedOut);

    controller.login(keeper())?;
    assert!(is_invalid_transition(
        &controller.submit_scene_request().await.unwrap_err()
    ));
    assert!(is_invalid_transition(&controller.new_story().unwrap_err()));
    assert!(is_invalid_transition(&controller.back_to_input().unwrap_err()));
    assert!(is_invalid_transition(&controller.login(keeper()).unwrap_err()));
    assert_eq!(controller.stage_kind(), StageKind::Input);
    assert_eq!(driver.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_back_to_input_keeps_request() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) =
        controller_with(vec![MockResponse::Success("draft".to_string())]);
    let request = StoryboardRequest::new(TOPIC, 2)?.with_dialogue("Who sent this?");

    controller.login(keeper())?;
    controller.submit_draft_request(request.clone()).await?;
    controller.back_to_input()?;

    assert_eq!(controller.stage_kind(), StageKind::Input);
    assert_eq!(controller.stage().request(), Some(&request));
    assert!(controller.stage().draft().is_none());
    Ok(())
}

#[tokio::test]
async fn test_new_story_clears_everything() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) = controller_with(vec![
        MockResponse::Success("draft".to_string()),
        MockResponse::Success(scene_list_json(6, KEEPER)),
    ]);

    controller.login(keeper())?;
    controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await?;
    controller.submit_scene_request().await?;
    controller.new_story()?;

    assert_eq!(
        controller.stage(),
        &PipelineStage::Input {
            identity: keeper(),
            request: None,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_regenerate_replaces_scenes() -> anyhow::Result<()> {
    let (mut controller, _driver, store) = controller_with(vec![
        MockResponse::Success("draft".to_string()),
        MockResponse::Success(scene_list_json(6, KEEPER)),
        MockResponse::Success(scene_list_json(6, "Young woman, red scarf")),
    ]);

    controller.login(keeper())?;
    controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await?;
    controller.submit_scene_request().await?;
    controller.back_to_draft()?;
    controller.set_allow_variations(true)?;
    controller.submit_scene_request().await?;

    let scenes = controller.stage().scenes().unwrap();
    assert!(scenes.iter().all(|s| s.character_appearance() == "Young woman, red scarf"));
    assert!(controller.stage().request().unwrap().mode().allows_variations());
    assert_eq!(*store.activity("keeper@example.com").unwrap().generations(), 2);
    Ok(())
}

#[tokio::test]
async fn test_logout_from_any_stage() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) =
        controller_with(vec![MockResponse::Success("draft".to_string())]);

    controller.login(keeper())?;
    controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await?;
    controller.logout();
    assert_eq!(controller.stage(), &PipelineStage::LoggedOut);
    assert!(controller.stage().identity().is_none());

    controller.open_admin_login()?;
    controller.logout();
    assert_eq!(controller.stage_kind(), StageKind::LoggedOut);
    Ok(())
}

#[tokio::test]
async fn test_token_login() -> anyhow::Result<()> {
    let (mut controller, _driver, store) = controller_with(vec![]);

    assert!(controller.login_with_token("not-a-token").is_err());
    assert_eq!(controller.stage_kind(), StageKind::LoggedOut);
    assert_eq!(*controller.error().unwrap().category(), ErrorCategory::Login);

    // Payload decodes to the text "not json"
    assert!(controller.login_with_token("e30.bm90IGpzb24.sig").is_err());
    assert_eq!(controller.stage_kind(), StageKind::LoggedOut);
    assert_eq!(*controller.error().unwrap().category(), ErrorCategory::Login);

    // {"email":"a@b.io","name":"Ada"}
    let token = "eyJhbGciOiJSUzI1NiJ9.eyJlbWFpbCI6ImFAYi5pbyIsIm5hbWUiOiJBZGEifQ.c2ln";
    controller.login_with_token(token)?;
    assert_eq!(controller.stage_kind(), StageKind::Input);
    assert!(controller.error().is_none());
    assert_eq!(store.activity("a@b.io").unwrap().name(), "Ada");
    Ok(())
}

#[tokio::test]
async fn test_admin_dashboard() -> anyhow::Result<()> {
    let (mut controller, _driver, store) = controller_with(vec![]);
    store.record_generation(&UserIdentity::from_email("zed@x.io"), 12);
    store.record_generation(&UserIdentity::from_email("amy@x.io"), 6);

    controller.open_admin_login()?;
    assert!(controller.admin_login("admin", "wrong").is_err());
    assert_eq!(controller.stage_kind(), StageKind::AdminLogin);
    assert_eq!(*controller.error().unwrap().category(), ErrorCategory::Login);

    controller.admin_login("admin", "secret")?;
    let snapshot = controller.stage().dashboard().unwrap().clone();
    assert_eq!(*snapshot.total_users(), 2);
    assert_eq!(*snapshot.total_generations(), 2);
    assert_eq!(*snapshot.total_scenes(), 18);
    assert_eq!(snapshot.users()[0].email(), "amy@x.io");

    store.record_generation(&UserIdentity::from_email("amy@x.io"), 6);
    controller.refresh_dashboard()?;
    assert_eq!(
        *controller.stage().dashboard().unwrap().total_scenes(),
        24
    );

    controller.admin_exit()?;
    assert_eq!(controller.stage_kind(), StageKind::LoggedOut);
    Ok(())
}

#[tokio::test]
async fn test_admin_is_unreachable_when_signed_in() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) = controller_with(vec![]);
    controller.login(keeper())?;
    assert!(is_invalid_transition(&controller.open_admin_login().unwrap_err()));
    assert!(is_invalid_transition(&controller.admin_exit().unwrap_err()));
    Ok(())
}

#[tokio::test]
async fn test_stage_changes_are_broadcast() -> anyhow::Result<()> {
    let (mut controller, _driver, _store) = controller_with(vec![MockResponse::Error(
        GenerationErrorKind::ApiRequest("connection reset".to_string()),
    )]);
    let mut stages = controller.subscribe();
    assert_eq!(*stages.borrow(), StageKind::LoggedOut);

    controller.login(keeper())?;
    assert!(stages.has_changed()?);
    assert_eq!(*stages.borrow_and_update(), StageKind::Input);

    let _ = controller
        .submit_draft_request(StoryboardRequest::new(TOPIC, 1)?)
        .await;
    assert!(stages.has_changed()?);
    assert_eq!(*stages.borrow_and_update(), StageKind::Input);
    assert_eq!(
        *controller.error().unwrap().category(),
        ErrorCategory::Network
    );
    Ok(())
}
