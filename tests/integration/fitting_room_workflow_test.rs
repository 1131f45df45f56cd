//! Fitting Room Workflow Integration Tests
//!
//! Drives the whole client flow through in-memory collaborators:
//! sign in, browse the catalogue, assemble a selection, submit an image,
//! pick up the finished generation and animate it.

mod common;

use fitroom_auth::SessionProvider;
use fitroom_records::{GenerationRecord, GenerationStatus, RecordStore};
use fitroom_render::mock::{MockOutcome, RecordedGenerationRequest};
use fitroom_selection::{Category, RejectReason, SelectionPhase};
use uuid::Uuid;

use crate::common::{seed_catalogue, TestApp, BLOB_BASE_URL};

#[tokio::test]
async fn test_image_then_video_workflow() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let user = app.sign_in().await?;
    let catalogue = seed_catalogue(&*app.records).await?;

    // ============================================================================
    // Step 1: Assemble actor + top + bottom
    // ============================================================================
    let actor = app.room.select_actor_record(catalogue.actor).await?;
    assert_eq!(actor.name, "Mia");
    assert_eq!(
        actor.image_url,
        app.records.get_actor(catalogue.actor).await?.image_url
    );

    assert!(app.room.add_outfit_record(catalogue.top).await?.is_added());
    assert!(app.room.add_outfit_record(catalogue.bottom).await?.is_added());
    assert_eq!(app.room.selection().phase(), SelectionPhase::ActorAndOutfit);
    assert_eq!(app.room.selection().selection_count(), 2);

    // ============================================================================
    // Step 2: Submit the image generation
    // ============================================================================
    let mut updates = app.room.selection().subscribe();
    let _ = updates.borrow_and_update();

    let request = app.room.submit_image("studio light").await?;

    assert_eq!(request.user_id, user.id);
    assert_eq!(request.actor_ref, catalogue.actor.to_string());
    assert_eq!(
        request.outfit_refs,
        vec![catalogue.top.to_string(), catalogue.bottom.to_string()]
    );
    assert_eq!(app.room.selection().phase(), SelectionPhase::Empty);
    assert!(updates.has_changed()?);
    assert_eq!(updates.borrow_and_update().selection_count(), 0);

    // ============================================================================
    // Step 3: Backend finishes; the user animates the result
    // ============================================================================
    let file_id = Uuid::new_v4();
    let generation_id = app.records.insert_generation(
        GenerationRecord::pending_image(
            request.prompt.clone(),
            request.actor_ref.clone(),
            request.outfit_refs.clone(),
        )
        .completed_with(file_id),
    );

    let generations = app.records.list_generations().await?;
    assert_eq!(generations.len(), 1);
    assert_eq!(generations[0].status, GenerationStatus::Completed);

    let input = app
        .room
        .start_video_from_generation(generation_id, "slow turn")
        .await?;
    assert_eq!(
        input.preview_image_url.as_deref(),
        Some(format!("{}/files/{}/view", BLOB_BASE_URL, file_id).as_str())
    );
    assert_eq!(app.room.selection().phase(), SelectionPhase::VideoInputActive);

    let video = app.room.submit_video().await?;
    assert_eq!(video.document_id, generation_id.to_string());
    assert_eq!(video.video_prompt, "slow turn");
    assert_eq!(app.room.selection().phase(), SelectionPhase::Empty);

    // ============================================================================
    // Step 4: Backend saw both submissions in order
    // ============================================================================
    let recorded = app.generation.recorded_requests();
    assert_eq!(recorded.len(), 2);
    assert!(matches!(recorded[0], RecordedGenerationRequest::Image(_)));
    assert_eq!(recorded[1], RecordedGenerationRequest::Video(video));

    Ok(())
}

#[tokio::test]
async fn test_full_outfit_rules_through_records() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let catalogue = seed_catalogue(&*app.records).await?;
    let selection = app.room.selection();

    // top -> bottom -> gown (remapped to full) -> hat
    assert!(app.room.add_outfit_record(catalogue.top).await?.is_added());
    assert!(app.room.add_outfit_record(catalogue.bottom).await?.is_added());
    assert_eq!(selection.snapshot().outfit_items.len(), 2);

    assert!(app.room.add_outfit_record(catalogue.gown).await?.is_added());
    let items = selection.snapshot().outfit_items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].image_id, catalogue.gown.to_string());
    assert_eq!(items[0].category, Category::Full);

    let before = selection.snapshot();
    let outcome = app.room.add_outfit_record(catalogue.hat).await?;
    assert_eq!(outcome.rejection(), Some(RejectReason::FullOutfitConflict));
    assert_eq!(selection.snapshot(), before);

    // removing the full outfit frees the slots again
    selection.remove_outfit_item(&Category::Full);
    assert!(app.room.add_outfit_record(catalogue.hat).await?.is_added());
    assert!(app.room.add_outfit_record(catalogue.top).await?.is_added());
    assert_eq!(selection.selection_count(), 1);
    assert_eq!(selection.snapshot().outfit_items.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_video_input_and_selection_exclude_each_other() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let catalogue = seed_catalogue(&*app.records).await?;
    let generation_id = app.records.insert_generation(
        GenerationRecord::pending_image("p", catalogue.actor.to_string(), vec![])
            .completed_with(Uuid::new_v4()),
    );

    app.room.select_actor_record(catalogue.actor).await?;
    let _ = app.room.add_outfit_record(catalogue.top).await?;

    app.room
        .start_video_from_generation(generation_id, "wave")
        .await?;
    let state = app.room.selection().snapshot();
    assert!(state.actor.is_empty());
    assert!(state.outfit_items.is_empty());
    assert!(state.video_gen_input.is_some());

    app.room.select_actor_record(catalogue.actor).await?;
    let state = app.room.selection().snapshot();
    assert!(state.video_gen_input.is_none());
    assert_eq!(state.phase(), SelectionPhase::ActorOnly);

    Ok(())
}

#[tokio::test]
async fn test_backend_rejection_keeps_selection_for_retry() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    app.sign_in().await?;
    let catalogue = seed_catalogue(&*app.records).await?;

    app.room.select_actor_record(catalogue.actor).await?;
    let _ = app.room.add_outfit_record(catalogue.gown).await?;
    let before = app.room.selection().snapshot();

    app.generation
        .set_outcome(MockOutcome::Reject("render farm busy".to_string()));
    let err = app.room.submit_image("retry me").await.unwrap_err();
    assert_eq!(err.error_code(), "UPSTREAM_ERROR");
    assert_eq!(app.room.selection().snapshot(), before);

    app.generation.set_outcome(MockOutcome::Accept);
    let request = tokio_test::assert_ok!(app.room.submit_image("retry me").await);
    assert_eq!(request.outfit_refs, vec![catalogue.gown.to_string()]);
    assert_eq!(app.generation.recorded_requests().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_signed_out_user_cannot_submit() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    app.sign_in().await?;
    let catalogue = seed_catalogue(&*app.records).await?;
    app.room.select_actor_record(catalogue.actor).await?;
    let _ = app.room.add_outfit_record(catalogue.top).await?;

    app.room.session().logout().await?;

    let err = app.room.submit_image("studio").await.unwrap_err();
    assert_eq!(err.error_code(), "AUTHENTICATION_ERROR");
    assert!(err.is_user_facing());
    assert!(app.generation.recorded_requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_deleted_record_cannot_be_selected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let catalogue = seed_catalogue(&*app.records).await?;
    let outfit = app.records.get_outfit(catalogue.hat).await?;

    app.records.delete_outfit(outfit.id, outfit.file_id).await?;
    assert!(!app.blobs.contains(outfit.file_id));

    let err = app.room.add_outfit_record(catalogue.hat).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(app.room.selection().phase(), SelectionPhase::Empty);

    Ok(())
}
