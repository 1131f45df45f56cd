//! Selection Persistence Integration Tests
//!
//! The selection survives an app restart through the file-backed key-value
//! store, and unusable blobs are discarded instead of crashing startup.

mod common;

use fitroom_common::config::DEFAULT_SELECTION_STORAGE_KEY;
use fitroom_selection::{
    FileKeyValueStore, KeyValueStore, OutfitSelection, PersistedSelection, SelectionPhase,
    VideoGenerationInput,
};

use crate::common::{seed_catalogue, TestApp};

#[tokio::test]
async fn test_selection_survives_restart() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let catalogue = seed_catalogue(&*app.records).await?;

    app.room.select_actor_record(catalogue.actor).await?;
    let _ = app.room.add_outfit_record(catalogue.top).await?;
    let _ = app.room.add_outfit_record(catalogue.hat).await?;
    let before = app.room.selection().snapshot();

    let restarted = app.restart()?;

    assert_eq!(restarted.room.selection().snapshot(), before);
    assert_eq!(
        restarted.room.selection().phase(),
        SelectionPhase::ActorAndOutfit
    );
    Ok(())
}

#[tokio::test]
async fn test_video_input_survives_restart() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    app.room.selection().set_video_gen_input(
        VideoGenerationInput::new("g1", "slow turn")
            .with_preview_image_url("https://blob.test/files/g1/view"),
    );

    let restarted = app.restart()?;
    let input = restarted.room.selection().snapshot().video_gen_input;

    assert_eq!(
        input.map(|i| (i.document_id, i.prompt)),
        Some(("g1".to_string(), "slow turn".to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn test_persisted_layout_is_versioned_camel_case() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let _ = app
        .room
        .selection()
        .add_outfit_item(OutfitSelection::new("o1", "top").with_garment_type("Tops"));

    let blob = app.persisted_blob()?;

    assert_eq!(blob["version"], PersistedSelection::CURRENT_VERSION);
    assert_eq!(blob["state"]["outfitItems"][0]["imageId"], "o1");
    assert_eq!(blob["state"]["outfitItems"][0]["garmentType"], "Tops");
    assert_eq!(blob["state"]["outfitItems"][0]["category"], "top");
    Ok(())
}

#[tokio::test]
async fn test_cleared_selection_survives_restart_as_empty() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let _ = app
        .room
        .selection()
        .add_outfit_item(OutfitSelection::new("o1", "full"));
    app.room.selection().clear_outfit_items();

    let restarted = app.restart()?;
    assert_eq!(restarted.room.selection().phase(), SelectionPhase::Empty);
    Ok(())
}

#[tokio::test]
async fn test_unknown_version_starts_empty() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    {
        let storage = FileKeyValueStore::open(&app.storage_path)?;
        storage.save(
            DEFAULT_SELECTION_STORAGE_KEY,
            r#"{"version":42,"state":{"outfitItems":[{"imageId":"o1","category":"top"}]}}"#,
        )?;
    }

    let restarted = app.restart()?;
    assert_eq!(restarted.room.selection().phase(), SelectionPhase::Empty);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_storage_file_starts_empty() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    std::fs::write(&app.storage_path, "not json at all")?;

    let restarted = app.restart()?;
    assert_eq!(restarted.room.selection().phase(), SelectionPhase::Empty);

    // the store keeps working after discarding the file
    let _ = restarted
        .room
        .selection()
        .add_outfit_item(OutfitSelection::new("o1", "bottom"));
    let again = restarted.restart()?;
    assert_eq!(again.room.selection().phase(), SelectionPhase::OutfitOnly);
    Ok(())
}
