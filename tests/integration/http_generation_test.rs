//! HTTP Generation Integration Tests
//!
//! Runs the submission workflow against the real HTTP generation client,
//! with the render backend stubbed by wiremock.

mod common;

use std::sync::Arc;

use fitroom_render::client::HttpGenerationClient;
use fitroom_render::GenerationConfig;
use fitroom_selection::SelectionPhase;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{build_room, seed_catalogue, TestApp};

fn http_client(server: &MockServer) -> anyhow::Result<HttpGenerationClient> {
    Ok(HttpGenerationClient::new(GenerationConfig {
        provider: "http".to_string(),
        base_url: server.uri(),
        api_key: Some("sk-integration".to_string()),
    })?)
}

#[tokio::test]
async fn test_submit_image_over_http() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate/image"))
        .and(header("authorization", "Bearer sk-integration"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::new()?;
    let room = build_room(
        &app.storage_path,
        app.session.clone(),
        app.records.clone(),
        Arc::new(http_client(&server)?),
    )?;
    app.sign_in().await?;
    let catalogue = seed_catalogue(&*app.records).await?;

    room.select_actor_record(catalogue.actor).await?;
    let _ = room.add_outfit_record(catalogue.top).await?;
    let _ = room.add_outfit_record(catalogue.bottom).await?;

    let request = room.submit_image("studio light").await?;

    let received = server
        .received_requests()
        .await
        .ok_or_else(|| anyhow::anyhow!("request recording disabled"))?;
    let body: serde_json::Value = serde_json::from_slice(&received[0].body)?;
    assert_eq!(body["actor_ref"], catalogue.actor.to_string());
    assert_eq!(body["outfit_refs"], serde_json::json!(request.outfit_refs));
    assert_eq!(body["prompt"], "studio light");
    assert_eq!(room.selection().phase(), SelectionPhase::Empty);
    Ok(())
}

#[tokio::test]
async fn test_backend_error_keeps_selection() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate/image"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let app = TestApp::new()?;
    let room = build_room(
        &app.storage_path,
        app.session.clone(),
        app.records.clone(),
        Arc::new(http_client(&server)?),
    )?;
    app.sign_in().await?;
    let catalogue = seed_catalogue(&*app.records).await?;
    room.select_actor_record(catalogue.actor).await?;
    let _ = room.add_outfit_record(catalogue.gown).await?;
    let before = room.selection().snapshot();

    let err = room.submit_image("studio").await.unwrap_err();

    assert_eq!(err.error_code(), "UPSTREAM_ERROR");
    assert!(err.to_string().contains("503"));
    assert_eq!(room.selection().snapshot(), before);

    // the persisted copy is untouched as well
    let restarted = app.restart()?;
    assert_eq!(restarted.room.selection().snapshot(), before);
    Ok(())
}
