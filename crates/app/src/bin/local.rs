// Fitroom - local fitting room inspector
//
// Restores the device-local selection and prints it as JSON.

use tracing::{error, info};

use fitroom_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    fitroom_app::init_tracing(&config)?;

    info!("Starting Fitroom local inspector");

    let room = fitroom_app::create_app(&config).map_err(|e| {
        error!("Failed to create fitting room: {}", e);
        e
    })?;

    let state = room.selection().snapshot();
    info!(
        phase = %state.phase(),
        selections = state.selection_count(),
        full_outfit = state.has_full_outfit(),
        "Selection restored"
    );

    match room.session().current().await {
        Some(user) => info!(user_id = %user.id, "Signed in"),
        None => info!("No user signed in"),
    }

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
