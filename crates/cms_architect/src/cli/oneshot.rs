//! One-shot generate and chat commands.

use cms_architect_core::Message;
use cms_architect_error::{ArchitectResult, JsonError};
use cms_architect_gateway::{GREETING, ResponseGateway};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Token cancelled when the user presses Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received, cancelling");
            trigger.cancel();
        }
    });
    token
}

/// Run one generation call and print the artifacts as JSON on stdout.
///
/// Any provider failure is returned, so the process exits non-zero.
pub async fn run_generate(
    gateway: &ResponseGateway,
    requirements: &str,
    compact: bool,
) -> ArchitectResult<()> {
    info!("Generating architecture");
    let artifacts = gateway
        .generate_artifacts(requirements, &cancel_on_ctrl_c())
        .await?;

    let json = if compact {
        serde_json::to_string(&artifacts)
    } else {
        serde_json::to_string_pretty(&artifacts)
    }
    .map_err(|e| JsonError::new(e.to_string()))?;

    println!("{}", json);
    Ok(())
}

/// Ask one question, as the first turn of a fresh session, and print the reply.
pub async fn run_chat(gateway: &ResponseGateway, message: &str) -> ArchitectResult<()> {
    let history = [Message::assistant(GREETING)];
    let reply = gateway.chat(&history, message, &cancel_on_ctrl_c()).await;
    println!("{}", reply);
    Ok(())
}
