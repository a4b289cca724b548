//! TUI launch command handler.

use cms_architect_config::ArchitectConfig;
use cms_architect_error::ArchitectResult;
use cms_architect_gateway::{ResponseGateway, Session};
use cms_architect_tui::run_tui;
use tokio::runtime::Handle;

/// Launch the terminal user interface.
///
/// The UI loop blocks this worker thread; provider calls run on the rest of
/// the runtime.
pub async fn launch_tui(gateway: ResponseGateway, config: &ArchitectConfig) -> ArchitectResult<()> {
    tracing::info!(tick_rate_ms = config.tui.tick_rate_ms, "Launching TUI");

    let session = Session::new(config.session.history_cap());
    let tick_rate_ms = config.tui.tick_rate_ms;
    let handle = Handle::current();
    tokio::task::block_in_place(|| run_tui(gateway, session, tick_rate_ms, handle))?;

    Ok(())
}
