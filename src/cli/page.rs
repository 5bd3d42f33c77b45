//! `clearsight page` — open the transparency page in the terminal.

use crate::cli::GlobalOptions;
use crate::page::terminal::run_app;
use crate::page::TRANSPARENCY_ROUTE;
use anyhow::Result;

/// Run the `clearsight page` command.
pub async fn run_page(global: &GlobalOptions, message_id: Option<String>) -> Result<()> {
    let logger = global.open_logger(true)?;
    run_app(logger, TRANSPARENCY_ROUTE, message_id).await
}
