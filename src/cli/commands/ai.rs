//! ai command - Add, prompt and enhance-response via the AI handler

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::args::AiAction;
use crate::cli::help::ClapHelp;
use crate::cli::Context;
use crate::core::config::Config;
use crate::dispatch::CommandDispatcher;
use crate::handler::{create_handler, unavailable_handler, AiHandler};
use crate::ui::{output, TerminalSink};
use tracing::debug;

/// Run an `ai` sub-command.
///
/// This is a synchronous wrapper that uses tokio to run the async
/// implementation.
pub fn ai(ctx: &Context, action: AiAction) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(ai_async(ctx, action))
}

async fn ai_async(ctx: &Context, action: AiAction) -> Result<()> {
    let working_dir = ctx.working_dir()?;
    // Config errors are deferred until the handler is first called.
    let handler = match load_handler(&working_dir) {
        Ok(handler) => handler,
        Err(err) => {
            let reason = format!("{:#}", err);
            debug!(%reason, "AI handler unavailable");
            unavailable_handler(reason)
        }
    };

    let dispatcher = CommandDispatcher::new(
        handler,
        Arc::new(TerminalSink),
        Some(Arc::new(ClapHelp)),
    );

    if let Some(text) = run_action(&dispatcher, action).await? {
        output::result(text);
    }
    Ok(())
}

fn load_handler(working_dir: &Path) -> Result<Arc<dyn AiHandler>> {
    let config = Config::load(Some(working_dir)).context("Failed to load config")?;
    Ok(create_handler(&config, working_dir)?)
}

/// Dispatch one `ai` action and return the text to print, if any.
pub async fn run_action(dispatcher: &CommandDispatcher, action: AiAction) -> Result<Option<String>> {
    match action {
        AiAction::Add {
            description,
            path,
            preview,
            rewrite,
        } => {
            dispatcher
                .add(description.as_deref(), path.as_deref(), preview, rewrite)
                .await?;
            Ok(None)
        }
        AiAction::Prompt {
            description,
            path,
            rewrite,
        } => Ok(dispatcher
            .prompt(description.as_deref(), path.as_deref(), rewrite)
            .await?),
        AiAction::EnhanceResponse { file, path } => Ok(Some(
            dispatcher
                .enhance_response(file.as_deref(), path.as_deref())
                .await?,
        )),
    }
}
