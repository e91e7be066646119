//! `linkfeed submit` – run the form gate and upload once.

use anyhow::{Context, Result};
use linkfeed_core::config::LinkfeedConfig;
use linkfeed_core::form::{FieldKind, FormError, LinkForm};
use linkfeed_core::upload::SubmissionOutcome;

use crate::cli::terminal::TerminalView;
use crate::cli::LinkArgs;

#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub bot: Option<String>,
    pub links: LinkArgs,
    pub fields: Vec<(String, String)>,
    pub endpoint: Option<String>,
}

pub async fn run_submit(cfg: &LinkfeedConfig, opts: SubmitOptions) -> Result<()> {
    let (pdf, blog) = opts.links.read()?;
    let cfg = effective_config(cfg, &opts);

    let bot = opts
        .bot
        .or_else(|| cfg.default_bot.clone())
        .unwrap_or_default();
    let bot = bot.trim().to_string();
    if !bot.is_empty() && !cfg.is_known_bot(&bot) {
        anyhow::bail!(
            "unknown bot '{}'; configured bots: {}",
            bot,
            cfg.bots.join(", ")
        );
    }

    let uploader = cfg.uploader();
    let policy = cfg.clear_policy();
    let extra = cfg.extra_field_pairs();
    tracing::debug!(endpoint = uploader.endpoint(), "submit");

    // libcurl blocks; keep it off the runtime's worker threads.
    let result = tokio::task::spawn_blocking(move || {
        let mut form = LinkForm::new(TerminalView::stdio())
            .with_clear_policy(policy)
            .with_extra_fields(extra);
        form.select_bot(bot);
        form.input(FieldKind::Pdf, &pdf);
        form.input(FieldKind::Blog, &blog);
        let result = form.submit(&uploader);
        form.into_view().print_field_errors();
        result
    })
    .await
    .context("upload task failed")?;

    finish(result)
}

/// Config with command-line overrides applied.
fn effective_config(cfg: &LinkfeedConfig, opts: &SubmitOptions) -> LinkfeedConfig {
    let mut cfg = cfg.clone();
    if let Some(endpoint) = &opts.endpoint {
        cfg.endpoint = endpoint.clone();
    }
    for (key, value) in &opts.fields {
        cfg.extra_fields.insert(key.clone(), value.clone());
    }
    cfg
}

/// Maps the form result to the command's exit status. The view has
/// already shown the details.
fn finish(result: Result<SubmissionOutcome, FormError>) -> Result<()> {
    match result {
        Ok(SubmissionOutcome::Accepted { .. }) => Ok(()),
        Ok(SubmissionOutcome::Rejected { http_status, .. }) => {
            anyhow::bail!("upload rejected (HTTP {})", http_status)
        }
        Ok(SubmissionOutcome::Failed { reason }) => anyhow::bail!("upload failed: {}", reason),
        Err(FormError::InvalidFields { .. }) => anyhow::bail!("nothing submitted: link fields contain errors"),
        Err(e) => Err(anyhow::Error::new(e).context("nothing submitted")),
    }
}
