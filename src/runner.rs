//! Headless runs: one submission from a form file, or a bare health check.
//! The binary only prints the report and turns `success` into an exit code.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::client::{HttpPredictionClient, PredictionApi};
use crate::panel;
use crate::submission::Submission;
use crate::types::FormState;

/// What a headless run prints, and whether it counts as a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub text: String,
    pub success: bool,
}

pub fn load_form(path: &Path) -> Result<FormState> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read form at {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("failed to parse form {}", path.display()))
}

/// Submit a form once and report the panel that would be shown.
pub async fn submit_form<A>(api: &A, form: &FormState) -> RunReport
where
    A: PredictionApi,
{
    let mut submission = Submission::new();
    submission.submit(api, form).await;

    RunReport {
        text: panel::render_text(submission.view()).unwrap_or_default(),
        success: submission.error().is_none(),
    }
}

/// Unreadable or malformed files are an `Err`; a failed submission is an
/// unsuccessful report.
pub async fn submit_form_file<A>(api: &A, path: &Path) -> Result<RunReport>
where
    A: PredictionApi,
{
    let form = load_form(path)?;
    info!("submitting form from {}", path.display());
    Ok(submit_form(api, &form).await)
}

pub async fn check_health(client: &HttpPredictionClient) -> RunReport {
    match client.health().await {
        Ok(()) => RunReport {
            text: format!("backend at {} is live\n", client.base_url()),
            success: true,
        },
        Err(e) => RunReport {
            text: format!("Error: {}\n", e),
            success: false,
        },
    }
}
