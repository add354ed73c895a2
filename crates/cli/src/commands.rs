use ferrous_doh_application::services::{CheckerSession, ProviderStatus, SubmitOutcome};
use ferrous_doh_domain::{DomainError, RecordType};
use tracing::warn;

use crate::render::Renderer;

/// Renders the session's current results in provider order.
pub async fn render_session(session: &CheckerSession, renderer: &Renderer) -> String {
    let providers = session.providers();
    let mut statuses: Vec<ProviderStatus> = Vec::with_capacity(providers.len());
    for provider in providers {
        statuses.push(session.status(&provider.id).await);
    }
    renderer.results(
        providers,
        &session.results().await,
        &statuses,
        &session.notes().await,
    )
}

/// Submits one lookup and prints the outcome.
pub async fn check(
    session: &CheckerSession,
    renderer: &Renderer,
    hostname: &str,
    record_type: RecordType,
) -> SubmitOutcome {
    if let Some(hint) = record_type.hostname_hint() {
        eprintln!("{hint}");
    }

    let outcome = session.submit(hostname, record_type).await;
    match &outcome {
        SubmitOutcome::Ignored => eprintln!("Enter a hostname to query"),
        SubmitOutcome::Published(_) => println!("{}", render_session(session, renderer).await),
        SubmitOutcome::Superseded { .. } => {}
    }
    outcome
}

/// Exports the current results; prints the written path or the reason
/// nothing was written.
pub async fn export(session: &CheckerSession) {
    match session.export().await {
        Ok(location) => println!("Exported to {location}"),
        Err(DomainError::NothingToExport) => eprintln!("{}", DomainError::NothingToExport),
        Err(e) => {
            warn!(error = %e, "Export failed");
            eprintln!("Export failed: {e}");
        }
    }
}

/// Parses a 1-based history position as shown by `history`.
pub fn history_index(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()?.checked_sub(1)
}
