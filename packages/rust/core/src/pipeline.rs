//! End-to-end flows: Figma URL → fetch → extract → combine → classify → report.

use std::time::{Duration, Instant};

use figmacopy_extract::{ExtractedCopy, extract_copy, extract_texts, format_report};
use figmacopy_figma::{FigmaClient, parse_figma_url};
use figmacopy_shared::{BuildConfig, FigmaRef, Result};
use tracing::{info, instrument};

use crate::build::{BuildOutcome, smart_build};
use crate::ticket::{TicketConfig, TicketDraft};

/// Configuration for the `express` pipeline.
#[derive(Debug, Clone)]
pub struct ExpressConfig {
    /// Figma share link.
    pub figma_url: String,
    /// Deepest node level visited during extraction.
    pub max_depth: usize,
    /// Build step settings; `None` skips the build check.
    pub build: Option<BuildConfig>,
    /// Ticket settings.
    pub ticket: TicketConfig,
}

/// Result of the `express` pipeline.
#[derive(Debug)]
pub struct ExpressResult {
    /// Parsed file key / node id.
    pub figma_ref: FigmaRef,
    /// Fragments, lines, and sections.
    pub copy: ExtractedCopy,
    /// Markdown copy report.
    pub report: String,
    /// Ticket draft wrapping the report.
    pub ticket: TicketDraft,
    /// What the build step did.
    pub build: BuildOutcome,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &ExpressResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &ExpressResult) {}
}

/// Parse a Figma URL, insisting on a node id.
fn parse_request(figma_url: &str) -> Result<(FigmaRef, String)> {
    let figma_ref = parse_figma_url(figma_url)?;
    let node_id = figma_ref.require_node_id()?.to_string();
    Ok((figma_ref, node_id))
}

/// Fetch the node behind `figma_url` and return its raw text fragments.
#[instrument(skip_all, fields(url = %figma_url))]
pub async fn fetch_texts(
    client: &FigmaClient,
    figma_url: &str,
    max_depth: usize,
) -> Result<Vec<String>> {
    let (figma_ref, node_id) = parse_request(figma_url)?;
    info!(file_key = %figma_ref.file_key, %node_id, "extracting text from Figma");

    let document = client.fetch_node(&figma_ref.file_key, &node_id).await?;
    Ok(extract_texts(&document, max_depth))
}

/// Run the full `express` pipeline.
///
/// 1. Parse the URL (node id required)
/// 2. Build check and Figma fetch, concurrently
/// 3. Extract, combine, classify
/// 4. Render the report and the ticket draft
#[instrument(skip_all, fields(url = %config.figma_url))]
pub async fn express(
    config: &ExpressConfig,
    client: &FigmaClient,
    progress: &dyn ProgressReporter,
) -> Result<ExpressResult> {
    let start = Instant::now();
    let (figma_ref, node_id) = parse_request(&config.figma_url)?;

    // --- Phase 1: build check ∥ fetch ---
    progress.phase("Fetching Figma node");
    let build_step = async {
        match &config.build {
            Some(build) => smart_build(build).await,
            None => Ok(BuildOutcome::Skipped),
        }
    };
    let (build, document) = tokio::join!(
        build_step,
        client.fetch_node(&figma_ref.file_key, &node_id),
    );
    let build = build?;
    let document = document?;
    info!(?build, "text extraction input ready");

    // --- Phase 2: extract / combine / classify ---
    progress.phase("Combining copy");
    let copy = extract_copy(&document, config.max_depth);

    // --- Phase 3: render ---
    progress.phase("Formatting report");
    let report = format_report(&copy.sections, &config.figma_url);
    let ticket = TicketDraft::new(&report, &config.figma_url, &config.ticket);

    info!(
        fragments = copy.fragments.len(),
        lines = copy.lines.len(),
        "express extraction complete"
    );

    let result = ExpressResult {
        figma_ref,
        copy,
        report,
        ticket,
        build,
        elapsed: start.elapsed(),
    };
    progress.done(&result);

    Ok(result)
}
