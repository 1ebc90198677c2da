//! Load-then-render pipeline.
//!
//! [`initialize`] is the single entry point: it loads one snapshot and
//! renders the standings, the completed groups and the current group, in
//! that order. When loading fails it shows an error banner and the
//! placeholder row instead, so the page is never left blank.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::dom::{Document, Surface};
use crate::fetch::{FailureKind, LoadError, Loader};
use crate::models::Snapshot;
use crate::render::{
    render_completed_groups, render_current_group, render_standings, show_error,
    show_fallback_table, LOAD_FAILURE_MESSAGE,
};

/// How a render cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    LoadFailed { kind: FailureKind, detail: String },
}

/// Result of one render cycle.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    /// The snapshot that was rendered, if loading succeeded
    pub snapshot: Option<Arc<Snapshot>>,
    pub outcome: RenderOutcome,
    /// Surfaces whose content was written, in render order
    pub surfaces: Vec<Surface>,
    pub duration: Duration,
}

impl RenderHandle {
    pub fn is_success(&self) -> bool {
        self.outcome == RenderOutcome::Rendered
    }

    pub fn wrote(&self, surface: Surface) -> bool {
        self.surfaces.contains(&surface)
    }
}

/// Render every section of `snapshot`. Returns the surfaces written.
pub fn render_snapshot(doc: &mut Document, snapshot: &Snapshot) -> Vec<Surface> {
    let mut written = Vec::new();

    info!("Rendering overall standings...");
    if render_standings(doc, snapshot.regions.as_deref()) {
        written.push(Surface::StandingsBody);
    }

    info!("Rendering completed groups...");
    if render_completed_groups(doc, snapshot.completed_groups.as_deref()) {
        written.push(Surface::GroupsContainer);
    }

    info!("Rendering current group...");
    if render_current_group(doc, snapshot.current_group.as_ref()) {
        written.push(Surface::CurrentGroupContainer);
    }

    written
}

/// Show the failure banner and placeholder row. Returns the surfaces written.
pub fn render_failure(doc: &mut Document, err: &LoadError) -> Vec<Surface> {
    error!("Error loading tournament data: {}", err);

    let mut written = Vec::new();
    if show_error(doc, LOAD_FAILURE_MESSAGE) {
        written.push(Surface::MainContent);
    }
    if show_fallback_table(doc) {
        written.push(Surface::StandingsBody);
    }
    written
}

/// Load the snapshot and render it into `doc`.
///
/// Never fails: load errors are logged and rendered as a banner.
pub async fn initialize(doc: &mut Document, loader: &Loader) -> RenderHandle {
    let started = Instant::now();
    info!("Tournament table initializing from {}", loader.source());

    let handle = match loader.load().await {
        Ok(snapshot) => {
            let surfaces = render_snapshot(doc, &snapshot);
            RenderHandle {
                snapshot: Some(Arc::new(snapshot)),
                outcome: RenderOutcome::Rendered,
                surfaces,
                duration: started.elapsed(),
            }
        }
        Err(e) => {
            let surfaces = render_failure(doc, &e);
            RenderHandle {
                snapshot: None,
                outcome: RenderOutcome::LoadFailed {
                    kind: e.kind(),
                    detail: e.to_string(),
                },
                surfaces,
                duration: started.elapsed(),
            }
        }
    };

    info!(
        "Tournament table initialization finished in {:?} ({} surfaces written)",
        handle.duration,
        handle.surfaces.len()
    );
    handle
}
