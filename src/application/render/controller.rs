use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Instant,
};

use metrics::counter;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::ports::{LookupError, NameResolver};
use crate::application::url_sync::UrlSynchronizer;
use crate::domain::drawing::Surface;
use crate::domain::molecule::{RenderRequest, ValidRequest, truncate_chars};
use crate::domain::snapshot::{RenderFailure, RenderOutcome, RenderSnapshot};

use super::adapter::MoleculeRenderer;
use super::view::{SearchStatus, StatusKind, ViewState};

const EMPTY_SMILES_MESSAGE: &str = "Please enter a SMILES string";
const EMPTY_NAME_MESSAGE: &str = "Please enter a molecule name";
const SEARCHING_MESSAGE: &str = "Searching...";
const FOUND_SMILES_PREVIEW_CHARS: usize = 40;

/// Result of a name search. A resolved name always carries the outcome of the
/// render it triggered.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The name was blank; nothing was looked up.
    EmptyName,
    /// A newer request was issued while the lookup was in flight.
    Superseded,
    Failed(LookupError),
    Resolved {
        smiles: String,
        render: RenderOutcome,
    },
}

/// Identifies one user action; only the most recently issued ticket may
/// change what the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

#[derive(Default)]
struct SessionState {
    snapshot: Option<RenderSnapshot>,
    view: ViewState,
    /// The search whose "Searching..." status is on screen, if any.
    pending_search: Option<Ticket>,
}

/// Owns the current molecule and keeps label, exports and URL consistent.
pub struct RenderController {
    renderer: Arc<dyn MoleculeRenderer>,
    resolver: Arc<dyn NameResolver>,
    url_sync: UrlSynchronizer,
    issued: AtomicU64,
    state: Mutex<SessionState>,
}

impl RenderController {
    pub fn new(
        renderer: Arc<dyn MoleculeRenderer>,
        resolver: Arc<dyn NameResolver>,
        url_sync: UrlSynchronizer,
    ) -> Self {
        Self {
            renderer,
            resolver,
            url_sync,
            issued: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn url_sync(&self) -> &UrlSynchronizer {
        &self.url_sync
    }

    /// Page-load path: render whatever the current URL describes.
    pub async fn load_initial(&self) -> RenderOutcome {
        let request = self.url_sync.load();
        self.render(request).await
    }

    /// Validate and render one request.
    pub async fn render(&self, request: RenderRequest) -> RenderOutcome {
        let valid = match request.validated() {
            Ok(valid) => valid,
            Err(_) => {
                self.state.lock().await.view.error = Some(EMPTY_SMILES_MESSAGE.to_string());
                let outcome = RenderOutcome::Failed(RenderFailure::EmptyInput);
                record_render(&outcome);
                return outcome;
            }
        };

        let ticket = self.issue();
        self.render_valid(ticket, valid).await
    }

    /// Resolve a compound name and render the result as if it had been typed.
    pub async fn search(&self, name: &str) -> SearchOutcome {
        let name = name.trim();
        if name.is_empty() {
            self.state.lock().await.view.search_status =
                Some(SearchStatus::new(StatusKind::Error, EMPTY_NAME_MESSAGE));
            return SearchOutcome::EmptyName;
        }

        let ticket = self.issue();
        {
            let mut state = self.state.lock().await;
            state.view.search_status =
                Some(SearchStatus::new(StatusKind::Loading, SEARCHING_MESSAGE));
            state.pending_search = Some(ticket);
        }

        let started_at = Instant::now();
        let resolved = self.resolver.resolve(name).await;
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        let smiles = {
            let mut state = self.state.lock().await;
            let owns_status = state.pending_search == Some(ticket);
            if owns_status {
                state.pending_search = None;
            }
            if !self.is_current(ticket) {
                if owns_status {
                    state.view.search_status = None;
                }
                counter!("chemsketch_lookup_total", "result" => "superseded").increment(1);
                return SearchOutcome::Superseded;
            }

            match resolved {
                Ok(smiles) => {
                    info!(
                        target = "application::render::controller",
                        op = "controller::search",
                        result = "found",
                        name,
                        elapsed_ms,
                        "Compound name resolved"
                    );
                    counter!("chemsketch_lookup_total", "result" => "found").increment(1);
                    state.view.search_status = Some(SearchStatus::new(
                        StatusKind::Success,
                        format!("Found! SMILES: {}", smiles_preview(&smiles)),
                    ));
                    smiles
                }
                Err(err) => {
                    warn!(
                        target = "application::render::controller",
                        op = "controller::search",
                        result = "error",
                        name,
                        elapsed_ms,
                        error = %err,
                        "Compound name lookup failed"
                    );
                    counter!("chemsketch_lookup_total", "result" => lookup_result_label(&err))
                        .increment(1);
                    state.view.search_status =
                        Some(SearchStatus::new(StatusKind::Error, lookup_message(name, &err)));
                    return SearchOutcome::Failed(err);
                }
            }
        };

        let render = match RenderRequest::new(smiles.clone()).with_name(name).validated() {
            Ok(valid) => self.render_valid(ticket, valid).await,
            Err(_) => {
                let outcome = RenderOutcome::Failed(RenderFailure::EmptyInput);
                record_render(&outcome);
                outcome
            }
        };

        SearchOutcome::Resolved { smiles, render }
    }

    /// The snapshot, but only while export controls are enabled.
    pub async fn exportable_snapshot(&self) -> Option<RenderSnapshot> {
        let state = self.state.lock().await;
        if state.view.exports_enabled {
            state.snapshot.clone()
        } else {
            None
        }
    }

    /// The last successful snapshot even if a later failure disabled exports.
    pub async fn retained_snapshot(&self) -> Option<RenderSnapshot> {
        self.state.lock().await.snapshot.clone()
    }

    pub async fn view(&self) -> ViewState {
        self.state.lock().await.view.clone()
    }

    fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    async fn render_valid(&self, ticket: Ticket, request: ValidRequest) -> RenderOutcome {
        {
            let mut state = self.state.lock().await;
            if !self.is_current(ticket) {
                return superseded(ticket);
            }
            state.view.error = None;
            state.view.surface.clear();
        }

        let started_at = Instant::now();
        let mut scratch = Surface::new();
        let drawn = self.renderer.draw(&request.smiles, &mut scratch).await;
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        let mut state = self.state.lock().await;
        if !self.is_current(ticket) {
            return superseded(ticket);
        }

        let outcome = match drawn {
            Ok(drawing) => {
                let snapshot = RenderSnapshot {
                    label: request.label(),
                    smiles: request.smiles,
                    display_name: request.display_name,
                    drawing,
                };

                state.view.surface.show(snapshot.drawing.clone());
                state.view.label = Some(snapshot.label.clone());
                state.view.exports_enabled = true;
                state.snapshot = Some(snapshot.clone());
                self.url_sync.write(&snapshot);

                info!(
                    target = "application::render::controller",
                    op = "controller::render",
                    result = "rendered",
                    ticket = ticket.0,
                    smiles = %snapshot.smiles,
                    kind = snapshot.drawing.kind(),
                    elapsed_ms,
                    "Molecule rendered"
                );
                RenderOutcome::Rendered(snapshot)
            }
            Err(reason) => {
                state.view.error = Some(format!("Invalid SMILES: {reason}"));
                state.view.exports_enabled = false;

                warn!(
                    target = "application::render::controller",
                    op = "controller::render",
                    result = "invalid",
                    ticket = ticket.0,
                    smiles = %request.smiles,
                    elapsed_ms,
                    reason = %reason,
                    "Render failed; exports disabled"
                );
                RenderOutcome::Failed(RenderFailure::Invalid { reason })
            }
        };

        record_render(&outcome);
        outcome
    }
}

fn superseded(ticket: Ticket) -> RenderOutcome {
    info!(
        target = "application::render::controller",
        op = "controller::render",
        result = "superseded",
        ticket = ticket.0,
        "Discarding stale render"
    );
    let outcome = RenderOutcome::Failed(RenderFailure::Superseded);
    record_render(&outcome);
    outcome
}

fn record_render(outcome: &RenderOutcome) {
    counter!("chemsketch_render_total", "result" => outcome.result_label()).increment(1);
}

fn smiles_preview(smiles: &str) -> String {
    if smiles.chars().count() > FOUND_SMILES_PREVIEW_CHARS {
        format!("{}...", truncate_chars(smiles, FOUND_SMILES_PREVIEW_CHARS))
    } else {
        smiles.to_string()
    }
}

fn lookup_message(name: &str, err: &LookupError) -> String {
    match err {
        LookupError::NotFound => format!("\"{name}\" not found in PubChem"),
        LookupError::Failed { status } => format!("Search failed ({status})"),
        LookupError::NoUsableData => format!("\"{name}\" found but no usable data"),
        LookupError::Network(detail) => format!("Network error: {detail}"),
    }
}

fn lookup_result_label(err: &LookupError) -> &'static str {
    match err {
        LookupError::NotFound => "not_found",
        LookupError::Failed { .. } => "failed",
        LookupError::NoUsableData => "no_usable_data",
        LookupError::Network(_) => "network",
    }
}
