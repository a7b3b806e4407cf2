// Application state and orchestration logic.
//
// The central event loop that applies session snapshots from the poller and
// user commands from the front end to the roster, and pushes recomputed
// reports back to the front end.

use chrono::{DateTime, Utc};
use pickwise_core::catalog::Catalog;
use pickwise_core::engine::{Advisor, Report, Settings};
use pickwise_core::roster::RosterState;
use pickwise_core::session::apply_snapshot;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::protocol::{SourceStatus, UiUpdate, UserCommand};
use crate::sources::catalog::LoadedCatalog;
use crate::sources::session::SessionEvent;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub roster: RosterState,
    pub settings: Settings,
    pub session_available: bool,
    pub catalog_available: bool,
    pub patch: Option<String>,
    pub last_snapshot: Option<DateTime<Utc>>,
    /// Last computed report; `None` after any roster or settings change.
    report: Option<Report>,
}

impl AppState {
    pub fn new(config: Config, loaded: LoadedCatalog) -> Self {
        let settings = config.settings;
        AppState {
            config,
            catalog: loaded.catalog,
            roster: RosterState::new(),
            settings,
            session_available: false,
            catalog_available: loaded.available,
            patch: loaded.patch,
            last_snapshot: None,
            report: None,
        }
    }

    /// Current report, recomputed only when something changed since the
    /// last call.
    pub fn report(&mut self) -> &Report {
        let (catalog, roster, settings) = (&self.catalog, &self.roster, self.settings);
        self.report
            .get_or_insert_with(|| Advisor::new(catalog, roster, settings).report())
    }

    fn invalidate(&mut self) {
        self.report = None;
    }

    pub fn source_status(&self) -> SourceStatus {
        SourceStatus {
            session_available: self.session_available,
            catalog_available: self.catalog_available,
            patch: self.patch.clone(),
            last_snapshot: self.last_snapshot,
        }
    }

    /// Catalog id for user input: exact match first, then a match ignoring
    /// case, spaces and punctuation (`"jarvan iv"` -> `"JarvanIV"`).
    pub fn resolve_id(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if self.catalog.contains(input) {
            return Some(input.to_string());
        }
        let wanted = fold(input);
        if wanted.is_empty() {
            return None;
        }
        self.catalog
            .iter()
            .find(|e| fold(&e.id) == wanted)
            .map(|e| e.id.clone())
    }
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` or the command channel
/// closes. The session channel closing only stops session handling.
pub async fn run(
    mut session_rx: mpsc::Receiver<SessionEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    // When the session channel closes we stop polling it so tokio::select!
    // never spins on it.
    let mut session_open = true;

    let _ = ui_tx.send(UiUpdate::SourceStatus(state.source_status())).await;
    send_report(&mut state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- Session snapshots ---
            event = session_rx.recv(), if session_open => {
                match event {
                    Some(event) => {
                        handle_session_event(&mut state, event, &ui_tx).await;
                    }
                    None => {
                        info!("Session channel closed");
                        session_open = false;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn send_report(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let roster = Box::new(state.roster.clone());
    let report = Box::new(state.report().clone());
    let _ = ui_tx.send(UiUpdate::Report { roster, report }).await;
}

async fn set_session_available(
    state: &mut AppState,
    available: bool,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if state.session_available != available {
        info!(
            "Session source {}",
            if available { "connected" } else { "searching" }
        );
        state.session_available = available;
        let _ = ui_tx.send(UiUpdate::SourceStatus(state.source_status())).await;
    }
}

/// Apply one poll outcome. Failed polls leave the roster untouched.
async fn handle_session_event(
    state: &mut AppState,
    event: SessionEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        SessionEvent::Snapshot(snapshot) => {
            state.last_snapshot = Some(Utc::now());
            set_session_available(state, true, ui_tx).await;
            if apply_snapshot(&mut state.roster, &snapshot) {
                debug!("Session snapshot changed the roster");
                state.invalidate();
                send_report(state, ui_tx).await;
            }
        }
        SessionEvent::NoData | SessionEvent::Unavailable => {
            set_session_available(state, false, ui_tx).await;
        }
    }
}

async fn notice(ui_tx: &mpsc::Sender<UiUpdate>, message: String) {
    let _ = ui_tx.send(UiUpdate::Notice(message)).await;
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let changed = match cmd {
        UserCommand::Assign { slot, id } => {
            let Some(resolved) = state.resolve_id(&id) else {
                warn!("Rejected assignment of unknown id '{}'", id);
                notice(ui_tx, format!("unknown champion '{}'", id.trim())).await;
                return;
            };
            match state.roster.assign(slot, &resolved) {
                Ok(changed) => {
                    info!("Assigned {} to {}", resolved, slot);
                    changed
                }
                Err(e) => {
                    notice(ui_tx, e.to_string()).await;
                    return;
                }
            }
        }
        UserCommand::Clear(slot) => match state.roster.clear(slot) {
            Ok(changed) => changed,
            Err(e) => {
                notice(ui_tx, e.to_string()).await;
                return;
            }
        },
        UserCommand::ClearAll => {
            info!("Clearing all slots");
            state.roster.clear_all()
        }
        UserCommand::SetPhase(phase) => {
            let changed = state.settings.phase != phase;
            state.settings.phase = phase;
            changed
        }
        UserCommand::SetStrictness(strictness) => {
            let changed = state.settings.strictness != strictness;
            state.settings.strictness = strictness;
            changed
        }
        UserCommand::SetRole(role) => {
            let changed = state.settings.role != role;
            state.settings.role = role;
            changed
        }
        UserCommand::Need(attr) => {
            let candidates =
                Advisor::new(&state.catalog, &state.roster, state.settings).targeted_candidates(attr);
            debug!("Targeted ranking for {}: {} candidates", attr.label(), candidates.len());
            let _ = ui_tx.send(UiUpdate::Targeted { attr, candidates }).await;
            return;
        }
        UserCommand::Refresh => {
            let _ = ui_tx.send(UiUpdate::SourceStatus(state.source_status())).await;
            send_report(state, ui_tx).await;
            return;
        }
        // Handled by the event loop.
        UserCommand::Quit => return,
    };

    if changed {
        state.invalidate();
        send_report(state, ui_tx).await;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
