//! Inbox view: conversation, composer and AI assistant panel.
//!
//! ARCHITECTURE
//! ============
//! The view runs as a single task that owns all state. Callers talk to it
//! through a cloneable [`InboxHandle`] (commands over an mpsc queue) and
//! observe it through [`InboxEvent`]s (broadcast) and [`InboxSnapshot`]s.
//! Width changes arrive on a `watch` channel so any source (a window, a
//! terminal, a test) can drive the viewport.
//!
//! TIMERS
//! ======
//! - resize debounce (quiet period before re-evaluating mobile mode)
//! - scroll settle after each append
//! - simulated generation latency (random), followed by the responder call
//! - simulated customer reply (random delay, probability-gated)
//! - focus-after-copy and quick action submit
//!
//! All of them are registered with the view's `TimerSet` and aborted on
//! teardown, so nothing mutates state after the view is gone.

mod view;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use crate::config::InboxConfig;
use crate::error::InboxError;
use crate::keymap::{InputTarget, KeyChord};
use crate::services::clock::{Clock, SystemClock};
use crate::services::random::{RandomSource, RngSource};
use crate::services::responder::{CannedResponder, Responder};
use crate::state::assistant::{AiStatus, QuickAction, SessionError};
use crate::state::conversation::{CustomerProfile, Message};


const COMMAND_QUEUE_CAPACITY: usize = 64;
const EVENT_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// DEPENDENCIES
// =============================================================================

/// Injected collaborators for a view instance.
pub struct InboxDeps {
    pub responder: Arc<dyn Responder>,
    pub random: Box<dyn RandomSource>,
    pub clock: Arc<dyn Clock>,
}

impl InboxDeps {
    /// Canned responder, `rand`-backed randomness and the system clock.
    #[must_use]
    pub fn standard(config: &InboxConfig) -> Self {
        Self {
            responder: Arc::new(CannedResponder),
            random: Box::new(RngSource::new(config.random_seed)),
            clock: Arc::new(SystemClock),
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Notifications for whatever renders the view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboxEvent {
    MessageAppended { message: Message },
    /// Layout has settled; scroll the thread to this message.
    ScrollToLatest { message_id: u64 },
    GenerationStarted { query: String },
    ResponseReady { response: String },
    GenerationFailed { error: SessionError },
    /// Move keyboard focus to the composer input.
    FocusComposer,
    ViewportEvaluated { width_px: u32, is_mobile: bool, panel_visible: bool },
    PanelVisibility { visible: bool },
}

// =============================================================================
// SNAPSHOT
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct ComposerView {
    pub draft: String,
    pub can_send: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssistantView {
    pub query: String,
    pub status: AiStatus,
    pub query_input_enabled: bool,
    pub can_submit: bool,
    pub quick_actions_enabled: bool,
    /// Tail of the query history shown as "recent queries".
    pub recent_queries: Vec<String>,
    pub context_len: usize,
    pub response: Option<String>,
    pub last_error: Option<SessionError>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ViewportView {
    pub width_px: Option<u32>,
    pub is_mobile: bool,
    pub panel_visible: bool,
    pub show_mobile_chrome: bool,
    pub backdrop_active: bool,
}

/// Everything a renderer needs to draw the view.
#[derive(Clone, Debug, Serialize)]
pub struct InboxSnapshot {
    pub profile: CustomerProfile,
    pub messages: Vec<Message>,
    pub composer: ComposerView,
    pub assistant: AssistantView,
    pub viewport: ViewportView,
    pub pending_timers: usize,
}

// =============================================================================
// HANDLE
// =============================================================================

pub(crate) enum Command {
    SetDraft(String),
    SendMessage,
    SetQuery(String),
    SubmitQuery,
    Ask(String),
    AddResponseToComposer,
    QuickAction(QuickAction),
    TogglePanel,
    ClosePanel,
    KeyPress { target: InputTarget, chord: KeyChord },
    Snapshot(oneshot::Sender<InboxSnapshot>),
    Shutdown(oneshot::Sender<usize>),
}

/// Cloneable handle to a running view.
///
/// The view tears itself down when [`InboxHandle::shutdown`] is called or
/// when the last handle is dropped.
#[derive(Clone)]
pub struct InboxHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<InboxEvent>,
}

/// Mount a view. The current value of `viewport` is evaluated immediately;
/// later changes are debounced.
#[must_use]
pub fn spawn_inbox(config: InboxConfig, deps: InboxDeps, viewport: watch::Receiver<u32>) -> InboxHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let view = view::InboxView::new(config, deps, events.clone());
    tokio::spawn(view.run(command_rx, viewport));
    InboxHandle { commands: command_tx, events }
}

/// Mount a view configured from `INBOX_*` environment variables with the
/// standard collaborators.
///
/// # Errors
///
/// Returns [`InboxError::Config`] if the environment yields an invalid
/// configuration.
pub fn spawn_inbox_from_env(viewport: watch::Receiver<u32>) -> Result<InboxHandle, InboxError> {
    let config = InboxConfig::from_env()?;
    let deps = InboxDeps::standard(&config);
    Ok(spawn_inbox(config, deps, viewport))
}

impl InboxHandle {
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<InboxEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Replace the composer draft.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn set_draft(&self, text: impl Into<String>) -> Result<(), InboxError> {
        self.send(Command::SetDraft(text.into())).await
    }

    /// Send the composer draft as an agent message. Blank drafts are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn send_message(&self) -> Result<(), InboxError> {
        self.send(Command::SendMessage).await
    }

    /// Replace the assistant query draft. Ignored while generating.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn set_query(&self, text: impl Into<String>) -> Result<(), InboxError> {
        self.send(Command::SetQuery(text.into())).await
    }

    /// Submit the current query draft through the admission gate.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn submit_query(&self) -> Result<(), InboxError> {
        self.send(Command::SubmitQuery).await
    }

    /// Submit `text` directly through the admission gate.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn ask(&self, text: impl Into<String>) -> Result<(), InboxError> {
        self.send(Command::Ask(text.into())).await
    }

    /// Copy the last assistant response into the composer.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn add_response_to_composer(&self) -> Result<(), InboxError> {
        self.send(Command::AddResponseToComposer).await
    }

    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn quick_action(&self, action: QuickAction) -> Result<(), InboxError> {
        self.send(Command::QuickAction(action)).await
    }

    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn toggle_panel(&self) -> Result<(), InboxError> {
        self.send(Command::TogglePanel).await
    }

    /// Backdrop click or close button.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn close_panel(&self) -> Result<(), InboxError> {
        self.send(Command::ClosePanel).await
    }

    /// Deliver a key press to an input; shortcuts trigger send or submit.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn key_press(&self, target: InputTarget, chord: KeyChord) -> Result<(), InboxError> {
        self.send(Command::KeyPress { target, chord }).await
    }

    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view has been torn down.
    pub async fn snapshot(&self) -> Result<InboxSnapshot, InboxError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| InboxError::Closed)
    }

    /// Tear the view down, cancelling every pending timer. Returns how many
    /// timers were cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Closed`] if the view was already torn down.
    pub async fn shutdown(&self) -> Result<usize, InboxError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown(tx)).await?;
        rx.await.map_err(|_| InboxError::Closed)
    }

    async fn send(&self, command: Command) -> Result<(), InboxError> {
        self.commands.send(command).await.map_err(|_| InboxError::Closed)
    }
}
