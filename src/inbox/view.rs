//! Event loop and command handlers for a mounted inbox view.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use super::{AssistantView, Command, ComposerView, InboxDeps, InboxEvent, InboxSnapshot, ViewportView};
use crate::config::InboxConfig;
use crate::error::ErrorCode;
use crate::keymap::{self, InputTarget, KeyChord, ShortcutAction};
use crate::services::clock::{Clock, display_time};
use crate::services::random::RandomSource;
use crate::services::responder::{Responder, ResponderError, ResponderRequest};
use crate::services::timers::{Expired, TimerSet};
use crate::state::assistant::{Admission, AiSession, AiStatus, QuickAction, SessionError, Submission};
use crate::state::composer::Composer;
use crate::state::conversation::{CANNED_CUSTOMER_REPLIES, ConversationStore, CustomerProfile, Sender};
use crate::state::viewport::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKey {
    ResizeDebounce,
    ScrollSettle,
    Generation,
    FocusComposer,
    QuickActionSubmit,
}

/// Timer continuations posted back to the loop.
enum Fired {
    ResizeSettled,
    ScrollSettled,
    Generated { ticket: u64, result: Result<String, ResponderError> },
    CustomerReply { content: &'static str },
    FocusComposer,
    QuickActionSubmit,
}

pub(super) struct InboxView {
    config: InboxConfig,
    profile: CustomerProfile,
    conversation: ConversationStore,
    composer: Composer,
    assistant: AiSession,
    viewport: ViewportState,
    pending_width: Option<u32>,
    responder: Arc<dyn Responder>,
    random: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    timers: TimerSet<TimerKey, Fired>,
    fired: mpsc::UnboundedReceiver<Expired<TimerKey, Fired>>,
    events: broadcast::Sender<InboxEvent>,
}

impl InboxView {
    pub(super) fn new(config: InboxConfig, deps: InboxDeps, events: broadcast::Sender<InboxEvent>) -> Self {
        let (fired_tx, fired) = mpsc::unbounded_channel();
        Self {
            viewport: ViewportState::new(config.mobile_breakpoint_px),
            config,
            profile: CustomerProfile::demo(),
            conversation: ConversationStore::demo_thread(),
            composer: Composer::default(),
            assistant: AiSession::default(),
            pending_width: None,
            responder: deps.responder,
            random: deps.random,
            clock: deps.clock,
            timers: TimerSet::new(fired_tx),
            fired,
            events,
        }
    }

    pub(super) async fn run(mut self, mut commands: mpsc::Receiver<Command>, mut widths: watch::Receiver<u32>) {
        let initial = *widths.borrow_and_update();
        info!(width_px = initial, "inbox mounted");
        self.evaluate_viewport(initial);

        let mut widths_open = true;
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown(ack)) => {
                        let cancelled = self.teardown();
                        let _ = ack.send(cancelled);
                        return;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(expired) = self.fired.recv() => {
                    if let Some(fired) = self.timers.accept(expired) {
                        self.handle_fired(fired);
                    }
                }
                changed = widths.changed(), if widths_open => {
                    if changed.is_ok() {
                        self.pending_width = Some(*widths.borrow_and_update());
                        self.timers.schedule_keyed(
                            TimerKey::ResizeDebounce,
                            self.config.resize_debounce,
                            Fired::ResizeSettled,
                        );
                    } else {
                        debug!("viewport source closed");
                        widths_open = false;
                    }
                }
            }
        }
        self.teardown();
    }

    fn teardown(&mut self) -> usize {
        let cancelled = self.timers.cancel_all();
        info!(cancelled, messages = self.conversation.len(), "inbox torn down");
        cancelled
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetDraft(text) => self.composer.set_draft(text),
            Command::SendMessage => self.send_agent_message(),
            Command::SetQuery(text) => {
                if !self.assistant.set_query(text) {
                    debug!("query edit ignored: generating");
                }
            }
            Command::SubmitQuery => {
                let admission = self.assistant.submit();
                self.admit(admission);
            }
            Command::Ask(text) => {
                let admission = self.assistant.submit_text(&text);
                self.admit(admission);
            }
            Command::AddResponseToComposer => self.add_response_to_composer(),
            Command::QuickAction(action) => self.quick_action(action),
            Command::TogglePanel => {
                let visible = self.viewport.toggle_panel();
                self.emit(InboxEvent::PanelVisibility { visible });
            }
            Command::ClosePanel => {
                self.viewport.close_panel();
                self.emit(InboxEvent::PanelVisibility { visible: false });
            }
            Command::KeyPress { target, chord } => self.key_press(target, chord),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            // Handled by the loop before dispatch.
            Command::Shutdown(_) => {}
        }
    }

    fn send_agent_message(&mut self) {
        let Some(content) = self.composer.take_outgoing() else {
            debug!("send ignored: blank draft");
            return;
        };
        let time = display_time(self.clock.now());
        self.append(Sender::Agent, content, time);

        if self.random.chance(self.config.reply_probability) {
            let delay = self.random.delay_in(self.config.reply_delay);
            let content = CANNED_CUSTOMER_REPLIES[self.random.index(CANNED_CUSTOMER_REPLIES.len())];
            debug!(delay_ms = millis(delay), "customer reply scheduled");
            self.timers.schedule(delay, Fired::CustomerReply { content });
        }
    }

    fn admit(&mut self, admission: Admission) {
        match admission {
            Admission::Accepted(submission) => self.start_generation(submission),
            Admission::Blank => debug!("query ignored: blank"),
            Admission::Busy => debug!("query rejected: generation in flight"),
        }
    }

    fn start_generation(&mut self, submission: Submission) {
        let delay = self.random.delay_in(self.config.generation_delay);
        let timeout = self.config.responder_timeout;
        let responder = Arc::clone(&self.responder);
        let ticket = submission.ticket;
        let request = ResponderRequest { query: submission.query.clone(), context: submission.prior_context };

        info!(ticket, delay_ms = millis(delay), context_len = request.context.len(), "generation started");
        if self.timers.cancel(TimerKey::QuickActionSubmit) {
            debug!("pending quick action dropped: generation started");
        }
        self.emit(InboxEvent::GenerationStarted { query: submission.query });
        self.timers.spawn_keyed(TimerKey::Generation, delay, async move {
            let result = generate(responder.as_ref(), &request, timeout).await;
            Fired::Generated { ticket, result }
        });
    }

    fn add_response_to_composer(&mut self) {
        let Some(response) = self.assistant.response().map(str::to_owned) else {
            debug!("add to composer ignored: no response");
            return;
        };
        self.composer.set_draft(response);
        self.timers
            .schedule_keyed(TimerKey::FocusComposer, self.config.focus_delay, Fired::FocusComposer);
    }

    fn quick_action(&mut self, action: QuickAction) {
        if self.assistant.status() == AiStatus::Generating {
            debug!(action = action.as_str(), "quick action ignored: generating");
            return;
        }
        self.assistant.set_query(action.phrase());
        self.timers.schedule_keyed(
            TimerKey::QuickActionSubmit,
            self.config.quick_action_delay,
            Fired::QuickActionSubmit,
        );
    }

    fn key_press(&mut self, target: InputTarget, chord: KeyChord) {
        match keymap::resolve(target, chord) {
            Some(ShortcutAction::SendMessage) => self.send_agent_message(),
            Some(ShortcutAction::SubmitQuery) => {
                let admission = self.assistant.submit();
                self.admit(admission);
            }
            None => {}
        }
    }

    // =========================================================================
    // TIMERS
    // =========================================================================

    fn handle_fired(&mut self, fired: Fired) {
        match fired {
            Fired::ResizeSettled => {
                if let Some(width) = self.pending_width.take() {
                    self.evaluate_viewport(width);
                }
            }
            Fired::ScrollSettled => {
                if let Some(latest) = self.conversation.latest() {
                    let message_id = latest.id;
                    self.emit(InboxEvent::ScrollToLatest { message_id });
                }
            }
            Fired::Generated { ticket, result } => self.finish_generation(ticket, result),
            Fired::CustomerReply { content } => {
                let time = display_time(self.clock.now());
                self.append(Sender::Customer, content, time);
            }
            Fired::FocusComposer => self.emit(InboxEvent::FocusComposer),
            Fired::QuickActionSubmit => {
                let admission = self.assistant.submit();
                self.admit(admission);
            }
        }
    }

    fn finish_generation(&mut self, ticket: u64, result: Result<String, ResponderError>) {
        match result {
            Ok(response) => {
                if self.assistant.resolve(ticket, response.clone()) {
                    info!(ticket, response_len = response.len(), "generation finished");
                    self.emit(InboxEvent::ResponseReady { response });
                } else {
                    debug!(ticket, "stale generation result dropped");
                }
            }
            Err(err) => {
                warn!(ticket, code = err.error_code(), error = %err, "generation failed");
                let error = SessionError::from_error(&err);
                if self.assistant.fail(ticket, error.clone()) {
                    self.emit(InboxEvent::GenerationFailed { error });
                }
            }
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn append(&mut self, sender: Sender, content: impl Into<String>, time: String) {
        let message = self.conversation.append(sender, content, time).clone();
        info!(id = message.id, sender = ?message.sender, "message appended");
        self.timers
            .schedule_keyed(TimerKey::ScrollSettle, self.config.scroll_settle, Fired::ScrollSettled);
        self.emit(InboxEvent::MessageAppended { message });
    }

    fn evaluate_viewport(&mut self, width_px: u32) {
        let change = self.viewport.evaluate(width_px);
        if change.panel_forced_hidden {
            info!(width_px, "mobile viewport: assistant panel hidden");
        }
        debug!(width_px, is_mobile = change.is_mobile, "viewport evaluated");
        self.emit(InboxEvent::ViewportEvaluated {
            width_px,
            is_mobile: change.is_mobile,
            panel_visible: change.panel_visible,
        });
    }

    fn emit(&self, event: InboxEvent) {
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }

    fn snapshot(&self) -> InboxSnapshot {
        let assistant = &self.assistant;
        InboxSnapshot {
            profile: self.profile.clone(),
            messages: self.conversation.messages().to_vec(),
            composer: ComposerView { draft: self.composer.draft().to_owned(), can_send: self.composer.can_send() },
            assistant: AssistantView {
                query: assistant.query().to_owned(),
                status: assistant.status(),
                query_input_enabled: assistant.query_input_enabled(),
                can_submit: assistant.can_submit(),
                quick_actions_enabled: assistant.status() == AiStatus::Idle,
                recent_queries: assistant.recent_context(self.config.recent_query_limit).to_vec(),
                context_len: assistant.context().len(),
                response: assistant.response().map(str::to_owned),
                last_error: assistant.last_error().cloned(),
            },
            viewport: ViewportView {
                width_px: self.viewport.width_px(),
                is_mobile: self.viewport.is_mobile(),
                panel_visible: self.viewport.panel_visible(),
                show_mobile_chrome: self.viewport.show_mobile_chrome(),
                backdrop_active: self.viewport.backdrop_active(),
            },
            pending_timers: self.timers.pending(),
        }
    }
}

/// Call the responder under `timeout`, rejecting blank output.
async fn generate(
    responder: &dyn Responder,
    request: &ResponderRequest,
    timeout: Duration,
) -> Result<String, ResponderError> {
    let response = tokio::time::timeout(timeout, responder.respond(request))
        .await
        .map_err(|_| ResponderError::Timeout { after_ms: millis(timeout) })??;
    if response.trim().is_empty() {
        return Err(ResponderError::EmptyResponse);
    }
    Ok(response)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
