use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Duration, Instant as TickInstant};
use tracing::{debug, error, info};

use crate::core::classify::classify_release;
use crate::core::gesture::GestureSession;
use crate::core::transform;
use crate::models::{
    CardFrame, Decision, DeckState, Point, Profile, SwipeDirection, SwipeIntent, SwipeTuning,
};
use crate::services::{ApiError, FeedClient, Notifier};

/// Buffered gesture commands; bursts beyond this are dropped, not queued
const COMMAND_BUFFER: usize = 256;

/// Errors surfaced by the deck handle
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Deck engine is no longer running")]
    EngineStopped,
}

/// Commands accepted by the deck engine
///
/// Pointer commands carry the host's sample timestamp so velocity is
/// measured against the input stream, not against processing time.
#[derive(Debug)]
pub enum DeckCommand {
    PointerDown { x: f32, y: f32, at: Instant },
    PointerMove { x: f32, y: f32, at: Instant },
    PointerUp,
    /// Programmatic commit, the Like/Pass buttons
    Swipe(SwipeDirection),
    /// Fetch the feed if it was never loaded
    Refresh,
    Inspect(oneshot::Sender<DeckSnapshot>),
}

/// Completions posted back to the engine by its own spawned tasks
#[derive(Debug)]
enum DeckEvent {
    FeedLoaded(Result<Vec<Profile>, ApiError>),
}

/// Candidate queue with its load status
///
/// `NotLoaded` (never fetched) and `Loaded` with an empty queue are
/// distinct on purpose: only the former triggers a refill fetch.
#[derive(Debug)]
enum FeedState {
    NotLoaded,
    Loading,
    Loaded(VecDeque<Profile>),
}

/// Host-facing view of the feed status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    NotLoaded,
    Loading,
    Empty,
    Populated(usize),
}

/// Point-in-time view of the deck for hosts and tests
#[derive(Debug, Clone)]
pub struct DeckSnapshot {
    pub state: DeckState,
    pub feed: FeedPhase,
    pub top: Option<Profile>,
    pub next: Option<Profile>,
}

/// The interaction engine: one task owns the queue, the gesture session,
/// and the transition timer, so queue advance and refill can never
/// interleave
struct DeckEngine {
    state: DeckState,
    feed: FeedState,
    session: Option<GestureSession>,
    tuning: SwipeTuning,
    api: Arc<FeedClient>,
    notifier: Notifier,
    frames: watch::Sender<CardFrame>,
    events: mpsc::Sender<DeckEvent>,
    transition_deadline: Option<TickInstant>,
}

impl DeckEngine {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<DeckCommand>,
        mut events: mpsc::Receiver<DeckEvent>,
    ) {
        info!("Deck engine started");
        loop {
            let deadline = self.transition_deadline;
            tokio::select! {
                maybe_command = commands.recv() => match maybe_command {
                    Some(command) => self.handle_command(command),
                    None => {
                        debug!("Command channel closed, stopping deck engine");
                        break;
                    }
                },
                Some(event) = events.recv() => self.handle_event(event),
                _ = transition_elapsed(deadline) => self.finish_transition(),
            }
        }
    }

    fn handle_command(&mut self, command: DeckCommand) {
        match command {
            DeckCommand::PointerDown { x, y, at } => self.on_pointer_down(Point::new(x, y), at),
            DeckCommand::PointerMove { x, y, at } => self.on_pointer_move(Point::new(x, y), at),
            DeckCommand::PointerUp => self.on_pointer_up(),
            DeckCommand::Swipe(direction) => self.on_swipe(direction),
            DeckCommand::Refresh => self.ensure_loaded(),
            DeckCommand::Inspect(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn handle_event(&mut self, event: DeckEvent) {
        match event {
            DeckEvent::FeedLoaded(Ok(profiles)) => {
                info!("Feed loaded with {} profiles", profiles.len());
                self.feed = FeedState::Loaded(VecDeque::from(profiles));
            }
            DeckEvent::FeedLoaded(Err(e)) => {
                // Back to NotLoaded so the next refresh can retry
                error!("Feed fetch failed: {}", e);
                self.feed = FeedState::NotLoaded;
                self.notifier.error("Failed to load feed");
            }
        }
    }

    fn on_pointer_down(&mut self, point: Point, at: Instant) {
        if self.state != DeckState::Idle {
            debug!("Pointer down ignored in state {:?}", self.state);
            return;
        }
        if self.top().is_none() {
            debug!("Pointer down with no card on deck");
            return;
        }
        self.session = Some(GestureSession::begin(point, at));
        self.state = DeckState::Dragging;
        self.frames
            .send_replace(transform::drag_frame(Point::default(), &self.tuning));
    }

    fn on_pointer_move(&mut self, point: Point, at: Instant) {
        if self.state != DeckState::Dragging {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = session.record(point, at, &self.tuning);
        // watch is a single-slot channel: samples landing between two host
        // paints overwrite each other, the paint always sees the latest
        self.frames
            .send_replace(transform::drag_frame(delta, &self.tuning));
    }

    fn on_pointer_up(&mut self) {
        if self.state != DeckState::Dragging {
            debug!("Pointer up ignored in state {:?}", self.state);
            return;
        }
        let sample = self
            .session
            .take()
            .map(GestureSession::release)
            .unwrap_or_default();

        match classify_release(sample.delta.x, sample.velocity.x, &self.tuning) {
            SwipeIntent::Commit(direction) => self.begin_exit(direction),
            SwipeIntent::Cancel => self.begin_settle(),
        }
    }

    fn on_swipe(&mut self, direction: SwipeDirection) {
        match self.state {
            DeckState::Idle | DeckState::Dragging => {
                self.session = None;
                self.begin_exit(direction);
            }
            _ => debug!("Swipe ignored while card in transition"),
        }
    }

    /// Start the fly-off transition and commit the decision
    ///
    /// The decision is dispatched immediately; the animation duration is
    /// cosmetic and never gates submission.
    fn begin_exit(&mut self, direction: SwipeDirection) {
        let Some(profile) = self.top() else {
            debug!("No card to commit");
            self.state = DeckState::Idle;
            return;
        };
        let decision = Decision {
            profile_id: profile.id.clone(),
            outcome: direction.outcome(),
        };
        info!(
            "Committing {} for {}",
            decision.outcome.as_str(),
            decision.profile_id
        );
        self.submit_decision(decision);

        self.state = DeckState::Exiting(direction);
        self.frames
            .send_replace(transform::fly_off_frame(direction, &self.tuning));
        self.arm_transition(self.tuning.fly_duration_ms);
    }

    fn begin_settle(&mut self) {
        self.state = DeckState::Settling;
        self.frames
            .send_replace(transform::settle_frame(&self.tuning));
        self.arm_transition(self.tuning.settle_duration_ms);
    }

    fn arm_transition(&mut self, duration_ms: u64) {
        self.transition_deadline = Some(TickInstant::now() + Duration::from_millis(duration_ms));
    }

    /// Timer-driven exit from `Exiting`/`Settling`, the only path back to
    /// `Idle`
    fn finish_transition(&mut self) {
        self.transition_deadline = None;
        match self.state {
            DeckState::Exiting(direction) => {
                debug!("Exit transition finished ({:?})", direction);
                self.advance_queue();
                self.state = DeckState::Idle;
                self.frames.send_replace(transform::rest_frame());
            }
            DeckState::Settling => {
                self.state = DeckState::Idle;
                self.frames.send_replace(transform::rest_frame());
            }
            _ => {}
        }
    }

    /// Pop the committed card; an emptied queue stays `Loaded`, it never
    /// falls back to `NotLoaded`
    fn advance_queue(&mut self) {
        if let FeedState::Loaded(queue) = &mut self.feed {
            if let Some(done) = queue.pop_front() {
                debug!("Advanced past {}", done.id);
            }
            if queue.is_empty() {
                info!("Feed exhausted");
            }
        }
    }

    /// Issue a refill fetch only when the feed was never loaded;
    /// concurrent calls collapse onto the in-flight fetch
    fn ensure_loaded(&mut self) {
        match self.feed {
            FeedState::NotLoaded => {
                self.feed = FeedState::Loading;
                let api = Arc::clone(&self.api);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = api.fetch_feed().await;
                    let _ = events.send(DeckEvent::FeedLoaded(result)).await;
                });
            }
            FeedState::Loading => debug!("Feed fetch already in flight"),
            FeedState::Loaded(_) => debug!("Feed already loaded"),
        }
    }

    /// Detached, best-effort decision dispatch; failure is reported and
    /// never rolls the queue back
    fn submit_decision(&self, decision: Decision) {
        let api = Arc::clone(&self.api);
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = api.send_decision(&decision).await {
                error!(
                    "Decision submission failed for {}: {}",
                    decision.profile_id, e
                );
                notifier.error("Action failed. Try again.");
            }
        });
    }

    fn top(&self) -> Option<&Profile> {
        match &self.feed {
            FeedState::Loaded(queue) => queue.front(),
            _ => None,
        }
    }

    fn snapshot(&self) -> DeckSnapshot {
        let (feed, top, next) = match &self.feed {
            FeedState::NotLoaded => (FeedPhase::NotLoaded, None, None),
            FeedState::Loading => (FeedPhase::Loading, None, None),
            FeedState::Loaded(queue) if queue.is_empty() => (FeedPhase::Empty, None, None),
            FeedState::Loaded(queue) => (
                FeedPhase::Populated(queue.len()),
                queue.front().cloned(),
                queue.get(1).cloned(),
            ),
        };
        DeckSnapshot {
            state: self.state,
            feed,
            top,
            next,
        }
    }
}

async fn transition_elapsed(deadline: Option<TickInstant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Handle for driving a spawned deck engine
///
/// Pointer commands are lossy (`try_send`): the input stream must never
/// back-pressure the host's UI thread, so bursts beyond the buffer are
/// dropped. Control commands (`swipe`, `refresh`) are awaited sends.
///
/// While a drag is active the host must suppress its default touch
/// scrolling, otherwise the platform consumes the move events.
#[derive(Debug, Clone)]
pub struct DeckHandle {
    commands: mpsc::Sender<DeckCommand>,
    frames: watch::Receiver<CardFrame>,
}

impl DeckHandle {
    /// Spawn the engine task and return its handle
    ///
    /// Dropping every handle closes the command channel and stops the
    /// engine, which discards any pending transition timer and session.
    pub fn spawn(api: Arc<FeedClient>, tuning: SwipeTuning, notifier: Notifier) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(8);
        let (frame_tx, frame_rx) = watch::channel(CardFrame::default());

        let engine = DeckEngine {
            state: DeckState::Idle,
            feed: FeedState::NotLoaded,
            session: None,
            tuning,
            api,
            notifier,
            frames: frame_tx,
            events: event_tx,
            transition_deadline: None,
        };
        tokio::spawn(engine.run(command_rx, event_rx));

        Self {
            commands: command_tx,
            frames: frame_rx,
        }
    }

    /// Subscribe to card frames; the receiver always holds the most
    /// recently published frame
    pub fn frames(&self) -> watch::Receiver<CardFrame> {
        self.frames.clone()
    }

    pub fn pointer_down(&self, x: f32, y: f32, at: Instant) {
        self.lossy_send(DeckCommand::PointerDown { x, y, at });
    }

    pub fn pointer_move(&self, x: f32, y: f32, at: Instant) {
        self.lossy_send(DeckCommand::PointerMove { x, y, at });
    }

    /// Release the active gesture; also the right call when the pointer
    /// leaves the tracked element mid-drag
    pub fn pointer_up(&self) {
        self.lossy_send(DeckCommand::PointerUp);
    }

    /// Commit the top card programmatically (Like/Pass buttons)
    pub async fn swipe(&self, direction: SwipeDirection) -> Result<(), DeckError> {
        self.commands
            .send(DeckCommand::Swipe(direction))
            .await
            .map_err(|_| DeckError::EngineStopped)
    }

    /// Fetch the feed if it was never loaded; a no-op otherwise
    pub async fn refresh(&self) -> Result<(), DeckError> {
        self.commands
            .send(DeckCommand::Refresh)
            .await
            .map_err(|_| DeckError::EngineStopped)
    }

    /// Query the engine for its current state
    pub async fn snapshot(&self) -> Result<DeckSnapshot, DeckError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(DeckCommand::Inspect(tx))
            .await
            .map_err(|_| DeckError::EngineStopped)?;
        rx.await.map_err(|_| DeckError::EngineStopped)
    }

    fn lossy_send(&self, command: DeckCommand) {
        if let Err(e) = self.commands.try_send(command) {
            debug!("Dropping gesture command: {}", e);
        }
    }
}
