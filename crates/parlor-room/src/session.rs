//! Session controller: one descriptor, one room connection, observed state.

use crate::bootstrap::ConnectionSource;
use crate::connector::{RoomConnection, RoomConnector, SessionOptions};
use crate::control::{banner_for, ControlAffordance};
use crate::error::{RoomError, DEVICE_FAILURE_ALERT};
use crate::visualizer::BarVisualizer;
use parlor_types::{AgentState, ConnectionDescriptor, JoinRequest};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

type StateObserver = Arc<dyn Fn(AgentState) + Send + Sync>;
type AlertHandler = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct Inner {
    /// Bumped by every connect attempt and every disconnect. Work tagged with
    /// an older generation is stale and gets dropped.
    generation: u64,
    pending: bool,
    descriptor: Option<ConnectionDescriptor>,
    connection: Option<Arc<dyn RoomConnection>>,
    forwarder: Option<JoinHandle<()>>,
    agent_state: AgentState,
    /// Set once the agent reports a working state in the current session.
    agent_joined: bool,
}

#[derive(Default)]
struct Shared {
    inner: Mutex<Inner>,
    observers: Mutex<Vec<StateObserver>>,
    device_alert: Mutex<Option<AlertHandler>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("room session lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn notify(&self, state: AgentState) {
        let observers = match self.observers.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        for observer in observers {
            observer(state);
        }
    }

    /// Records an externally reported state for `generation`.
    fn apply(&self, generation: u64, state: AgentState) {
        {
            let mut inner = self.lock();
            if inner.generation != generation || inner.agent_state == state {
                return;
            }
            inner.agent_state = state;
            if matches!(
                state,
                AgentState::Listening | AgentState::Thinking | AgentState::Speaking
            ) {
                inner.agent_joined = true;
            }
        }
        self.notify(state);
    }

    /// The SDK closed the session on its own.
    fn remote_closed(&self, generation: u64) {
        {
            let mut inner = self.lock();
            if inner.generation != generation {
                return;
            }
            inner.generation += 1;
            inner.descriptor = None;
            inner.connection = None;
            inner.forwarder = None;
            inner.agent_joined = false;
            if inner.agent_state == AgentState::Disconnected {
                return;
            }
            inner.agent_state = AgentState::Disconnected;
        }
        info!("room session closed by remote side");
        self.notify(AgentState::Disconnected);
    }

    fn alert_device_failure(&self) {
        let handler = match self.device_alert.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        match handler {
            Some(handler) => handler(DEVICE_FAILURE_ALERT),
            None => error!("{}", DEVICE_FAILURE_ALERT),
        }
    }
}

/// Relays reported states until the SDK drops its sender.
fn spawn_forwarder(
    shared: Arc<Shared>,
    generation: u64,
    mut states: watch::Receiver<AgentState>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let state = *states.borrow_and_update();
            shared.apply(generation, state);
            if states.changed().await.is_err() {
                shared.remote_closed(generation);
                break;
            }
        }
    })
}

/// Holds at most one room session at a time.
///
/// The displayed [`AgentState`] only changes when the external session
/// reports a change, or when the session ends.
pub struct RoomSession {
    shared: Arc<Shared>,
    source: Arc<dyn ConnectionSource>,
    connector: Arc<dyn RoomConnector>,
    join: JoinRequest,
    options: SessionOptions,
    visualizer: BarVisualizer,
}

impl std::fmt::Debug for RoomSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("RoomSession")
            .field("join", &self.join)
            .field("options", &self.options)
            .field("descriptor", &inner.descriptor)
            .field("agent_state", &inner.agent_state)
            .finish()
    }
}

impl RoomSession {
    pub fn new(
        source: Arc<dyn ConnectionSource>,
        connector: Arc<dyn RoomConnector>,
        join: JoinRequest,
    ) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            source,
            connector,
            join,
            options: SessionOptions::default(),
            visualizer: BarVisualizer::default(),
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_visualizer(mut self, visualizer: BarVisualizer) -> Self {
        self.visualizer = visualizer;
        self
    }

    /// Registers a callback invoked on every reported agent state change.
    pub fn on_state_change<F>(&self, observer: F)
    where
        F: Fn(AgentState) + Send + Sync + 'static,
    {
        match self.shared.observers.lock() {
            Ok(mut guard) => guard.push(Arc::new(observer)),
            Err(poisoned) => poisoned.into_inner().push(Arc::new(observer)),
        }
    }

    /// Replaces the handler that shows [`DEVICE_FAILURE_ALERT`] to the user.
    /// Without one, the alert is logged.
    pub fn on_device_failure<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        match self.shared.device_alert.lock() {
            Ok(mut guard) => *guard = Some(Arc::new(handler)),
            Err(poisoned) => *poisoned.into_inner() = Some(Arc::new(handler)),
        }
    }

    pub fn agent_state(&self) -> AgentState {
        self.shared.lock().agent_state
    }

    pub fn descriptor(&self) -> Option<ConnectionDescriptor> {
        self.shared.lock().descriptor.clone()
    }

    pub fn is_active(&self) -> bool {
        let inner = self.shared.lock();
        inner.pending || inner.descriptor.is_some()
    }

    pub fn affordance(&self) -> ControlAffordance {
        ControlAffordance::for_state(self.agent_state())
    }

    /// The "assistant is speaking" banner, shown only in `speaking`.
    pub fn banner(&self) -> Option<&'static str> {
        banner_for(self.agent_state())
    }

    /// `true` while a session is held but the agent has not yet reported
    /// listening, thinking or speaking.
    ///
    /// Purely derived from reported states. The caller decides how long to
    /// wait before telling the user that no agent joined.
    pub fn awaiting_agent(&self) -> bool {
        let inner = self.shared.lock();
        (inner.pending || inner.descriptor.is_some()) && !inner.agent_joined
    }

    /// Current bar heights for the agent's audio track.
    pub fn bar_levels(&self) -> Vec<f32> {
        let (state, audio) = {
            let inner = self.shared.lock();
            let audio = inner
                .connection
                .as_ref()
                .and_then(|connection| connection.agent_audio());
            (inner.agent_state, audio)
        };
        let frame = audio.map(|track| track.latest());
        self.visualizer.levels(state, frame.as_deref())
    }

    /// Requests a descriptor and opens the room.
    ///
    /// Fails with [`RoomError::AlreadyConnected`] while a session is held or
    /// being opened, and with [`RoomError::Cancelled`] when
    /// [`disconnect`](Self::disconnect) ran while this attempt was in flight.
    pub async fn connect(&self) -> Result<ConnectionDescriptor, RoomError> {
        let generation = {
            let mut inner = self.shared.lock();
            if inner.pending || inner.descriptor.is_some() {
                return Err(RoomError::AlreadyConnected);
            }
            inner.pending = true;
            inner.agent_joined = false;
            inner.generation += 1;
            inner.generation
        };

        let fetched = self.source.fetch(&self.join).await;

        let descriptor = {
            let mut inner = self.shared.lock();
            if inner.generation != generation {
                info!("discarding bootstrap response for abandoned attempt");
                return Err(RoomError::Cancelled);
            }
            inner.pending = false;
            let descriptor = fetched?;
            inner.descriptor = Some(descriptor.clone());
            descriptor
        };
        info!(room = %descriptor.room_name, participant = %descriptor.participant_name, "connection descriptor received");

        let connection = match self.connector.connect(&descriptor, self.options).await {
            Ok(connection) => connection,
            Err(e) => {
                {
                    let mut inner = self.shared.lock();
                    if inner.generation == generation {
                        inner.descriptor = None;
                    }
                }
                if matches!(e, RoomError::MediaDevice(_)) {
                    warn!(error = %e, "media device failure");
                    self.shared.alert_device_failure();
                }
                return Err(e);
            }
        };

        let states = connection.agent_state();
        let stale = {
            let mut inner = self.shared.lock();
            if inner.generation == generation {
                inner.connection = Some(Arc::clone(&connection));
                inner.forwarder = Some(spawn_forwarder(
                    Arc::clone(&self.shared),
                    generation,
                    states,
                ));
                false
            } else {
                true
            }
        };
        if stale {
            connection.close().await;
            return Err(RoomError::Cancelled);
        }

        Ok(descriptor)
    }

    /// Leaves the room and clears the descriptor.
    ///
    /// Any connect attempt still in flight is abandoned; its result is
    /// discarded when it arrives.
    pub async fn disconnect(&self) {
        let (connection, forwarder, changed) = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            inner.pending = false;
            inner.descriptor = None;
            inner.agent_joined = false;
            let changed = inner.agent_state != AgentState::Disconnected;
            inner.agent_state = AgentState::Disconnected;
            (inner.connection.take(), inner.forwarder.take(), changed)
        };

        if let Some(forwarder) = forwarder {
            forwarder.abort();
        }
        if let Some(connection) = connection {
            connection.close().await;
            info!("room session closed");
        }
        if changed {
            self.shared.notify(AgentState::Disconnected);
        }
    }
}
