//! Resynchronization loop driving fetch+render cycles
//!
//! A cycle fetches the authoritative state and renders it onto the shared
//! board. Cycles come from two independent producers: the periodic timer and
//! successful player commands. Each cycle runs as its own task, so cycles can
//! overlap and finish out of order; whichever render lands last wins unless
//! [`ClientConfig::discard_stale_renders`] is set.

use crate::board::Board;
use crate::config::ClientConfig;
use crate::dispatcher::{ActionDispatcher, Command, Notice};
use crate::error::CycleError;
use crate::network::GameApi;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// The rendered board, written by sync cycles and read by the painter.
pub type SharedBoard = Arc<Mutex<Board>>;

pub fn lock_board(board: &SharedBoard) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-session context, created once when the player joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    self_name: String,
}

impl Session {
    pub fn new(self_name: impl Into<String>) -> Self {
        Self {
            self_name: self_name.into(),
        }
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }
}

/// Receives notices for the user.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}

impl Notifier for mpsc::UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        if self.send(notice).is_err() {
            debug!("Notice dropped, nobody is listening");
        }
    }
}

struct Inner<A, N> {
    api: A,
    notifier: N,
    session: Session,
    board: SharedBoard,
    config: ClientConfig,
    next_sequence: AtomicU64,
}

pub struct SyncLoop<A, N> {
    inner: Arc<Inner<A, N>>,
}

impl<A, N> Clone for SyncLoop<A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: GameApi, N: Notifier> SyncLoop<A, N> {
    pub fn new(api: A, notifier: N, session: Session, board: SharedBoard, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                notifier,
                session,
                board,
                config,
                next_sequence: AtomicU64::new(0),
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn board(&self) -> SharedBoard {
        Arc::clone(&self.inner.board)
    }

    /// One fetch followed by a render of that same fetch.
    pub async fn run_cycle(&self) -> Result<(), CycleError> {
        let sequence = self.inner.next_sequence.fetch_add(1, Ordering::Relaxed);
        let self_name = self.inner.session.self_name();

        let snapshot = self.inner.api.fetch_state(self_name).await?;

        let mut board = lock_board(&self.inner.board);
        board.initialize(snapshot.size)?;

        if self.inner.config.discard_stale_renders {
            if !board.render_sequenced(sequence, &snapshot, self_name)? {
                debug!("Discarded stale render from cycle {}", sequence);
            }
        } else {
            board.render(&snapshot, self_name)?;
        }

        Ok(())
    }

    /// Runs a cycle, reporting a failure instead of returning it.
    pub async fn resync(&self) {
        if let Err(err) = self.run_cycle().await {
            warn!("Sync cycle failed: {}", err);
            self.inner.notifier.notify(Notice::CycleFailed(err.to_string()));
        }
    }

    /// Sends a command; the user is notified before any resync it triggers.
    pub async fn perform(&self, command: Command) {
        let reaction = ActionDispatcher::new(&self.inner.api, &self.inner.session)
            .dispatch(command)
            .await;

        if let Some(notice) = reaction.notice {
            self.inner.notifier.notify(notice);
        }

        if reaction.resync {
            self.resync().await;
        }
    }

    /// The active phase: one immediate cycle, then a cycle per tick and one
    /// task per command, forever.
    pub async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("Joined as {}", self.inner.session.self_name());

        self.resync().await;

        let period = self.inner.config.tick_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut accepting_commands = true;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let sync = self.clone();
                    tokio::spawn(async move { sync.resync().await });
                },

                command = commands.recv(), if accepting_commands => match command {
                    Some(command) => {
                        let sync = self.clone();
                        tokio::spawn(async move { sync.perform(command).await });
                    }
                    None => {
                        debug!("Command channel closed");
                        accepting_commands = false;
                    }
                },
            }
        }
    }
}

/// Runs `sync_loop` on its own thread with a single-threaded runtime.
pub fn spawn_sync_thread<A: GameApi, N: Notifier>(
    sync_loop: SyncLoop<A, N>,
    commands: mpsc::UnboundedReceiver<Command>,
) -> std::io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("sync".to_string())
        .spawn(move || runtime.block_on(sync_loop.run(commands)))
}
