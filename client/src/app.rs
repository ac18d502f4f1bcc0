//! Session lifecycle on the UI side: name entry, then the active game view

use crate::board::Board;
use crate::config::ClientConfig;
use crate::dispatcher::{Command, Notice};
use crate::error::ClientError;
use crate::input::InputEvent;
use crate::network::HttpGameApi;
use crate::sync::{lock_board, spawn_sync_thread, Session, SharedBoard, SyncLoop};
use log::{info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

pub const MAX_NAME_LEN: usize = 24;

/// Text typed into the name prompt.
#[derive(Debug, Default)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn push(&mut self, c: char) {
        if !c.is_control() && self.text.chars().count() < MAX_NAME_LEN {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A blank name is not submitted.
    pub fn submit(&self) -> Option<Session> {
        let name = self.text.trim();
        (!name.is_empty()).then(|| Session::new(name))
    }
}

/// Alerts waiting to be acknowledged plus the last cycle failure.
#[derive(Debug, Default)]
pub struct HudState {
    alerts: VecDeque<String>,
    cycle_failure: Option<(String, u64)>,
}

impl HudState {
    /// `board_revision` is the revision on screen when the notice arrived.
    pub fn apply(&mut self, notice: Notice, board_revision: u64) {
        match notice {
            Notice::Alert(message) => self.alerts.push_back(message),
            Notice::CycleFailed(message) => self.cycle_failure = Some((message, board_revision)),
        }
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Commands are held back while an alert is open.
    pub fn is_blocked(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// The failure message, until a newer render has landed.
    pub fn status(&self, board_revision: u64) -> Option<&str> {
        match &self.cycle_failure {
            Some((message, revision)) if *revision == board_revision => Some(message.as_str()),
            _ => None,
        }
    }
}

pub struct ActiveSession {
    session: Session,
    board: SharedBoard,
    commands: mpsc::UnboundedSender<Command>,
    notices: mpsc::UnboundedReceiver<Notice>,
    hud: HudState,
}

impl ActiveSession {
    pub fn new(
        session: Session,
        board: SharedBoard,
        commands: mpsc::UnboundedSender<Command>,
        notices: mpsc::UnboundedReceiver<Notice>,
    ) -> Self {
        Self {
            session,
            board,
            commands,
            notices,
            hud: HudState::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    pub fn board(&self) -> MutexGuard<'_, Board> {
        lock_board(&self.board)
    }

    /// Controls appear once the first snapshot has been rendered.
    pub fn controls_visible(&self) -> bool {
        self.board().is_initialized()
    }

    pub fn poll_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            let revision = lock_board(&self.board).revision();
            self.hud.apply(notice, revision);
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Confirm | InputEvent::Dismiss => self.hud.dismiss_alert(),
            InputEvent::Command(command) => {
                if self.hud.is_blocked() || !self.controls_visible() {
                    return;
                }
                if self.commands.send(command).is_err() {
                    warn!("Sync loop is gone, dropping {:?}", command);
                }
            }
        }
    }
}

pub enum Phase {
    WaitingForName(NameEntry),
    Active(ActiveSession),
}

/// Leaves the name prompt: starts the sync loop for `session` against the configured server.
pub fn activate(session: Session, config: &ClientConfig) -> Result<ActiveSession, ClientError> {
    info!("Connecting to: {}", config.server_url);

    let api = HttpGameApi::new(&config.server_url)?;
    let board: SharedBoard = Arc::new(Mutex::new(Board::new()));
    let (command_sender, command_receiver) = mpsc::unbounded_channel();
    let (notice_sender, notice_receiver) = mpsc::unbounded_channel();

    let sync_loop = SyncLoop::new(
        api,
        notice_sender,
        session.clone(),
        Arc::clone(&board),
        config.clone(),
    );
    spawn_sync_thread(sync_loop, command_receiver)?;

    Ok(ActiveSession::new(
        session,
        board,
        command_sender,
        notice_receiver,
    ))
}
