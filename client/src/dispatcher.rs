//! Player commands and how the client reacts to their outcome

use crate::error::FetchError;
use crate::network::GameApi;
use crate::sync::Session;
use log::{info, warn};
use shared::{ActionResult, Direction};

/// A player-initiated command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Walk(Direction),
    Attack,
}

/// Something the user has to be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking message: action rejections, kill counts, failed commands.
    Alert(String),
    /// A fetch+render cycle failed; the previous board stays on screen.
    CycleFailed(String),
}

/// What to do once a command has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// Shown to the user before any resync.
    pub notice: Option<Notice>,
    pub resync: bool,
}

pub fn kill_message(kills: u32) -> String {
    format!("{} players killed!", kills)
}

pub struct ActionDispatcher<'a, A> {
    api: &'a A,
    session: &'a Session,
}

impl<'a, A: GameApi> ActionDispatcher<'a, A> {
    pub fn new(api: &'a A, session: &'a Session) -> Self {
        Self { api, session }
    }

    pub async fn submit_walk(&self, direction: Direction) -> Result<ActionResult<()>, FetchError> {
        self.api
            .submit_walk(self.session.self_name(), direction)
            .await
    }

    pub async fn submit_attack(&self) -> Result<ActionResult<u32>, FetchError> {
        self.api.submit_attack(self.session.self_name()).await
    }

    /// Sends `command` and decides how the client reacts to the answer.
    pub async fn dispatch(&self, command: Command) -> Reaction {
        let outcome = match command {
            Command::Walk(direction) => self
                .submit_walk(direction)
                .await
                .map(|result| result.map(|()| None)),
            Command::Attack => self
                .submit_attack()
                .await
                .map(|result| result.map(|kills| Some(Notice::Alert(kill_message(kills))))),
        };

        match outcome {
            Ok(ActionResult::Ok(notice)) => Reaction {
                notice,
                resync: true,
            },
            Ok(ActionResult::Error(message)) => {
                info!("{:?} rejected: {}", command, message);
                Reaction {
                    notice: Some(Notice::Alert(message)),
                    resync: false,
                }
            }
            Err(err) => {
                warn!("{:?} failed: {}", command, err);
                Reaction {
                    notice: Some(Notice::Alert(format!("action failed: {}", err))),
                    resync: false,
                }
            }
        }
    }
}
