//! One sequential worker per room.
//!
//! The actor owns the room's `GameState` and applies commands strictly in
//! arrival order. The bounded channel is the only lock.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::domain::controller::{reduce, GameAction, Reduction};
use crate::domain::game_transition::GameTransition;
use crate::domain::player_view::SeatView;
use crate::domain::snapshot::RoomRecord;
use crate::domain::state::{GameState, Seat};
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink unavailable: {0}")]
    Unavailable(String),
    #[error("sink rejected record: {0}")]
    Rejected(String),
}

/// Where applied transitions go: persistence, fan-out, or both.
#[async_trait]
pub trait RoomSink: Send + Sync {
    async fn publish(
        &self,
        room_id: &str,
        record: &RoomRecord,
        transitions: &[GameTransition],
    ) -> Result<(), SinkError>;
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl RoomSink for NullSink {
    async fn publish(
        &self,
        _room_id: &str,
        _record: &RoomRecord,
        _transitions: &[GameTransition],
    ) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room actor has stopped")]
    Closed,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoomError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::Closed => ErrorCode::RoomClosed,
            RoomError::Domain(e) => ErrorCode::from(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomReply {
    Applied {
        record: RoomRecord,
        transitions: Vec<GameTransition>,
    },
    Ignored {
        reason: String,
    },
}

enum RoomCommand {
    Act {
        seat: Seat,
        action: GameAction,
        reply: oneshot::Sender<Result<RoomReply, DomainError>>,
    },
    Snapshot {
        reply: oneshot::Sender<RoomRecord>,
    },
    View {
        seat: Seat,
        reply: oneshot::Sender<Result<SeatView, DomainError>>,
    },
    Shutdown {
        reply: oneshot::Sender<GameState>,
    },
}

/// Cheap, cloneable way to talk to a room actor.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: Arc<str>,
    tx: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Submit one action for `seat` and wait for the outcome.
    pub async fn act(&self, seat: Seat, action: GameAction) -> Result<RoomReply, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Act {
            seat,
            action,
            reply,
        })
        .await?;
        Ok(rx.await.map_err(|_| RoomError::Closed)??)
    }

    pub async fn snapshot(&self) -> Result<RoomRecord, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| RoomError::Closed)
    }

    pub async fn view(&self, seat: Seat) -> Result<SeatView, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::View { seat, reply }).await?;
        Ok(rx.await.map_err(|_| RoomError::Closed)??)
    }

    /// Stop the actor after queued commands and return its final state.
    pub async fn shutdown(self) -> Result<GameState, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Shutdown { reply }).await?;
        rx.await.map_err(|_| RoomError::Closed)
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.tx.send(cmd).await.map_err(|_| RoomError::Closed)
    }
}

/// Spawn the actor for one room.
///
/// The join handle resolves to the final state once every handle is dropped
/// or `shutdown` is called.
pub fn spawn_room(
    room_id: impl Into<String>,
    initial: GameState,
    mailbox: usize,
    sink: Arc<dyn RoomSink>,
) -> (RoomHandle, JoinHandle<GameState>) {
    let room_id: Arc<str> = Arc::from(room_id.into());
    let (tx, rx) = mpsc::channel(mailbox.max(1));
    let handle = RoomHandle {
        room_id: room_id.clone(),
        tx,
    };
    let task = tokio::spawn(run_room(room_id, initial, rx, sink));
    (handle, task)
}

/// Spawn a fresh room using the configured seed, winning score and mailbox depth.
pub fn spawn_configured_room(
    config: &EngineConfig,
    room_id: impl Into<String>,
    sink: Arc<dyn RoomSink>,
) -> (RoomHandle, JoinHandle<GameState>) {
    let initial = GameState::with_winning_score(config.room_seed(), config.winning_score);
    spawn_room(room_id, initial, config.room_mailbox, sink)
}

async fn run_room(
    room_id: Arc<str>,
    mut state: GameState,
    mut rx: mpsc::Receiver<RoomCommand>,
    sink: Arc<dyn RoomSink>,
) -> GameState {
    info!(room_id = %room_id, phase = state.phase.as_str(), "Room actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            RoomCommand::Act {
                seat,
                action,
                reply,
            } => {
                let outcome = match reduce(&state, seat, action) {
                    Ok(Reduction::Applied {
                        state: next,
                        transitions,
                    }) => {
                        state = next;
                        let record = RoomRecord::from(&state);
                        if let Err(e) = sink.publish(&room_id, &record, &transitions).await {
                            error!(room_id = %room_id, error = %e, "Room sink failed");
                        }
                        Ok(RoomReply::Applied {
                            record,
                            transitions,
                        })
                    }
                    Ok(Reduction::Ignored { reason }) => Ok(RoomReply::Ignored { reason }),
                    Err(e) => Err(e),
                };
                if reply.send(outcome).is_err() {
                    debug!(room_id = %room_id, "Caller went away before the reply");
                }
            }
            RoomCommand::Snapshot { reply } => {
                let _ = reply.send(RoomRecord::from(&state));
            }
            RoomCommand::View { seat, reply } => {
                let _ = reply.send(SeatView::for_seat(&state, seat));
            }
            RoomCommand::Shutdown { reply } => {
                if reply.send(state.clone()).is_err() {
                    warn!(room_id = %room_id, "Shutdown requested without a listener");
                }
                break;
            }
        }
    }

    info!(room_id = %room_id, phase = state.phase.as_str(), "Room actor stopped");
    state
}
