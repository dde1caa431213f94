//! Domain-level error type used by the rules engine and the room actor.
//!
//! This error type is transport- and storage-agnostic. The surrounding
//! service maps it onto its own wire format using [`super::ErrorCode`].

use thiserror::Error;

/// Specific reasons an action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    MustFollowSuit,
    MustLeadTrump,
    CannotLeadTrump,
    CardNotInHand,
    OutOfTurn,
    NotCurrentPuller,
    PullPhaseMismatch,
    InvalidPullTarget,
    InvalidPullIndex,
    MustKeepSuit,
    ParseCard,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Follow-suit and trump-lead violations, or a play out of turn.
    #[error("illegal move: {1}")]
    IllegalMove(ValidationKind, String),
    /// Card-pull protocol violations.
    #[error("illegal pull action: {1}")]
    IllegalPullAction(ValidationKind, String),
    /// The action belongs to a phase the game is no longer (or not yet) in.
    #[error("stale action: {0}")]
    StalePhase(String),
    /// Desynchronized input; indicates a bug in the caller's orchestration.
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// Malformed card text.
    #[error("parse card: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn illegal_move(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::IllegalMove(kind, detail.into())
    }
    pub fn illegal_pull(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::IllegalPullAction(kind, detail.into())
    }
    pub fn stale(detail: impl Into<String>) -> Self {
        Self::StalePhase(detail.into())
    }
    pub fn precondition(detail: impl Into<String>) -> Self {
        Self::Precondition(detail.into())
    }
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }

    /// Human-readable reason, suitable for showing to the acting seat.
    pub fn reason(&self) -> &str {
        match self {
            DomainError::IllegalMove(_, d)
            | DomainError::IllegalPullAction(_, d)
            | DomainError::StalePhase(d)
            | DomainError::Precondition(d)
            | DomainError::Parse(d) => d,
        }
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::IllegalMove(k, _) | DomainError::IllegalPullAction(k, _) => Some(k),
            _ => None,
        }
    }

    /// Recoverable errors are reported to the acting seat; the rest are bugs.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DomainError::Precondition(_))
    }
}
