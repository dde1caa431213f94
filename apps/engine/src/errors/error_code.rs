//! Error codes exposed to the surrounding room service.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings the
//! transport layer sends back to the acting seat.

use core::fmt;

use super::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Trick play
    MustFollowSuit,
    MustLeadTrump,
    CannotLeadTrump,
    CardNotInHand,
    OutOfTurn,

    // Card pull
    NotCurrentPuller,
    PullPhaseMismatch,
    InvalidPullTarget,
    InvalidPullIndex,
    MustKeepSuit,

    // General
    ParseCard,
    ValidationError,
    /// Action arrived for a phase the room is not in
    StalePhase,
    /// Orchestration bug: inputs out of sync with room state
    PreconditionFailed,

    // Room actor
    RoomClosed,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::MustLeadTrump => "MUST_LEAD_TRUMP",
            Self::CannotLeadTrump => "CANNOT_LEAD_TRUMP",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::OutOfTurn => "OUT_OF_TURN",

            Self::NotCurrentPuller => "NOT_CURRENT_PULLER",
            Self::PullPhaseMismatch => "PULL_PHASE_MISMATCH",
            Self::InvalidPullTarget => "INVALID_PULL_TARGET",
            Self::InvalidPullIndex => "INVALID_PULL_INDEX",
            Self::MustKeepSuit => "MUST_KEEP_SUIT",

            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StalePhase => "STALE_PHASE",
            Self::PreconditionFailed => "PRECONDITION_FAILED",

            Self::RoomClosed => "ROOM_CLOSED",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::MustFollowSuit => ErrorCode::MustFollowSuit,
            ValidationKind::MustLeadTrump => ErrorCode::MustLeadTrump,
            ValidationKind::CannotLeadTrump => ErrorCode::CannotLeadTrump,
            ValidationKind::CardNotInHand => ErrorCode::CardNotInHand,
            ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
            ValidationKind::NotCurrentPuller => ErrorCode::NotCurrentPuller,
            ValidationKind::PullPhaseMismatch => ErrorCode::PullPhaseMismatch,
            ValidationKind::InvalidPullTarget => ErrorCode::InvalidPullTarget,
            ValidationKind::InvalidPullIndex => ErrorCode::InvalidPullIndex,
            ValidationKind::MustKeepSuit => ErrorCode::MustKeepSuit,
            ValidationKind::ParseCard => ErrorCode::ParseCard,
            ValidationKind::Other(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::IllegalMove(kind, _) | DomainError::IllegalPullAction(kind, _) => {
                kind.into()
            }
            DomainError::StalePhase(_) => ErrorCode::StalePhase,
            DomainError::Precondition(_) => ErrorCode::PreconditionFailed,
            DomainError::Parse(_) => ErrorCode::ParseCard,
        }
    }
}
