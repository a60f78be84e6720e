//! Engine error types.
//!
//! Only user-action validation is an `Err`; configuration and data-integrity
//! problems degrade with a warning, and idempotency guards are silent no-ops.

use pol_core::ids::ElectionId;
use pol_core::GameDate;
use thiserror::Error;

/// Rejection of a candidacy declaration. The campaign state is left
/// untouched in every variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclareError {
    #[error("no election with id {0}")]
    NoSuchElection(ElectionId),

    #[error("filing deadline {deadline} has passed")]
    FilingDeadlinePassed { deadline: GameDate },

    #[error("already declared in this contest")]
    AlreadyDeclared,

    #[error("election has already concluded")]
    ElectionConcluded,

    #[error("contest is decided by party lists; individual filing is not possible")]
    PartyListContest,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no election with id {0}")]
    NoSuchElection(ElectionId),
}
