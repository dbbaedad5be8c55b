use std::convert::Infallible;

use thiserror::Error;

/// Errors that can occur during a call to [`PSO::optimize`](`crate::swarms::PSO::optimize`).
///
/// The generic `E` is the error type of the [`CostFunction`](`crate::traits::CostFunction`) being
/// minimized; it defaults to [`Infallible`] for objectives which never fail.
#[derive(Debug, Error)]
pub enum PSOError<E: std::error::Error + 'static = Infallible> {
    /// The caller-supplied arguments were rejected before any swarm state was created or any
    /// evaluation took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The cost function returned an error during evaluation.
    #[error(transparent)]
    Evaluation(#[from] E),
}

impl<E: std::error::Error + 'static> PSOError<E> {
    /// Returns `true` if the error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
