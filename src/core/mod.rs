/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signals;
/// [`PSOError`] type for optimization failures.
pub mod error;
/// [`PSOOptions`] type for the stopping parameters of a run.
pub mod options;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`PSOSummary`] type for the result of the optimization.
pub mod summary;

pub use abort_signals::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use error::PSOError;
pub use options::PSOOptions;
pub use point::Point;
pub use summary::PSOSummary;
