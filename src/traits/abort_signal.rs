use std::sync::Arc;

/// A trait for abort signals.
/// This trait is used by the optimizer to check if the user has requested to abort the
/// calculation. The signal is polled once per completed iteration, after all observers have run.
pub trait AbortSignal {
    /// Return `true` if the user has requested to abort the calculation.
    fn is_aborted(&self) -> bool;
    /// Abort the calculation. Make `is_aborted()` return `true`.
    fn abort(&self);
    /// Reset the abort signal. Make `is_aborted()` return `false`.
    fn reset(&self);
    /// Wrap the signal in a [`Box`] for registration with an optimizer.
    fn boxed(self) -> Box<dyn AbortSignal>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for Arc<T> {
    fn is_aborted(&self) -> bool {
        self.as_ref().is_aborted()
    }

    fn abort(&self) {
        self.as_ref().abort()
    }

    fn reset(&self) {
        self.as_ref().reset()
    }
}
