use bm_core::BmError;
use bm_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Rejected before any engine was built or thread started.
    #[error(transparent)]
    Config(#[from] BmError),

    /// The engine failed, either while building a population or on the
    /// producer thread.  Producer faults surface from `join`.
    #[error("simulation fault: {0}")]
    Sim(#[from] SimError),

    #[error("failed to spawn the simulation thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The producer already stopped (terminated or faulted), so the request
    /// cannot be honoured.
    #[error("the simulation thread has already exited")]
    ProducerExited,

    #[error("the simulation thread panicked")]
    ProducerPanicked,
}

pub type DriverResult<T> = Result<T, DriverError>;

/// Returned by [`DiffStream::try_recv`][crate::DiffStream::try_recv].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TryRecvError {
    #[error("no diff is buffered")]
    Empty,

    #[error("the stream was closed")]
    Closed,
}
