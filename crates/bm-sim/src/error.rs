use bm_core::BmError;
use bm_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] BmError),

    #[error("event scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    /// A seeded engine always holds at least one live event; reaching an
    /// empty schedule means the population was empty or state is corrupt.
    #[error("no live event left to resolve at t = {time}")]
    ScheduleExhausted { time: f64 },
}

pub type SimResult<T> = Result<T, SimError>;
