use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("event time must be finite, got {0}")]
    NonFiniteTime(f64),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
