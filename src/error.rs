use thiserror::Error;

/// Recoverable failures of the timetable engine. None of them are fatal; the
/// caller refuses the triggering action and reports the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// A user-entered entry had a blank or malformed field.
    #[error("invalid entry: {0}")]
    Validation(String),

    #[error("cannot generate a timetable: no entries have been added")]
    EmptyPool,

    /// Scoring was requested without any usable rows.
    #[error("cannot analyze a timetable: no usable rows")]
    EmptyInput,
}

impl TimetableError {
    /// Stable machine-readable code used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            TimetableError::Validation(_) => "VALIDATION_ERROR",
            TimetableError::EmptyPool => "EMPTY_POOL",
            TimetableError::EmptyInput => "EMPTY_INPUT",
        }
    }
}
