use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Failed to spawn the reporter thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("The reporter thread panicked")]
    ReporterPanicked,
}

/// The error a [`MonitoredReader`](crate::MonitoredReader) returns after its source failed
///
/// [`io::Error`] can not be cloned, so the first failure is handed to the caller as is,
/// and every later read returns an [`io::Error`] of the same [`io::ErrorKind`], wrapping
/// this error, which displays the same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LatchedError {
    kind: io::ErrorKind,
    message: String,
}

impl LatchedError {
    pub fn kind(&self) -> io::ErrorKind {
        self.kind
    }

    pub(crate) fn to_io_error(&self) -> io::Error {
        io::Error::new(self.kind, self.clone())
    }
}

impl From<&io::Error> for LatchedError {
    fn from(err: &io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_kind_and_message() {
        let original = io::Error::new(io::ErrorKind::BrokenPipe, "pipe went away");
        let latched = LatchedError::from(&original);

        let replayed = latched.to_io_error();
        assert_eq!(replayed.kind(), original.kind());
        assert_eq!(replayed.to_string(), original.to_string());

        let inner = replayed
            .get_ref()
            .and_then(|err| err.downcast_ref::<LatchedError>())
            .unwrap();
        assert_eq!(inner, &latched);
    }

    #[test]
    fn replays_os_errors() {
        let original = io::Error::from_raw_os_error(5);
        let latched = LatchedError::from(&original);

        assert_eq!(latched.kind(), original.kind());
        assert_eq!(latched.to_io_error().to_string(), original.to_string());
    }
}
