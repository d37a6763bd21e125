use super::Error;

/// Error when a model is used before a driver has been bound to its database.
#[derive(Debug)]
pub(super) struct NotConnectedError;

impl core::fmt::Display for NotConnectedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("not connected: a driver must be bound before querying a model")
    }
}

impl Error {
    /// Creates a not-connected error.
    pub fn not_connected() -> Error {
        Error::from(super::ErrorKind::NotConnected(NotConnectedError))
    }

    /// Returns `true` if this error (or any of its causes) is a not-connected error.
    pub fn is_not_connected(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NotConnected(_)))
    }
}
