use super::Error;

/// Error when a record adapter's serialize step does not produce a plain record.
#[derive(Debug)]
pub(super) struct SerializeContractError {
    model: Box<str>,
}

impl core::fmt::Display for SerializeContractError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "serialize contract violated: the record adapter for `{}` must serialize to a plain record",
            self.model
        )
    }
}

impl Error {
    /// Creates a serialize contract error.
    pub fn serialize_contract(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SerializeContract(SerializeContractError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error (or any of its causes) is a serialize contract error.
    pub fn is_serialize_contract(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SerializeContract(_)))
    }
}
