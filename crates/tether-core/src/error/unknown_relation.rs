use super::Error;

/// Error when an operation names a relation the model does not declare, or
/// declares without a recognized kind.
#[derive(Debug)]
pub(super) struct UnknownRelationError {
    model: Box<str>,
    relation: Box<str>,
}

impl core::fmt::Display for UnknownRelationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "unknown relation: `{}` is not a relation of `{}`",
            self.relation, self.model
        )
    }
}

impl Error {
    /// Creates an unknown relation error.
    pub fn unknown_relation(model: impl Into<String>, relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownRelation(UnknownRelationError {
            model: model.into().into(),
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error (or any of its causes) is an unknown relation error.
    pub fn is_unknown_relation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownRelation(_)))
    }
}
