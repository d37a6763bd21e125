use super::Error;

/// Error when a transforming hook returns something other than a record.
#[derive(Debug)]
pub(super) struct HookContractError {
    hook: Box<str>,
    model: Box<str>,
}

impl core::fmt::Display for HookContractError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "hook contract violated: `{}` on `{}` must return a model",
            self.hook, self.model
        )
    }
}

impl Error {
    /// Creates a hook contract error.
    pub fn hook_contract(hook: impl Into<String>, model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::HookContract(HookContractError {
            hook: hook.into().into(),
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error (or any of its causes) is a hook contract error.
    pub fn is_hook_contract(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::HookContract(_)))
    }
}
