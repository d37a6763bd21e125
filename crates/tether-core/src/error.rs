mod adhoc;
mod driver_operation_failed;
mod hook_contract;
mod invalid_connection_url;
mod invalid_result;
mod not_connected;
mod serialize_contract;
mod type_conversion;
mod unknown_relation;

use adhoc::AdhocError;
use driver_operation_failed::DriverOperationFailed;
use hook_contract::HookContractError;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_result::InvalidResult;
use not_connected::NotConnectedError;
use serialize_contract::SerializeContractError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unknown_relation::UnknownRelationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// The error type returned by every fallible tether operation.
///
/// An `Error` is a single pointer. It carries one [`ErrorKind`] plus an
/// optional cause, so context added with [`Error::context`] forms a chain
/// that renders outermost first: `outer: inner: root`.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Wraps `self` as the cause of `outer`.
    pub fn context(self, outer: impl Into<Error>) -> Error {
        let outer = outer.into();

        // `outer` is freshly built in practice; a shared one is flattened
        // to its message so the chain stays a simple list.
        let kind = match outer.inner.map(Arc::try_unwrap) {
            Some(Ok(inner)) => inner.kind,
            Some(Err(shared)) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// The error that started the chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    /// Iterates from this error down to the root cause.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    fn kind(&self) -> &ErrorKind {
        match &self.inner {
            Some(inner) => &inner.kind,
            None => &ErrorKind::Unknown,
        }
    }

    fn cause(&self) -> Option<&Error> {
        self.inner.as_ref()?.cause.as_ref()
    }

    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }
}

/// Iterator returned by [`Error::chain`].
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<&'a Error> {
        let err = self.next?;
        self.next = err.cause();
        Some(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::DriverOperationFailed(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, err) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            core::fmt::Display::fmt(err.kind().as_display(), f)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_list()
                .entries(self.chain().map(|err| err.kind()))
                .finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    DriverOperationFailed(DriverOperationFailed),
    HookContract(HookContractError),
    InvalidConnectionUrl(InvalidConnectionUrl),
    InvalidResult(InvalidResult),
    NotConnected(NotConnectedError),
    SerializeContract(SerializeContractError),
    TypeConversion(TypeConversionError),
    UnknownRelation(UnknownRelationError),
    Unknown,
}

impl ErrorKind {
    fn as_display(&self) -> &dyn core::fmt::Display {
        match self {
            ErrorKind::Anyhow(err) => err,
            ErrorKind::Adhoc(err) => err,
            ErrorKind::DriverOperationFailed(err) => err,
            ErrorKind::HookContract(err) => err,
            ErrorKind::InvalidConnectionUrl(err) => err,
            ErrorKind::InvalidResult(err) => err,
            ErrorKind::NotConnected(err) => err,
            ErrorKind::SerializeContract(err) => err,
            ErrorKind::TypeConversion(err) => err,
            ErrorKind::UnknownRelation(err) => err,
            ErrorKind::Unknown => &"unknown tether error",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.as_display(), f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
