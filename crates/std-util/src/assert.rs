/// Asserts that an `Option` is `None`.
#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        if let Some(actual) = &$e {
            panic!("expected `{}` to be `None`; got Some({:?})", stringify!($e), actual);
        }
    };
}

/// Asserts that a `Result` is `Err` and returns the error.
///
/// An optional predicate method name checks the error kind as well:
/// `assert_err!(res, is_not_connected)`.
#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(err) => err,
            Ok(value) => panic!("expected `{}` to fail; got Ok({:?})", stringify!($e), value),
        }
    };
    ($e:expr, $kind:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(err.$kind(), "expected error to satisfy `{}`; got {err}", stringify!($kind));
        err
    }};
}

/// Asserts that a slice-like value has no elements.
#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let items = &$e[..];
        assert!(
            items.is_empty(),
            "expected `{}` to be empty; got {} item(s): {:?}",
            stringify!($e),
            items.len(),
            items
        );
    }};
}

/// Asserts that no element of a slice-like value appears twice.
#[macro_export]
macro_rules! assert_unique {
    ($e:expr) => {{
        let items = &$e[..];
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = items.iter().find(|item| !seen.insert(*item)) {
            panic!("expected `{}` to be unique; {:?} appears twice", stringify!($e), dup);
        }
    }};
}
