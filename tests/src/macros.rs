/// Compares two collections as multisets.
#[macro_export]
macro_rules! assert_eq_unordered {
    ($actual:expr, $expect:expr) => {{
        let mut actual = $actual.into_iter().collect::<Vec<_>>();
        let mut expect = $expect.into_iter().collect::<Vec<_>>();
        actual.sort();
        expect.sort();
        assert_eq!(actual, expect, "collections differ (order ignored)");
    }};
}

/// Builds a `tether::db::Builder` with every given `ModelDef` registered.
#[macro_export]
macro_rules! models {
    ( $( $model:expr ),* $(,)? ) => {{
        let mut builder = tether::Db::builder();
        $( builder.register($model); )*
        builder
    }};
}

/// Turns async test bodies of the form `async fn name(test: &mut DbTest)`
/// into `#[test]` functions, each against a fresh in-memory database.
#[macro_export]
macro_rules! tests {
    ( $( $( #[$attrs:meta] )* $f:ident ),+ $(,)? ) => {
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    $crate::DbTest::run(|test| Box::pin(async move { super::$f(test).await }));
                }
            )+
        }
    };
}
