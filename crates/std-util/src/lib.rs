pub mod assert;
pub mod str;

pub mod prelude {
    pub use crate::{assert_empty, assert_err, assert_none, assert_unique};
}
