mod direction;
pub use direction::{Direction, OrderBy};

mod filter;
pub use filter::{CmpOp, Filter};

mod key;
pub use key::Key;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_json;
