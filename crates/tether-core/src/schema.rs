mod column;
pub use column::{ColumnInfo, Columns};

mod declaration;
pub use declaration::{Declaration, RelationKind};

pub mod relation;
pub use relation::Relation;

mod resolve;
pub use resolve::resolve;
