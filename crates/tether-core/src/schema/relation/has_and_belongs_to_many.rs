/// Owner and target rows are linked through rows of `join_table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasAndBelongsToMany {
    pub name: String,
    pub target: String,

    /// Join-table column referencing the target.
    pub foreign_key: String,

    /// Join-table column referencing the owner.
    pub source_key: String,

    pub join_table: String,
}
