/// The owner's row stores the target's id in `foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsTo {
    pub name: String,
    pub target: String,
    pub foreign_key: String,
    pub touch: bool,
}
