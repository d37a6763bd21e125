/// Any number of target rows store the owner's id in `foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasMany {
    pub name: String,
    pub target: String,
    pub foreign_key: String,
    pub dependent: bool,
}
