/// At most one target row stores the owner's id in `foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasOne {
    pub name: String,
    pub target: String,
    pub foreign_key: String,
    pub dependent: bool,
}
