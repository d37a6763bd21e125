/// Opaque handle to a transaction opened by a driver.
///
/// The engine never inspects it. It is copied onto every operation issued
/// while persisting or loading under the same options so the driver can route
/// the whole cascade to one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction(u64);

impl Transaction {
    pub const fn from_raw(id: u64) -> Transaction {
        Transaction(id)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}
