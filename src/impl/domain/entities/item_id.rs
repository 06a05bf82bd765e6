use std::fmt;

use uuid::Uuid;

/// Identifier shared by every stored entity.
///
/// Freshly created entities get a UUID v4. Identifiers read back from storage
/// are kept verbatim, even when they predate UUID usage (ex. "x").
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct ItemId(pub(crate) String);

impl ItemId {
    pub fn generate() -> Self {
        ItemId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}
