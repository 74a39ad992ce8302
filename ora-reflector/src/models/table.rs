use std::fmt::{Display, Formatter};

/// Identifies a single table within the scanned schemas.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TableDescriptor {
    pub owner: String,
    pub name: String,
}

impl TableDescriptor {
    pub fn new(owner: &str, name: &str) -> Self {
        TableDescriptor {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }
}

impl Display for TableDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}
