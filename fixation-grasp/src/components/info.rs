/// Component that adds some information about the entity
/// Useful for debugging - every hand and object spawned by [`crate::Simulation`] has one
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// A helpful name
    pub name: String,
}

impl Info {
    /// Give an entity a name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
