//! Block action: deny the request.

use super::Action;

/// Denies a matched request.
///
/// The same type serves IP-keyed and user-keyed rules; the key kind is
/// carried by the discriminant and by which store holds the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAction {
    id: String,
}

impl BlockAction {
    /// Create a block action. The ID is taken as-is.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Action for BlockAction {
    fn action_id(&self) -> &str {
        &self.id
    }
}
