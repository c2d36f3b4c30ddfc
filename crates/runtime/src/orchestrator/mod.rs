//! Script-facing helpers composed from queries, waits and sessions.
//!
//! Helpers never swallow failures: a missing entity, a timeout or a host
//! rejection propagates to the script, which decides whether to retry.
mod combat;
mod dialogue;
mod interact;
mod items;
mod magic;

use world_core::{EntityQuery, ItemId, Queryable};

/// Picks entities by display name or by definition id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(String),
    Id(u32),
}

impl Selector {
    /// Adds this selector as a criterion of `query`.
    pub fn narrow<'a, E: Queryable>(&self, query: EntityQuery<'a, E>) -> EntityQuery<'a, E> {
        match self {
            Selector::Name(name) => query.with_name(name),
            Selector::Id(id) => query.with_id(*id),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Name(name) => write!(f, "'{name}'"),
            Selector::Id(id) => write!(f, "#{id}"),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::Name(name.to_owned())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::Name(name)
    }
}

impl From<u32> for Selector {
    fn from(id: u32) -> Self {
        Selector::Id(id)
    }
}

impl From<ItemId> for Selector {
    fn from(id: ItemId) -> Self {
        Selector::Id(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{Position, WorldObject, EntityId, Verb};

    fn object(handle: u32, id: u32, name: &str) -> WorldObject {
        WorldObject {
            handle: EntityId(handle),
            id,
            name: name.to_owned(),
            position: Position::new(handle as i32, 0),
            verbs: vec![Verb::Open],
        }
    }

    #[test]
    fn selectors_narrow_by_name_or_id() {
        let objects = vec![object(1, 1530, "Door"), object(2, 24, "Gate")];
        let origin = Position::default();

        let by_name = Selector::from("Gate").narrow(EntityQuery::new(&objects, origin));
        assert_eq!(by_name.first().map(|o| o.handle), Ok(EntityId(2)));

        let by_id = Selector::from(1530u32).narrow(EntityQuery::new(&objects, origin));
        assert_eq!(by_id.first().map(|o| o.handle), Ok(EntityId(1)));
    }
}
