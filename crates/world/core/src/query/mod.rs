//! Composable, lazily evaluated entity queries.
//!
//! A query starts from one candidate list of a [`WorldSnapshot`](crate::WorldSnapshot),
//! accumulates criteria, and is evaluated by a reducer:
//!
//! ```text
//! snapshot.objects()
//!     .with_names(["Bank booth", "Bank chest"])   // OR inside one criterion
//!     .with_verb(Verb::Bank)                       // AND across criteria
//!     .nearest()?                                  // Result<&WorldObject, QueryError>
//! ```
//!
//! Criteria never depend on each other, so the order they are added in does
//! not change the result.
mod error;

pub use error::QueryError;

use crate::model::{
    ActorRef, Area, BankedItem, CarriedItem, Creature, EntityKind, EntityRef, GroundItem,
    Position, Verb, WornItem, WorldObject,
};

/// Common surface of every entity variant.
pub trait Queryable {
    const KIND: EntityKind;

    /// Definition id (item id for item variants).
    fn definition_id(&self) -> u32;

    fn name(&self) -> &str;

    fn verbs(&self) -> &[Verb];

    /// Stable handle used to address this entity in an interaction.
    fn entity_ref(&self) -> EntityRef;

    /// Number of units this entity represents. Non-item entities count as one.
    fn stack_size(&self) -> u64 {
        1
    }

    fn has_verb(&self, verb: Verb) -> bool {
        self.verbs().contains(&verb)
    }
}

/// Entities with a tile position.
pub trait Positioned: Queryable {
    fn position(&self) -> Position;
}

/// Entities that can be in combat with an actor.
pub trait Targeting: Queryable {
    fn target(&self) -> Option<ActorRef>;
}

type Filter<'a, E> = Box<dyn Fn(&E) -> bool + Send + Sync + 'a>;

/// Lazy filter over one candidate list of a snapshot.
pub struct EntityQuery<'a, E> {
    candidates: &'a [E],
    origin: Position,
    filters: Vec<Filter<'a, E>>,
    criteria: Vec<String>,
}

impl<'a, E: Queryable> EntityQuery<'a, E> {
    /// Creates a query over `candidates`, measuring distances from `origin`.
    pub fn new(candidates: &'a [E], origin: Position) -> Self {
        Self {
            candidates,
            origin,
            filters: Vec::new(),
            criteria: Vec::new(),
        }
    }

    fn push(mut self, criterion: String, filter: Filter<'a, E>) -> Self {
        self.criteria.push(criterion);
        self.filters.push(filter);
        self
    }

    pub fn with_id(self, id: impl Into<u32>) -> Self {
        self.with_ids([id])
    }

    /// Keeps entities whose definition id is any of `ids`.
    pub fn with_ids<I>(self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<u32>,
    {
        let ids: Vec<u32> = ids.into_iter().map(Into::into).collect();
        self.push(
            format!("id in {ids:?}"),
            Box::new(move |e: &E| ids.contains(&e.definition_id())),
        )
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with_names([name])
    }

    /// Keeps entities whose name equals any of `names` exactly.
    pub fn with_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.push(
            format!("name in {names:?}"),
            Box::new(move |e: &E| names.iter().any(|n| n == e.name())),
        )
    }

    /// Keeps entities offering `verb`.
    pub fn with_verb(self, verb: Verb) -> Self {
        self.push(
            format!("verb = {verb}"),
            Box::new(move |e: &E| e.has_verb(verb)),
        )
    }

    /// Keeps entities satisfying an arbitrary predicate.
    pub fn matching(self, label: &str, predicate: impl Fn(&E) -> bool + Send + Sync + 'a) -> Self {
        self.push(label.to_owned(), Box::new(predicate))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.candidates
            .iter()
            .filter(move |e| self.filters.iter().all(|f| f(*e)))
    }

    pub fn exists(&self) -> bool {
        self.iter().next().is_some()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Total units across every matching stack.
    pub fn quantity(&self) -> u64 {
        self.iter().map(Queryable::stack_size).sum()
    }

    /// First match in host order.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] when nothing matches.
    pub fn first(&self) -> Result<&'a E, QueryError> {
        self.iter().next().ok_or_else(|| self.not_found())
    }

    /// Human-readable summary of the accumulated criteria.
    pub fn describe(&self) -> String {
        if self.criteria.is_empty() {
            "any".to_owned()
        } else {
            self.criteria.join(" and ")
        }
    }

    fn not_found(&self) -> QueryError {
        QueryError::NotFound {
            kind: E::KIND,
            criteria: self.describe(),
        }
    }
}

impl<'a, E: Positioned> EntityQuery<'a, E> {
    /// Keeps entities standing inside `area`.
    pub fn within(self, area: &Area) -> Self {
        let area = area.clone();
        self.push(
            format!("within {area}"),
            Box::new(move |e: &E| area.contains(e.position())),
        )
    }

    /// Match closest to the actor by Chebyshev distance.
    ///
    /// Entities on another plane rank behind every same-plane entity. Ties keep
    /// the earliest candidate in host order.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] when nothing matches.
    pub fn nearest(&self) -> Result<&'a E, QueryError> {
        let origin = self.origin;
        self.iter()
            .min_by_key(|e| origin.chebyshev(e.position()).unwrap_or(u32::MAX))
            .ok_or_else(|| self.not_found())
    }
}

impl<'a, E: Targeting> EntityQuery<'a, E> {
    /// Keeps entities currently targeting `actor`.
    pub fn with_target(self, actor: ActorRef) -> Self {
        self.push(
            format!("target = {actor:?}"),
            Box::new(move |e: &E| e.target() == Some(actor)),
        )
    }
}

impl Queryable for Creature {
    const KIND: EntityKind = EntityKind::Creature;

    fn definition_id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Creature(self.handle)
    }
}

impl Positioned for Creature {
    fn position(&self) -> Position {
        self.position
    }
}

impl Targeting for Creature {
    fn target(&self) -> Option<ActorRef> {
        self.target
    }
}

impl Queryable for WorldObject {
    const KIND: EntityKind = EntityKind::WorldObject;

    fn definition_id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Object(self.handle)
    }
}

impl Positioned for WorldObject {
    fn position(&self) -> Position {
        self.position
    }
}

impl Queryable for GroundItem {
    const KIND: EntityKind = EntityKind::GroundItem;

    fn definition_id(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::GroundItem(self.handle)
    }
    fn stack_size(&self) -> u64 {
        self.quantity
    }
}

impl Positioned for GroundItem {
    fn position(&self) -> Position {
        self.position
    }
}

impl Queryable for CarriedItem {
    const KIND: EntityKind = EntityKind::CarriedItem;

    fn definition_id(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Carried { slot: self.slot }
    }
    fn stack_size(&self) -> u64 {
        self.quantity
    }
}

impl Queryable for WornItem {
    const KIND: EntityKind = EntityKind::WornItem;

    fn definition_id(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Worn { slot: self.slot }
    }
    fn stack_size(&self) -> u64 {
        self.quantity
    }
}

impl Queryable for BankedItem {
    const KIND: EntityKind = EntityKind::BankedItem;

    fn definition_id(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn verbs(&self) -> &[Verb] {
        &[]
    }
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Banked(self.id)
    }
    fn stack_size(&self) -> u64 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, ItemId};

    fn creature(handle: u32, name: &str, x: i32, y: i32, verbs: &[Verb]) -> Creature {
        Creature {
            handle: EntityId(handle),
            id: 100 + handle,
            name: name.to_owned(),
            position: Position::new(x, y),
            verbs: verbs.to_vec(),
            target: None,
            animation: None,
        }
    }

    fn carried(slot: u8, id: u32, quantity: u64) -> CarriedItem {
        CarriedItem {
            slot,
            id: ItemId(id),
            name: format!("item {id}"),
            quantity,
            verbs: vec![Verb::Use, Verb::Drop],
        }
    }

    #[test]
    fn nearest_tie_keeps_first_in_host_order() {
        let creatures = vec![
            creature(1, "Guard", 3, 0, &[Verb::Attack]),
            creature(2, "Guard", 0, 3, &[Verb::Attack]),
            creature(3, "Guard", 5, 5, &[Verb::Attack]),
        ];
        let query = EntityQuery::new(&creatures, Position::new(0, 0)).with_name("Guard");
        assert_eq!(query.nearest().map(|c| c.handle), Ok(EntityId(1)));
    }

    #[test]
    fn other_planes_rank_behind_same_plane() {
        let mut upstairs = creature(1, "Banker", 0, 0, &[Verb::Bank]);
        upstairs.position.plane = 1;
        let creatures = vec![upstairs, creature(2, "Banker", 9, 9, &[Verb::Bank])];
        let query = EntityQuery::new(&creatures, Position::new(0, 0));
        assert_eq!(query.nearest().map(|c| c.handle), Ok(EntityId(2)));
    }

    #[test]
    fn criteria_combine_with_and_and_lists_with_or() {
        let creatures = vec![
            creature(1, "Banker", 1, 1, &[Verb::TalkTo]),
            creature(2, "Banker", 2, 2, &[Verb::Bank, Verb::TalkTo]),
            creature(3, "Clerk", 3, 3, &[Verb::Bank]),
            creature(4, "Guard", 0, 0, &[Verb::Bank]),
        ];
        let origin = Position::new(0, 0);

        let a = EntityQuery::new(&creatures, origin)
            .with_names(["Banker", "Clerk"])
            .with_verb(Verb::Bank);
        let b = EntityQuery::new(&creatures, origin)
            .with_verb(Verb::Bank)
            .with_names(["Banker", "Clerk"]);

        let handles = |q: &EntityQuery<'_, Creature>| q.iter().map(|c| c.handle).collect::<Vec<_>>();
        assert_eq!(handles(&a), vec![EntityId(2), EntityId(3)]);
        assert_eq!(handles(&a), handles(&b));
    }

    #[test]
    fn within_and_target_filters() {
        let player = ActorRef::Player(EntityId(0));
        let mut attacker = creature(2, "Goblin", 4, 4, &[Verb::Attack]);
        attacker.target = Some(player);
        let creatures = vec![creature(1, "Goblin", 1, 1, &[Verb::Attack]), attacker];
        let origin = Position::new(0, 0);

        let nearest_attacker = EntityQuery::new(&creatures, origin)
            .with_name("Goblin")
            .with_target(player)
            .nearest();
        assert_eq!(nearest_attacker.map(|c| c.handle), Ok(EntityId(2)));

        let area = Area::rectangle(0, 0, 2, 2);
        let inside = EntityQuery::new(&creatures, origin).within(&area);
        assert_eq!(inside.count(), 1);
    }

    #[test]
    fn quantity_sums_every_matching_stack() {
        let items = vec![carried(0, 995, 400), carried(1, 995, 100), carried(2, 1, 1)];
        let query = EntityQuery::new(&items, Position::default()).with_id(ItemId(995));
        assert_eq!(query.quantity(), 500);
        assert_eq!(query.count(), 2);
    }

    #[test]
    fn empty_results_report_not_found() {
        let items: Vec<CarriedItem> = Vec::new();
        let query = EntityQuery::new(&items, Position::default()).with_id(ItemId(995));
        let err = query.first().unwrap_err();
        assert_eq!(err.kind(), EntityKind::CarriedItem);
        assert!(err.to_string().contains("995"));
        assert!(!query.exists());
        assert_eq!(query.quantity(), 0);
    }

    #[test]
    fn empty_id_list_matches_nothing() {
        let items = vec![carried(0, 995, 1)];
        let query = EntityQuery::new(&items, Position::default()).with_ids(Vec::<ItemId>::new());
        assert!(!query.exists());
    }
}
