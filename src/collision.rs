/// Which groups of bodies interact, and how.
///
/// Relations are registered once when the world is built. The engine uses
/// them to decide which pairs to test and whether to push bodies apart; the
/// dispatcher then turns the contacts it reports into typed game events.

use crate::engine::BodyRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Player,
    Stars,
    Bombs,
    Platforms,
}

impl Group {
    pub fn contains(self, body: BodyRef) -> bool {
        matches!(
            (self, body),
            (Group::Player, BodyRef::Player)
                | (Group::Stars, BodyRef::Star(_))
                | (Group::Bombs, BodyRef::Bomb(_))
                | (Group::Platforms, BodyRef::Platform(_))
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Physical response: stop, support or bounce.
    Collide,
    /// Detection only; the bodies pass through each other.
    Overlap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hook {
    StarCollected,
    PlayerHitBomb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    pub a: Group,
    pub b: Group,
    pub interaction: Interaction,
    pub hook: Option<Hook>,
}

/// A contact reported by the engine. `relation` indexes the slice the engine
/// was given; `a` belongs to the relation's first group, `b` to its second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub relation: usize,
    pub a: BodyRef,
    pub b: BodyRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    StarCollected { star: usize },
    PlayerHitBomb { bomb: usize },
}

#[derive(Clone, Debug, Default)]
pub struct CollisionDispatcher {
    relations: Vec<Relation>,
}

impl CollisionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule set: everything stands on the platforms, the player
    /// collides with bombs and passes through stars.
    pub fn standard() -> Self {
        Self::new()
            .collider(Group::Player, Group::Platforms)
            .collider(Group::Stars, Group::Platforms)
            .collider(Group::Bombs, Group::Platforms)
            .collider_with(Group::Player, Group::Bombs, Hook::PlayerHitBomb)
            .overlap(Group::Player, Group::Stars, Hook::StarCollected)
    }

    pub fn collider(self, a: Group, b: Group) -> Self {
        self.register(a, b, Interaction::Collide, None)
    }

    pub fn collider_with(self, a: Group, b: Group, hook: Hook) -> Self {
        self.register(a, b, Interaction::Collide, Some(hook))
    }

    pub fn overlap(self, a: Group, b: Group, hook: Hook) -> Self {
        self.register(a, b, Interaction::Overlap, Some(hook))
    }

    fn register(mut self, a: Group, b: Group, interaction: Interaction, hook: Option<Hook>) -> Self {
        self.relations.push(Relation { a, b, interaction, hook });
        self
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Map an engine contact to the game event its relation is wired to.
    /// Contacts on hook-less relations, unknown relations, or bodies that do
    /// not match the relation's groups route to nothing.
    pub fn route(&self, contact: &Contact) -> Option<GameEvent> {
        let relation = self.relations.get(contact.relation)?;
        if !relation.a.contains(contact.a) || !relation.b.contains(contact.b) {
            return None;
        }
        match (relation.hook?, contact.b) {
            (Hook::StarCollected, BodyRef::Star(star)) => Some(GameEvent::StarCollected { star }),
            (Hook::PlayerHitBomb, BodyRef::Bomb(bomb)) => Some(GameEvent::PlayerHitBomb { bomb }),
            _ => None,
        }
    }
}
