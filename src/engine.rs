/// The boundary between the gameplay core and whatever moves the bodies.
///
/// The controller hands the engine a borrowed view of every physical body
/// once per tick and gets back the contacts it detected. Anything that
/// integrates motion (the bundled arcade physics, a scripted test double,
/// a real engine binding) plugs in here.

use crate::collision::{Contact, Relation};
use crate::entities::{Bomb, Platform, Player, Star};

/// Names one body taking part in a contact or a cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Player,
    Star(usize),
    Bomb(usize),
    Platform(usize),
}

/// Animation and visual cues the core asks the engine to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    RunLeft,
    RunRight,
    Turn,
    /// Red tint plus the turn frame, shown once when the player is hit.
    Defeat,
}

/// Mutable view of everything the physics pass may move.
pub struct Bodies<'a> {
    pub player: &'a mut Player,
    pub stars: &'a mut [Star],
    pub bombs: &'a mut [Bomb],
    pub platforms: &'a [Platform],
}

pub trait Engine {
    /// Advance the simulation by `dt` seconds and report contacts for every
    /// relation that carries a hook, in detection order.
    fn step(&mut self, bodies: Bodies<'_>, relations: &[Relation], dt: f32) -> Vec<Contact>;

    /// Halt all further stepping. Irreversible.
    fn freeze(&mut self);

    fn is_frozen(&self) -> bool;

    fn play_cue(&mut self, cue: Cue, target: BodyRef);
}
