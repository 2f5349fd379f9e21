/// Bomb creation. The hazard population only ever grows during a session.

use rand::Rng;
use tracing::debug;

use crate::entities::Bomb;

pub const SPAWN_Y: f32 = 16.0;
pub const SPAWN_VY: f32 = 20.0;
const MAX_SPAWN_VX: i32 = 200;
/// The play-field is split into two halves at this column.
const HALF_X: i32 = 400;
const FIELD_X: i32 = 800;

#[derive(Clone, Debug, Default)]
pub struct BombSpawner {
    bombs: Vec<Bomb>,
}

impl BombSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn bombs_mut(&mut self) -> &mut [Bomb] {
        &mut self.bombs
    }

    /// Drop a new bomb into the half of the field the player is standing in
    /// and return a copy of it.
    pub fn spawn(&mut self, player_x: f32, rng: &mut impl Rng) -> Bomb {
        // Same half as the player, not the opposite one.
        let x = if player_x < HALF_X as f32 {
            rng.gen_range(0..=HALF_X)
        } else {
            rng.gen_range(HALF_X..=FIELD_X)
        };
        let vx = rng.gen_range(-MAX_SPAWN_VX..=MAX_SPAWN_VX);
        let bomb = Bomb {
            x: x as f32,
            y: SPAWN_Y,
            vx: vx as f32,
            vy: SPAWN_VY,
        };
        debug!(x, vx, population = self.bombs.len() + 1, "bomb spawned");
        self.bombs.push(bomb.clone());
        bomb
    }
}
