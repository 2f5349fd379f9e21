/// The batch of collectible stars.
///
/// The swarm always holds exactly `SWARM_SIZE` stars. Stars are switched off
/// one at a time as they are collected and come back all together once the
/// last one is gone.

use rand::Rng;
use tracing::info;

use crate::entities::Star;

pub const SWARM_SIZE: usize = 12;
const FIRST_X: f32 = 12.0;
const STEP_X: f32 = 70.0;
const BOUNCE_MIN: f32 = 0.4;
const BOUNCE_MAX: f32 = 0.8;

#[derive(Clone, Debug)]
pub struct StarSwarm {
    stars: Vec<Star>,
    waves: u32,
}

impl StarSwarm {
    /// Lay out a fresh row of stars along the top edge, each with its own
    /// vertical bounce.
    pub fn new(rng: &mut impl Rng) -> Self {
        let stars = (0..SWARM_SIZE)
            .map(|i| Star {
                x: FIRST_X + STEP_X * i as f32,
                y: 0.0,
                vx: 0.0,
                vy: 0.0,
                active: true,
                bounce_y: rng.gen_range(BOUNCE_MIN..=BOUNCE_MAX),
            })
            .collect();
        StarSwarm { stars, waves: 0 }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn active_count(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }

    /// Number of full respawns so far.
    pub fn waves(&self) -> u32 {
        self.waves
    }

    /// Switch off the star at `index`. Returns `false` when it was already
    /// collected (or out of range), in which case nothing changes.
    pub fn deactivate(&mut self, index: usize) -> bool {
        match self.stars.get_mut(index) {
            Some(star) if star.active => {
                star.active = false;
                star.vx = 0.0;
                star.vy = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Bring the whole batch back if every star has been collected.
    /// Returns whether a new wave started.
    pub fn respawn_if_cleared(&mut self) -> bool {
        assert_eq!(self.stars.len(), SWARM_SIZE, "swarm lost its fixed size");
        if self.active_count() != 0 {
            return false;
        }
        for star in &mut self.stars {
            star.active = true;
            star.y = 0.0;
            star.vx = 0.0;
            star.vy = 0.0;
        }
        self.waves += 1;
        info!(wave = self.waves, "star swarm respawned");
        true
    }
}
