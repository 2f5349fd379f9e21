/// The per-tick game loop and the handlers wired to collision hooks.
///
/// `GameController` owns every entity. The host calls `tick` once per frame
/// with a fresh input snapshot; the controller sets the player's velocity,
/// lets the engine move everything, and handles the contacts the engine
/// reports before returning. Randomness always comes in through `rng` so
/// callers control determinism.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::collision::{CollisionDispatcher, GameEvent};
use crate::config::GameConfig;
use crate::engine::{Bodies, BodyRef, Cue, Engine};
use crate::entities::{
    default_platforms, Bomb, Facing, GameStatus, InputState, Platform, Player, Star,
};
use crate::score::{ScoreTracker, STAR_POINTS};
use crate::spawner::BombSpawner;
use crate::swarm::StarSwarm;

pub const RUN_SPEED: f32 = 160.0;
pub const JUMP_VELOCITY: f32 = -330.0;
pub const PLAYER_START: (f32, f32) = (100.0, 450.0);

pub struct GameController {
    config: GameConfig,
    player: Player,
    platforms: Vec<Platform>,
    swarm: StarSwarm,
    spawner: BombSpawner,
    score: ScoreTracker,
    dispatcher: CollisionDispatcher,
    status: GameStatus,
    ticks: u64,
}

impl GameController {
    /// Build the world: ledges, the player, a full star swarm, a zero score,
    /// no bombs, and the standard collision rules.
    pub fn initialize(config: GameConfig, rng: &mut impl Rng) -> Self {
        let (x, y) = PLAYER_START;
        info!(width = config.width, height = config.height, "world initialised");
        GameController {
            config,
            player: Player::new(x, y),
            platforms: default_platforms(),
            swarm: StarSwarm::new(rng),
            spawner: BombSpawner::new(),
            score: ScoreTracker::new(),
            dispatcher: CollisionDispatcher::standard(),
            status: GameStatus::Playing,
            ticks: 0,
        }
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    /// Advance one frame. Does nothing at all once the game is over.
    pub fn tick(&mut self, input: InputState, engine: &mut impl Engine, rng: &mut impl Rng) {
        if self.status == GameStatus::GameOver {
            return;
        }
        self.ticks += 1;

        // ── 1. Horizontal run + facing ───────────────────────────────────────
        let (vx, facing, cue) = if input.left {
            (-RUN_SPEED, Facing::Left, Cue::RunLeft)
        } else if input.right {
            (RUN_SPEED, Facing::Right, Cue::RunRight)
        } else {
            (0.0, Facing::Idle, Cue::Turn)
        };
        self.player.vx = vx;
        self.player.facing = facing;
        engine.play_cue(cue, BodyRef::Player);

        // ── 2. Jump, only from the ground ────────────────────────────────────
        if input.up && self.player.grounded {
            self.player.vy = JUMP_VELOCITY;
        }

        // ── 3. Physics pass ──────────────────────────────────────────────────
        let bodies = Bodies {
            player: &mut self.player,
            stars: self.swarm.stars_mut(),
            bombs: self.spawner.bombs_mut(),
            platforms: &self.platforms,
        };
        let contacts = engine.step(bodies, self.dispatcher.relations(), self.config.tick_seconds());
        trace!(tick = self.ticks, contacts = contacts.len(), "physics stepped");

        // ── 4. Route contacts, in the order reported ─────────────────────────
        for contact in &contacts {
            match self.dispatcher.route(contact) {
                Some(GameEvent::StarCollected { star }) => self.on_star_collected(star, rng),
                Some(GameEvent::PlayerHitBomb { bomb }) => self.on_player_hit_bomb(bomb, engine),
                None => {}
            }
        }
    }

    // ── Hooks ────────────────────────────────────────────────────────────────

    /// The player touched a star. Already-collected stars are ignored, as is
    /// everything after game over.
    pub fn on_star_collected(&mut self, star: usize, rng: &mut impl Rng) {
        if self.status == GameStatus::GameOver || !self.swarm.deactivate(star) {
            return;
        }
        self.score.add(STAR_POINTS);
        debug!(star, score = self.score.current_score(), "star collected");
        self.spawner.spawn(self.player.x, rng);
        self.swarm.respawn_if_cleared();
    }

    /// The player ran into a bomb: freeze the world and end the game. Fires
    /// at most once.
    pub fn on_player_hit_bomb(&mut self, bomb: usize, engine: &mut impl Engine) {
        if self.status == GameStatus::GameOver {
            return;
        }
        engine.freeze();
        self.status = GameStatus::GameOver;
        engine.play_cue(Cue::Defeat, BodyRef::Player);
        info!(bomb, score = self.score.current_score(), ticks = self.ticks, "game over");
    }

    // ── Read accessors ───────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stars(&self) -> &[Star] {
        self.swarm.stars()
    }

    pub fn swarm(&self) -> &StarSwarm {
        &self.swarm
    }

    pub fn bombs(&self) -> &[Bomb] {
        self.spawner.bombs()
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn display_text(&self) -> String {
        self.score.display_text()
    }

    pub fn dispatcher(&self) -> &CollisionDispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn respawn_waves(&self) -> u32 {
        self.swarm.waves()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Test and tooling access to the player, e.g. to place it before a
    /// scripted collision.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
