/// All game entity types — pure data, no logic.
///
/// Positions are the centre of each body in play-field pixels, with `y`
/// growing downward. Velocities are pixels per second.

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Digital input snapshot sampled by the host once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Set by the physics pass when the body rests on something below it.
    pub grounded: bool,
    pub facing: Facing,
}

impl Player {
    pub const WIDTH: f32 = 32.0;
    pub const HEIGHT: f32 = 48.0;
    pub const BOUNCE: f32 = 0.2;

    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            facing: Facing::Idle,
        }
    }
}

// ── Collectibles & hazards ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub active: bool,
    /// Vertical bounce coefficient, drawn from [0.4, 0.8] at spawn.
    pub bounce_y: f32,
}

impl Star {
    pub const WIDTH: f32 = 24.0;
    pub const HEIGHT: f32 = 22.0;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Bomb {
    pub const SIZE: f32 = 14.0;
    /// Bombs keep all their energy on every bounce.
    pub const BOUNCE: f32 = 1.0;
}

// ── Static world ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Platform {
    pub const BASE_WIDTH: f32 = 400.0;
    pub const BASE_HEIGHT: f32 = 32.0;

    pub fn width(&self) -> f32 {
        Self::BASE_WIDTH * self.scale
    }

    pub fn height(&self) -> f32 {
        Self::BASE_HEIGHT * self.scale
    }
}

/// The fixed ledge layout: a double-scale ground plus three floating ledges.
pub fn default_platforms() -> Vec<Platform> {
    vec![
        Platform { x: 400.0, y: 568.0, scale: 2.0 },
        Platform { x: 600.0, y: 400.0, scale: 1.0 },
        Platform { x: 50.0, y: 250.0, scale: 1.0 },
        Platform { x: 750.0, y: 220.0, scale: 1.0 },
    ]
}
