/// Minimal arcade physics: gravity, box-vs-box separation and bouncy world
/// bounds.
///
/// Every body is an axis-aligned box centred on its position. Static
/// platforms never move; dynamic bodies are integrated with semi-implicit
/// Euler and pushed out of platforms along the axis of least penetration.

use std::collections::HashMap;

use tracing::trace;

use crate::collision::{Contact, Group, Interaction, Relation};
use crate::config::GameConfig;
use crate::engine::{Bodies, BodyRef, Cue, Engine};
use crate::entities::{Bomb, Platform, Player, Star};

// ── Boxes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub cx: f32,
    pub cy: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Aabb { cx, cy, half_w: w / 2.0, half_h: h / 2.0 }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.half_w
    }

    pub fn right(&self) -> f32 {
        self.cx + self.half_w
    }

    pub fn top(&self) -> f32 {
        self.cy - self.half_h
    }

    pub fn bottom(&self) -> f32 {
        self.cy + self.half_h
    }

    /// Strict intersection: touching edges do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Penetration depth on each axis, assuming the boxes intersect.
    fn penetration(&self, other: &Aabb) -> (f32, f32) {
        let x = (self.right() - other.left()).min(other.right() - self.left());
        let y = (self.bottom() - other.top()).min(other.bottom() - self.top());
        (x, y)
    }
}

// ── Dynamic bodies ────────────────────────────────────────────────────────────

trait Dynamic {
    fn bounds(&self) -> Aabb;
    fn shift(&mut self, dx: f32, dy: f32);
    fn velocity(&mut self) -> (&mut f32, &mut f32);
    /// Restitution on (x, y).
    fn bounce(&self) -> (f32, f32);
    /// Called when the body comes to rest on something below it.
    fn land(&mut self) {}
}

impl Dynamic for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, Player::WIDTH, Player::HEIGHT)
    }
    fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
    fn velocity(&mut self) -> (&mut f32, &mut f32) {
        (&mut self.vx, &mut self.vy)
    }
    fn bounce(&self) -> (f32, f32) {
        (Player::BOUNCE, Player::BOUNCE)
    }
    fn land(&mut self) {
        self.grounded = true;
    }
}

impl Dynamic for Star {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, Star::WIDTH, Star::HEIGHT)
    }
    fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
    fn velocity(&mut self) -> (&mut f32, &mut f32) {
        (&mut self.vx, &mut self.vy)
    }
    fn bounce(&self) -> (f32, f32) {
        (0.0, self.bounce_y)
    }
}

impl Dynamic for Bomb {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, Bomb::SIZE, Bomb::SIZE)
    }
    fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
    fn velocity(&mut self) -> (&mut f32, &mut f32) {
        (&mut self.vx, &mut self.vy)
    }
    fn bounce(&self) -> (f32, f32) {
        (Bomb::BOUNCE, Bomb::BOUNCE)
    }
}

pub fn platform_bounds(platform: &Platform) -> Aabb {
    Aabb::new(platform.x, platform.y, platform.width(), platform.height())
}

fn integrate(body: &mut impl Dynamic, gravity_y: f32, dt: f32) {
    let (vx, vy) = body.velocity();
    *vy += gravity_y * dt;
    let (dx, dy) = (*vx * dt, *vy * dt);
    body.shift(dx, dy);
}

/// Push `body` out of `wall` and reflect the velocity component that drove
/// it in. Returns whether the two were touching.
fn separate(body: &mut impl Dynamic, wall: &Aabb) -> bool {
    let bounds = body.bounds();
    if !bounds.intersects(wall) {
        return false;
    }
    let (pen_x, pen_y) = bounds.penetration(wall);
    let (bounce_x, bounce_y) = body.bounce();
    if pen_y <= pen_x {
        if bounds.cy < wall.cy {
            body.shift(0.0, -pen_y);
            let (_, vy) = body.velocity();
            if *vy > 0.0 {
                *vy = -*vy * bounce_y;
            }
            body.land();
        } else {
            body.shift(0.0, pen_y);
            let (_, vy) = body.velocity();
            if *vy < 0.0 {
                *vy = -*vy * bounce_y;
            }
        }
    } else if bounds.cx < wall.cx {
        body.shift(-pen_x, 0.0);
        let (vx, _) = body.velocity();
        if *vx > 0.0 {
            *vx = -*vx * bounce_x;
        }
    } else {
        body.shift(pen_x, 0.0);
        let (vx, _) = body.velocity();
        if *vx < 0.0 {
            *vx = -*vx * bounce_x;
        }
    }
    true
}

fn keep_in_bounds(body: &mut impl Dynamic, width: f32, height: f32) {
    let bounds = body.bounds();
    let (bounce_x, bounce_y) = body.bounce();
    if bounds.left() < 0.0 {
        body.shift(-bounds.left(), 0.0);
        let (vx, _) = body.velocity();
        *vx = vx.abs() * bounce_x;
    } else if bounds.right() > width {
        body.shift(width - bounds.right(), 0.0);
        let (vx, _) = body.velocity();
        *vx = -vx.abs() * bounce_x;
    }
    if bounds.top() < 0.0 {
        body.shift(0.0, -bounds.top());
        let (_, vy) = body.velocity();
        *vy = vy.abs() * bounce_y;
    } else if bounds.bottom() > height {
        body.shift(0.0, height - bounds.bottom());
        let (_, vy) = body.velocity();
        *vy = -vy.abs() * bounce_y;
        body.land();
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ArcadePhysics {
    width: f32,
    height: f32,
    gravity_y: f32,
    frozen: bool,
    cues: HashMap<BodyRef, Cue>,
}

impl ArcadePhysics {
    pub fn new(config: &GameConfig) -> Self {
        ArcadePhysics {
            width: config.width as f32,
            height: config.height as f32,
            gravity_y: config.gravity_y,
            frozen: false,
            cues: HashMap::new(),
        }
    }

    /// The cue most recently played on `target`, if any.
    pub fn cue_for(&self, target: BodyRef) -> Option<Cue> {
        self.cues.get(&target).copied()
    }
}

impl Engine for ArcadePhysics {
    fn step(&mut self, bodies: Bodies<'_>, relations: &[Relation], dt: f32) -> Vec<Contact> {
        if self.frozen {
            return Vec::new();
        }
        let Bodies { player, stars, bombs, platforms } = bodies;

        // ── 1. Integrate ─────────────────────────────────────────────────────
        player.grounded = false;
        integrate(player, self.gravity_y, dt);
        for star in stars.iter_mut().filter(|s| s.active) {
            integrate(star, self.gravity_y, dt);
        }
        for bomb in bombs.iter_mut() {
            integrate(bomb, self.gravity_y, dt);
        }

        // ── 2. World bounds ──────────────────────────────────────────────────
        keep_in_bounds(player, self.width, self.height);
        for bomb in bombs.iter_mut() {
            keep_in_bounds(bomb, self.width, self.height);
        }

        // ── 3. Declared relations, in registration order ─────────────────────
        let walls: Vec<Aabb> = platforms.iter().map(platform_bounds).collect();
        let mut contacts = Vec::new();

        for (index, relation) in relations.iter().enumerate() {
            let collide = relation.interaction == Interaction::Collide;
            let report = relation.hook.is_some();
            match (relation.a, relation.b) {
                (Group::Player, Group::Platforms) if collide => {
                    for wall in &walls {
                        separate(player, wall);
                    }
                }
                (Group::Stars, Group::Platforms) if collide => {
                    for star in stars.iter_mut().filter(|s| s.active) {
                        for wall in &walls {
                            separate(star, wall);
                        }
                    }
                }
                (Group::Bombs, Group::Platforms) if collide => {
                    for bomb in bombs.iter_mut() {
                        for wall in &walls {
                            separate(bomb, wall);
                        }
                    }
                }
                (Group::Player, Group::Bombs) => {
                    for (i, bomb) in bombs.iter_mut().enumerate() {
                        let hit = player.bounds();
                        let touching = if collide {
                            separate(bomb, &hit)
                        } else {
                            bomb.bounds().intersects(&hit)
                        };
                        if touching && report {
                            contacts.push(Contact { relation: index, a: BodyRef::Player, b: BodyRef::Bomb(i) });
                        }
                    }
                }
                (Group::Player, Group::Stars) => {
                    let reach = player.bounds();
                    for (i, star) in stars.iter_mut().enumerate().filter(|(_, s)| s.active) {
                        let touching = if collide {
                            separate(star, &reach)
                        } else {
                            star.bounds().intersects(&reach)
                        };
                        if touching && report {
                            contacts.push(Contact { relation: index, a: BodyRef::Player, b: BodyRef::Star(i) });
                        }
                    }
                }
                _ => trace!(?relation, "relation not simulated by arcade physics"),
            }
        }

        contacts
    }

    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn play_cue(&mut self, cue: Cue, target: BodyRef) {
        self.cues.insert(target, cue);
    }
}
