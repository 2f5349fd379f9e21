use std::collections::VecDeque;

use star_catcher::collision::{Contact, Hook, Relation};
use star_catcher::config::GameConfig;
use star_catcher::engine::{Bodies, BodyRef, Cue, Engine};
use star_catcher::entities::*;
use star_catcher::game::*;
use star_catcher::physics::ArcadePhysics;
use star_catcher::swarm::SWARM_SIZE;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Replays a queue of per-step contact lists and records everything the
/// controller asks of it. Moves nothing.
#[derive(Default)]
struct ScriptedEngine {
    script: VecDeque<Vec<Contact>>,
    frozen: bool,
    freeze_calls: u32,
    steps: u32,
    cues: Vec<(Cue, BodyRef)>,
    last_dt: f32,
}

impl ScriptedEngine {
    fn then(mut self, contacts: Vec<Contact>) -> Self {
        self.script.push_back(contacts);
        self
    }
}

impl Engine for ScriptedEngine {
    fn step(&mut self, _bodies: Bodies<'_>, _relations: &[Relation], dt: f32) -> Vec<Contact> {
        if self.frozen {
            return Vec::new();
        }
        self.steps += 1;
        self.last_dt = dt;
        self.script.pop_front().unwrap_or_default()
    }

    fn freeze(&mut self) {
        self.frozen = true;
        self.freeze_calls += 1;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn play_cue(&mut self, cue: Cue, target: BodyRef) {
        self.cues.push((cue, target));
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn new_game(rng: &mut StdRng) -> GameController {
    GameController::initialize(GameConfig::default(), rng)
}

fn relation_for(game: &GameController, hook: Hook) -> usize {
    game.dispatcher()
        .relations()
        .iter()
        .position(|r| r.hook == Some(hook))
        .unwrap()
}

fn star_contact(game: &GameController, star: usize) -> Contact {
    Contact {
        relation: relation_for(game, Hook::StarCollected),
        a: BodyRef::Player,
        b: BodyRef::Star(star),
    }
}

fn bomb_contact(game: &GameController, bomb: usize) -> Contact {
    Contact {
        relation: relation_for(game, Hook::PlayerHitBomb),
        a: BodyRef::Player,
        b: BodyRef::Bomb(bomb),
    }
}

const IDLE: InputState = InputState { left: false, right: false, up: false };

// ── initialize ───────────────────────────────────────────────────────────────

#[test]
fn initialize_builds_the_world() {
    let mut rng = seeded_rng();
    let game = new_game(&mut rng);

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.platforms().len(), 4);
    assert_eq!(game.score().current_score(), 0);
    assert!(game.bombs().is_empty());
    assert_eq!(game.stars().len(), SWARM_SIZE);
    assert_eq!((game.player().x, game.player().y), PLAYER_START);
    assert_eq!(game.player().facing, Facing::Idle);
    assert_eq!(game.dispatcher().relations().len(), 5);
    assert_eq!(game.display_text(), "score: 0");
}

#[test]
fn initialize_lays_stars_out_in_a_row() {
    let mut rng = seeded_rng();
    let game = new_game(&mut rng);
    for (i, star) in game.stars().iter().enumerate() {
        assert_eq!(star.x, 12.0 + 70.0 * i as f32);
        assert_eq!(star.y, 0.0);
        assert!(star.active);
        assert!((0.4..=0.8).contains(&star.bounce_y));
    }
}

// ── tick: input ──────────────────────────────────────────────────────────────

#[test]
fn tick_left_runs_left() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();
    game.tick(InputState { left: true, ..IDLE }, &mut engine, &mut rng);
    assert_eq!(game.player().vx, -RUN_SPEED);
    assert_eq!(game.player().facing, Facing::Left);
    assert_eq!(engine.cues, vec![(Cue::RunLeft, BodyRef::Player)]);
}

#[test]
fn tick_right_runs_right() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();
    game.tick(InputState { right: true, ..IDLE }, &mut engine, &mut rng);
    assert_eq!(game.player().vx, RUN_SPEED);
    assert_eq!(game.player().facing, Facing::Right);
    assert_eq!(engine.cues, vec![(Cue::RunRight, BodyRef::Player)]);
}

#[test]
fn tick_left_wins_over_right() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();
    game.tick(InputState { left: true, right: true, up: false }, &mut engine, &mut rng);
    assert_eq!(game.player().vx, -RUN_SPEED);
    assert_eq!(game.player().facing, Facing::Left);
}

#[test]
fn tick_without_input_stops_and_turns() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();
    game.tick(InputState { right: true, ..IDLE }, &mut engine, &mut rng);
    game.tick(IDLE, &mut engine, &mut rng);
    assert_eq!(game.player().vx, 0.0);
    assert_eq!(game.player().facing, Facing::Idle);
    assert_eq!(engine.cues.last(), Some(&(Cue::Turn, BodyRef::Player)));
}

#[test]
fn jump_requires_ground() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();

    // Airborne at start: up does nothing.
    game.tick(InputState { up: true, ..IDLE }, &mut engine, &mut rng);
    assert_eq!(game.player().vy, 0.0);

    game.player_mut().grounded = true;
    game.tick(InputState { up: true, ..IDLE }, &mut engine, &mut rng);
    assert_eq!(game.player().vy, JUMP_VELOCITY);
}

#[test]
fn tick_passes_configured_timestep() {
    let mut rng = seeded_rng();
    let config = GameConfig { tick_rate_hz: 50, ..GameConfig::default() };
    let mut game = GameController::initialize(config, &mut rng);
    let mut engine = ScriptedEngine::default();
    game.tick(IDLE, &mut engine, &mut rng);
    assert_eq!(engine.steps, 1);
    assert!((engine.last_dt - 0.02).abs() < 1e-6);
    assert_eq!(game.ticks(), 1);
}

// ── star collection ──────────────────────────────────────────────────────────

#[test]
fn star_contact_scores_and_spawns_a_bomb() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let contact = star_contact(&game, 3);
    let mut engine = ScriptedEngine::default().then(vec![contact]);

    game.tick(IDLE, &mut engine, &mut rng);

    assert_eq!(game.score().current_score(), 10);
    assert_eq!(game.display_text(), "score: 10");
    assert!(!game.stars()[3].active);
    assert_eq!(game.swarm().active_count(), SWARM_SIZE - 1);
    assert_eq!(game.bombs().len(), 1);
    let bomb = &game.bombs()[0];
    // Player starts at x=100, left half.
    assert!((0.0..=400.0).contains(&bomb.x));
    assert_eq!(bomb.y, 16.0);
    assert_eq!(bomb.vy, 20.0);
}

#[test]
fn collecting_inactive_star_is_a_no_op() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.on_star_collected(5, &mut rng);
    game.on_star_collected(5, &mut rng);
    game.on_star_collected(5, &mut rng);
    assert_eq!(game.score().current_score(), 10);
    assert_eq!(game.bombs().len(), 1);
}

#[test]
fn unknown_star_index_is_ignored() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.on_star_collected(SWARM_SIZE + 3, &mut rng);
    assert_eq!(game.score().current_score(), 0);
    assert!(game.bombs().is_empty());
}

#[test]
fn several_star_contacts_in_one_tick_all_count() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let contacts = vec![star_contact(&game, 0), star_contact(&game, 7), star_contact(&game, 0)];
    let mut engine = ScriptedEngine::default().then(contacts);

    game.tick(IDLE, &mut engine, &mut rng);

    assert_eq!(game.score().current_score(), 20);
    assert_eq!(game.bombs().len(), 2);
}

#[test]
fn score_is_ten_per_distinct_star() {
    let mut rng = seeded_rng();
    for n in 0..=SWARM_SIZE - 1 {
        let mut game = new_game(&mut rng);
        let mut order: Vec<usize> = (0..SWARM_SIZE).collect();
        order.shuffle(&mut rng);
        for &i in order.iter().take(n) {
            game.on_star_collected(i, &mut rng);
        }
        assert_eq!(game.score().current_score(), 10 * n as u32);
    }
}

#[test]
fn clearing_the_swarm_respawns_it_once() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut game = GameController::initialize(config.clone(), &mut rng);
    let original_x: Vec<f32> = game.stars().iter().map(|s| s.x).collect();

    // Let the stars fall for a moment before they are collected.
    let mut physics = ArcadePhysics::new(&config);
    for _ in 0..20 {
        game.tick(IDLE, &mut physics, &mut rng);
    }
    assert!(game.stars().iter().all(|s| s.y > 0.0));
    assert_eq!(game.score().current_score(), 0);

    let mut order: Vec<usize> = (0..SWARM_SIZE).collect();
    order.shuffle(&mut rng);
    for &i in &order {
        game.on_star_collected(i, &mut rng);
    }

    assert_eq!(game.score().current_score(), 120);
    assert_eq!(game.respawn_waves(), 1);
    assert_eq!(game.swarm().active_count(), SWARM_SIZE);
    assert_eq!(game.bombs().len(), 12);
    for (star, x) in game.stars().iter().zip(&original_x) {
        assert!(star.active);
        assert_eq!(star.x, *x);
        assert_eq!(star.y, 0.0);
    }
}

#[test]
fn last_star_via_tick_respawns_before_next_tick() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    for i in 0..SWARM_SIZE - 1 {
        game.on_star_collected(i, &mut rng);
    }
    assert_eq!(game.swarm().active_count(), 1);

    let contact = star_contact(&game, SWARM_SIZE - 1);
    let mut engine = ScriptedEngine::default().then(vec![contact]);
    game.tick(IDLE, &mut engine, &mut rng);

    assert_eq!(game.swarm().active_count(), SWARM_SIZE);
    assert!(game.stars().iter().all(|s| s.y == 0.0));
}

// ── game over ────────────────────────────────────────────────────────────────

#[test]
fn bomb_contact_ends_the_game() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.on_star_collected(0, &mut rng);
    let contact = bomb_contact(&game, 0);
    let mut engine = ScriptedEngine::default().then(vec![contact]);

    game.tick(IDLE, &mut engine, &mut rng);

    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(engine.is_frozen());
    assert_eq!(engine.freeze_calls, 1);
    assert_eq!(engine.cues.last(), Some(&(Cue::Defeat, BodyRef::Player)));
}

#[test]
fn game_over_fires_only_once() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut engine = ScriptedEngine::default();
    game.on_player_hit_bomb(0, &mut engine);
    game.on_player_hit_bomb(0, &mut engine);
    assert_eq!(engine.freeze_calls, 1);
    assert_eq!(engine.cues.iter().filter(|(c, _)| *c == Cue::Defeat).count(), 1);
}

#[test]
fn stars_after_the_fatal_contact_in_the_same_tick_do_not_score() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.on_star_collected(0, &mut rng);
    let contacts = vec![bomb_contact(&game, 0), star_contact(&game, 4)];
    let mut engine = ScriptedEngine::default().then(contacts);

    game.tick(IDLE, &mut engine, &mut rng);

    assert_eq!(game.score().current_score(), 10);
    assert!(game.stars()[4].active);
}

#[test]
fn ticks_after_game_over_change_nothing() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut game = GameController::initialize(config.clone(), &mut rng);
    let mut physics = ArcadePhysics::new(&config);

    for _ in 0..10 {
        game.tick(InputState { right: true, ..IDLE }, &mut physics, &mut rng);
    }
    game.on_star_collected(11, &mut rng);
    game.on_player_hit_bomb(0, &mut physics);

    let player = game.player().clone();
    let stars = game.stars().to_vec();
    let bombs = game.bombs().to_vec();
    let score = game.score().clone();
    let ticks = game.ticks();

    let inputs = [
        InputState { left: true, ..IDLE },
        InputState { right: true, up: true, ..IDLE },
        IDLE,
    ];
    for input in inputs.iter().cycle().take(30) {
        game.tick(*input, &mut physics, &mut rng);
    }
    game.on_star_collected(2, &mut rng);

    assert_eq!(game.player(), &player);
    assert_eq!(game.stars(), stars.as_slice());
    assert_eq!(game.bombs(), bombs.as_slice());
    assert_eq!(game.score(), &score);
    assert_eq!(game.ticks(), ticks);
    assert_eq!(game.status(), GameStatus::GameOver);
}
