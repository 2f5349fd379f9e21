use star_catcher::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn left_half_player_gets_left_half_bombs() {
    let mut rng = seeded_rng();
    let mut spawner = BombSpawner::new();
    for _ in 0..100 {
        let bomb = spawner.spawn(50.0, &mut rng);
        assert!((0.0..=400.0).contains(&bomb.x), "x = {}", bomb.x);
    }
    assert_eq!(spawner.bombs().len(), 100);
}

#[test]
fn right_half_player_gets_right_half_bombs() {
    let mut rng = seeded_rng();
    let mut spawner = BombSpawner::new();
    for _ in 0..100 {
        let bomb = spawner.spawn(650.0, &mut rng);
        assert!((400.0..=800.0).contains(&bomb.x), "x = {}", bomb.x);
    }
}

#[test]
fn midline_counts_as_right_half() {
    let mut rng = seeded_rng();
    let mut spawner = BombSpawner::new();
    for _ in 0..50 {
        assert!(spawner.spawn(400.0, &mut rng).x >= 400.0);
    }
    for _ in 0..50 {
        assert!(spawner.spawn(399.9, &mut rng).x <= 400.0);
    }
}

#[test]
fn spawn_velocity_and_height() {
    let mut rng = seeded_rng();
    let mut spawner = BombSpawner::new();
    for i in 0..200 {
        let bomb = spawner.spawn(i as f32 * 4.0, &mut rng);
        assert!((-200.0..=200.0).contains(&bomb.vx));
        assert_eq!(bomb.vx.fract(), 0.0);
        assert_eq!(bomb.x.fract(), 0.0);
        assert_eq!(bomb.vy, SPAWN_VY);
        assert_eq!(bomb.y, SPAWN_Y);
    }
}

#[test]
fn population_only_grows() {
    let mut rng = seeded_rng();
    let mut spawner = BombSpawner::new();
    assert!(spawner.bombs().is_empty());
    let first = spawner.spawn(10.0, &mut rng);
    let second = spawner.spawn(790.0, &mut rng);
    assert_eq!(spawner.bombs(), &[first, second]);
}
