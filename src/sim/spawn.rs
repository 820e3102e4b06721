//! Obstacle spawning and recycling

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, Rules, Sprite};

/// Random y inside the spawn band `[margin, height - margin)`
pub fn random_band_y(rules: &Rules, rng: &mut Pcg32) -> i32 {
    rng.random_range(rules.spawn_margin..rules.screen.y - rules.spawn_margin)
}

/// Whether this tick's score earns another obstacle.
///
/// The score starts at zero and only gains a fixed binary-exact increment,
/// so multiples of the interval compare equal exactly.
pub fn should_spawn(score: f64, count: usize, rules: &Rules) -> bool {
    score > 1.0 && score % rules.spawn_interval == 0.0 && count <= rules.spawn_cap
}

/// A fresh obstacle sitting just past the right edge
pub fn new_obstacle(rules: &Rules, rng: &mut Pcg32) -> Entity {
    let y = random_band_y(rules, rng);
    Entity::new(IVec2::new(rules.screen.x, y), rules.obstacle_size, Sprite::Asteroid)
}

/// Shift an obstacle left by one step, sending it back past the right edge
/// at a new height once it has fully left the screen.
pub fn advance_obstacle(obstacle: &mut Entity, rules: &Rules, rng: &mut Pcg32) {
    let mut pos = obstacle.pos - IVec2::new(rules.gravity, 0);

    if pos.x < -obstacle.width() {
        pos.x = rules.screen.x + obstacle.width();
        pos.y = random_band_y(rules, rng);
    }

    let sprite = obstacle.sprite;
    obstacle.update(pos, sprite);
}
