//! Game state and core simulation types
//!
//! `GameSession` is everything a restart throws away. `GameState` wraps it
//! with what survives a restart: rules, RNG and the high score.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::screen::Screen;
use super::spawn;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::settings::Settings;

/// Which image currently represents an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    PlayerUp,
    PlayerDown,
    Explosion,
    Asteroid,
}

/// A positioned, sized, textured rectangle
///
/// Size is fixed at construction from the sprite's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner in screen space
    pub pos: IVec2,
    size: IVec2,
    pub sprite: Sprite,
}

impl Entity {
    pub fn new(pos: IVec2, size: IVec2, sprite: Sprite) -> Self {
        Self { pos, size, sprite }
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.size
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move to a new position and swap the visual state in one step
    pub fn update(&mut self, pos: IVec2, sprite: Sprite) {
        self.pos = pos;
        self.sprite = sprite;
    }
}

/// Tunables for a run, resolved from settings and loaded sprite sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Screen size in pixels
    pub screen: IVec2,
    /// Per-tick displacement for the player and obstacles
    pub gravity: i32,
    pub score_per_tick: f64,
    /// Obstacles spawn with y in [margin, height - margin)
    pub spawn_margin: i32,
    pub spawn_interval: f64,
    /// Spawn only while the obstacle count is <= this
    pub spawn_cap: usize,
    /// Ending animation length in ticks
    pub ending_ticks: u32,
    pub player_size: IVec2,
    pub obstacle_size: IVec2,
}

impl Rules {
    pub fn new(settings: &Settings, player_size: IVec2, obstacle_size: IVec2) -> Self {
        Self {
            screen: IVec2::new(settings.screen_width, settings.screen_height),
            gravity: settings.gravity,
            score_per_tick: settings.score_per_tick,
            spawn_margin: settings.spawn_margin,
            spawn_interval: settings.spawn_interval,
            spawn_cap: settings.spawn_cap,
            ending_ticks: ENDING_SECONDS * settings.target_fps,
            player_size,
            obstacle_size,
        }
    }

    /// Hard ceiling on simultaneous obstacles
    pub fn max_obstacles(&self) -> usize {
        self.spawn_cap + 1
    }
}

/// Notable things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Left the main menu
    Started,
    /// A new obstacle joined; `count` is the collection size afterwards
    ObstacleSpawned { count: usize },
    /// The player hit the obstacle at `index`
    Collision { index: usize },
    /// The ending animation finished
    GameOver { score: u64, new_high_score: bool },
    /// A fresh session replaced the finished one
    Restarted,
}

/// Per-run state, rebuilt from scratch on restart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Fractional score, truncated for display
    pub score: f64,
    pub player: Entity,
    /// Obstacle slots in spawn order; slots are recycled, never removed mid-run
    pub obstacles: Vec<Entity>,
    pub screen: Screen,
    /// Ticks spent in the ending animation
    pub ending_ticks: u32,
}

impl GameSession {
    /// Build a session: player centred, a single obstacle just off the right edge
    pub fn new(rules: &Rules, rng: &mut Pcg32, screen: Screen) -> Self {
        let player = Entity::new(
            rules.screen / 2 - rules.player_size / 2,
            rules.player_size,
            Sprite::PlayerDown,
        );

        let mut obstacles = Vec::with_capacity(rules.max_obstacles());
        obstacles.push(spawn::new_obstacle(rules, rng));

        Self {
            score: 0.0,
            player,
            obstacles,
            screen,
            ending_ticks: 0,
        }
    }

    /// Score as shown on screen and compared against the high score
    pub fn display_score(&self) -> u64 {
        self.score as u64
    }
}

/// Complete game state owned by the loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    pub session: GameSession,
    /// Best score this process has seen
    pub high_score: HighScore,
    /// Simulation tick counter across all sessions
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state on the main menu
    pub fn new(rules: Rules, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = GameSession::new(&rules, &mut rng, Screen::MainMenu);
        Self {
            seed,
            rules,
            session,
            high_score: HighScore::new(),
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Replace the session with a fresh one, straight into gameplay
    pub fn restart(&mut self) {
        self.session = GameSession::new(&self.rules, &mut self.rng, Screen::GamePlay);
        self.events.push(GameEvent::Restarted);
    }
}
