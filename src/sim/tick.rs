//! Fixed timestep simulation tick
//!
//! One call per frame. Order within a tick: menu confirm, gameplay step,
//! ending countdown, game-over handling.

use glam::IVec2;

use super::autopilot;
use super::screen::{Screen, ScreenEvent};
use super::spawn;
use super::state::{GameEvent, GameState, Sprite};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Ascend control is held
    pub ascend: bool,
    /// Confirm control was newly pressed this tick
    pub confirm: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        match state.session.screen {
            Screen::MainMenu | Screen::GameOver => input.confirm = true,
            Screen::GamePlay => input.ascend = autopilot::steer(&state.session, &state.rules),
            Screen::GameEnding => {}
        }
    }
    let input = &input;

    if state.session.screen == Screen::MainMenu && input.confirm {
        state.session.screen = state.session.screen.on(ScreenEvent::Confirm);
        state.events.push(GameEvent::Started);
        log::debug!("Main menu -> gameplay");
    }

    if state.session.screen == Screen::GamePlay {
        play_step(state, input);
    }

    // Counts the collision tick itself, so the tick that finishes the
    // animation is the (ending_ticks + 1)-th one spent here.
    if state.session.screen == Screen::GameEnding {
        state.session.ending_ticks += 1;
        if state.session.ending_ticks > state.rules.ending_ticks {
            state.session.screen = state.session.screen.on(ScreenEvent::EndingElapsed);
            enter_game_over(state);
        }
    }

    if state.session.screen == Screen::GameOver && input.confirm {
        log::debug!("Restarting after game over");
        state.restart();
    }
}

/// Score, player motion, spawning, obstacle motion and collision for one tick
fn play_step(state: &mut GameState, input: &TickInput) {
    let GameState {
        rules,
        session,
        events,
        rng,
        ..
    } = state;

    session.score += rules.score_per_tick;

    let player = &mut session.player;
    let (dy, sprite) = if input.ascend {
        (-rules.gravity, Sprite::PlayerUp)
    } else {
        (rules.gravity, Sprite::PlayerDown)
    };
    let y = wrap_vertical(player.pos.y + dy, player.height(), rules.screen.y);
    player.update(IVec2::new(player.pos.x, y), sprite);

    if spawn::should_spawn(session.score, session.obstacles.len(), rules) {
        session.obstacles.push(spawn::new_obstacle(rules, rng));
        let count = session.obstacles.len();
        events.push(GameEvent::ObstacleSpawned { count });
        log::debug!("Spawned obstacle #{} at score {}", count, session.score);
    }

    let player_rect = session.player.rect();
    let mut hit = None;
    for (index, obstacle) in session.obstacles.iter_mut().enumerate() {
        spawn::advance_obstacle(obstacle, rules, rng);
        if player_rect.overlaps(&obstacle.rect()) {
            hit = Some(index);
            break;
        }
    }

    if let Some(index) = hit {
        session.screen = session.screen.on(ScreenEvent::Collision);
        let pos = session.player.pos;
        session.player.update(pos, Sprite::Explosion);
        events.push(GameEvent::Collision { index });
        log::info!("Collision with obstacle {} at score {}", index, session.display_score());
    }

    log::trace!("tick score={} player_y={}", session.score, session.player.pos.y);
}

/// Freeze the score, settle the high score and clear the field
fn enter_game_over(state: &mut GameState) {
    let score = state.session.display_score();
    let new_high_score = state.high_score.record(score);
    state.session.obstacles.clear();
    state.events.push(GameEvent::GameOver {
        score,
        new_high_score,
    });
    log::info!(
        "Game over: score {} (best {}{})",
        score,
        state.high_score.best(),
        if new_high_score { ", new record" } else { "" }
    );
}

/// Toroidal vertical wrap: leaving by more than one height re-enters from the other side
pub fn wrap_vertical(y: i32, height: i32, screen_height: i32) -> i32 {
    if y < -height {
        screen_height + height
    } else if y > screen_height + height {
        -height
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::state::{Entity, Rules};
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        let rules = Rules::new(&Settings::default(), IVec2::new(40, 30), IVec2::new(32, 32));
        GameState::new(rules, seed)
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn hold() -> TickInput {
        TickInput {
            ascend: true,
            ..Default::default()
        }
    }

    /// Park every obstacle far away so nothing collides
    fn clear_field(state: &mut GameState) {
        for obstacle in &mut state.session.obstacles {
            obstacle.pos = IVec2::new(100_000, 60);
        }
    }

    /// Put an obstacle right on top of the player
    fn force_collision(state: &mut GameState) {
        let player = &state.session.player;
        let next_y = wrap_vertical(player.pos.y + GRAVITY, player.height(), SCREEN_HEIGHT);
        let pos = IVec2::new(player.pos.x + GRAVITY, next_y);
        state.session.obstacles[0].pos = pos;
        tick(state, &TickInput::default());
        assert_eq!(state.session.screen, Screen::GameEnding);
    }

    fn play_until_game_over(state: &mut GameState, score_ticks: u32) {
        for _ in 0..score_ticks {
            clear_field(state);
            tick(state, &TickInput::default());
        }
        force_collision(state);
        while state.session.screen == Screen::GameEnding {
            tick(state, &TickInput::default());
        }
        assert_eq!(state.session.screen, Screen::GameOver);
    }

    #[test]
    fn test_menu_waits_for_confirm() {
        let mut state = new_state(1);
        for _ in 0..10 {
            tick(&mut state, &hold());
        }
        assert_eq!(state.session.screen, Screen::MainMenu);
        assert_eq!(state.session.score, 0.0);

        tick(&mut state, &confirm());
        assert_eq!(state.session.screen, Screen::GamePlay);
        assert_eq!(state.events[0], GameEvent::Started);
        // Gameplay runs on the same tick the menu is left
        assert_eq!(state.session.score, SCORE_PER_TICK);
    }

    #[test]
    fn test_score_per_tick() {
        let mut state = new_state(2);
        tick(&mut state, &confirm());
        clear_field(&mut state);
        let before = state.session.score;
        for i in 1..=40 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.session.score, before + 0.25 * i as f64);
        }
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut state = new_state(3);
        tick(&mut state, &confirm());
        clear_field(&mut state);
        let y = state.session.player.pos.y;

        tick(&mut state, &hold());
        assert_eq!(state.session.player.pos.y, y - GRAVITY);
        assert_eq!(state.session.player.sprite, Sprite::PlayerUp);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.player.pos.y, y);
        assert_eq!(state.session.player.sprite, Sprite::PlayerDown);
    }

    #[test]
    fn test_wrap_vertical() {
        assert_eq!(wrap_vertical(-31, 30, 450), 480);
        assert_eq!(wrap_vertical(-30, 30, 450), -30);
        assert_eq!(wrap_vertical(481, 30, 450), -30);
        assert_eq!(wrap_vertical(480, 30, 450), 480);
        assert_eq!(wrap_vertical(200, 30, 450), 200);
    }

    #[test]
    fn test_player_wraps_off_top() {
        let mut state = new_state(4);
        tick(&mut state, &confirm());
        clear_field(&mut state);
        state.session.player.pos.y = -29;

        tick(&mut state, &hold());
        assert_eq!(state.session.player.pos.y, SCREEN_HEIGHT + 30);
    }

    #[test]
    fn test_spawn_at_score_hundred() {
        let mut state = new_state(5);
        tick(&mut state, &confirm());
        // 400 ticks at 0.25 reach 100.0; the menu tick was the first
        for _ in 1..399 {
            clear_field(&mut state);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.session.obstacles.len(), 1);

        clear_field(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.score, 100.0);
        assert_eq!(state.session.obstacles.len(), 2);
        assert!(state.events.contains(&GameEvent::ObstacleSpawned { count: 2 }));
        // Fresh obstacle spawns at the right edge and moves on its first tick
        assert_eq!(state.session.obstacles[1].pos.x, SCREEN_WIDTH - GRAVITY);
    }

    #[test]
    fn test_obstacle_cap() {
        let mut state = new_state(6);
        tick(&mut state, &confirm());
        for _ in 0..(400 * 20) {
            clear_field(&mut state);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.session.screen, Screen::GamePlay);
        assert_eq!(state.session.obstacles.len(), 16);
    }

    #[test]
    fn test_collision_starts_ending() {
        let mut state = new_state(7);
        tick(&mut state, &confirm());
        force_collision(&mut state);

        assert_eq!(state.session.player.sprite, Sprite::Explosion);
        assert_eq!(state.session.ending_ticks, 1);
        assert!(state.events.contains(&GameEvent::Collision { index: 0 }));
    }

    #[test]
    fn test_first_collision_wins_and_stops_scan() {
        let mut state = new_state(8);
        tick(&mut state, &confirm());
        let player = state.session.player.pos;
        let far = Entity::new(IVec2::new(700, 60), IVec2::new(32, 32), Sprite::Asteroid);
        state.session.obstacles = vec![
            far.clone(),
            Entity::new(player + IVec2::new(GRAVITY, 0), IVec2::new(32, 32), Sprite::Asteroid),
            far.clone(),
        ];

        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::Collision { index: 1 }));
        // Scanned obstacles moved, the one after the hit did not
        assert_eq!(state.session.obstacles[0].pos.x, 700 - GRAVITY);
        assert_eq!(state.session.obstacles[2].pos.x, 700);
    }

    #[test]
    fn test_ending_lasts_two_seconds() {
        let mut state = new_state(9);
        tick(&mut state, &confirm());
        force_collision(&mut state);

        let ending = 2 * TARGET_TICKS_PER_SECOND;
        for _ in 1..ending {
            tick(&mut state, &confirm());
            assert_eq!(state.session.screen, Screen::GameEnding);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.screen, Screen::GameOver);
        assert!(state.session.obstacles.is_empty());
    }

    #[test]
    fn test_ending_freezes_score_and_entities() {
        let mut state = new_state(10);
        tick(&mut state, &confirm());
        force_collision(&mut state);
        let score = state.session.score;
        let player = state.session.player.clone();
        let obstacles = state.session.obstacles.clone();

        for _ in 0..30 {
            tick(&mut state, &hold());
        }
        assert_eq!(state.session.score, score);
        assert_eq!(state.session.player, player);
        assert_eq!(state.session.obstacles, obstacles);
    }

    #[test]
    fn test_high_score_across_sessions() {
        let mut state = new_state(11);
        tick(&mut state, &confirm());

        // 40 points = 160 ticks (the menu tick already scored once)
        play_until_game_over(&mut state, 159);
        assert_eq!(state.session.display_score(), 40);
        assert_eq!(state.high_score.best(), 40);

        tick(&mut state, &confirm());
        play_until_game_over(&mut state, 39);
        assert_eq!(state.session.display_score(), 10);
        assert_eq!(state.high_score.best(), 40);

        tick(&mut state, &confirm());
        play_until_game_over(&mut state, 219);
        assert_eq!(state.session.display_score(), 55);
        assert_eq!(state.high_score.best(), 55);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = new_state(12);
        tick(&mut state, &confirm());
        play_until_game_over(&mut state, 79);
        assert_eq!(state.high_score.best(), 20);

        // Game over waits for confirm
        tick(&mut state, &hold());
        assert_eq!(state.session.screen, Screen::GameOver);

        tick(&mut state, &confirm());
        assert_eq!(state.session.screen, Screen::GamePlay);
        assert_eq!(state.session.score, 0.0);
        assert_eq!(state.session.obstacles.len(), 1);
        assert_eq!(state.session.ending_ticks, 0);
        assert_eq!(state.session.player.sprite, Sprite::PlayerDown);
        assert_eq!(state.high_score.best(), 20);
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_idle_mode_plays_itself() {
        let mut state = new_state(13);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle);
        assert_eq!(state.session.screen, Screen::GamePlay);
        for _ in 0..2000 {
            tick(&mut state, &idle);
        }
        assert_ne!(state.session.screen, Screen::MainMenu);
        assert_eq!(state.time_ticks, 2001);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [confirm(), hold(), hold(), TickInput::default(), hold()];
        for _ in 0..500 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.session.score, state2.session.score);
        assert_eq!(state1.session.player, state2.session.player);
        assert_eq!(state1.session.obstacles, state2.session.obstacles);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(seed in any::<u64>(), inputs in prop::collection::vec(any::<(bool, bool)>(), 1..3000)) {
            let mut state = new_state(seed);
            let h = state.session.player.height();
            let mut last_best = 0;

            for (ascend, confirm) in inputs {
                let screen_before = state.session.screen;
                let score_before = state.session.score;
                tick(&mut state, &TickInput { ascend, confirm, idle_mode: false });

                prop_assert!(state.session.score >= 0.0);
                prop_assert!(state.session.obstacles.len() <= 16);
                prop_assert!(state.high_score.best() >= last_best);
                if state.high_score.best() != last_best {
                    let ended = state.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. }));
                    prop_assert!(ended);
                }
                last_best = state.high_score.best();

                let y = state.session.player.pos.y;
                prop_assert!(y >= -h && y <= SCREEN_HEIGHT + h);

                if screen_before == Screen::GamePlay && state.session.screen != Screen::GameOver {
                    prop_assert_eq!(state.session.score, score_before + SCORE_PER_TICK);
                }
                for obstacle in &state.session.obstacles {
                    prop_assert!(obstacle.pos.y >= SPAWN_MARGIN && obstacle.pos.y < SCREEN_HEIGHT - SPAWN_MARGIN);
                }
            }
        }
    }
}
