//! Demo-mode steering
//!
//! Picks the ascend control for the player so the game can play itself on
//! the headless platform.

use super::state::{GameSession, Rules};

/// How far ahead (pixels) an obstacle counts as a threat
const LOOKAHEAD: i32 = 160;
/// Extra vertical clearance kept around threats
const CLEARANCE: i32 = 12;

/// Whether the player should hold ascend this tick
pub fn steer(session: &GameSession, rules: &Rules) -> bool {
    let player = session.player.rect();
    let player_mid = player.top() + player.size.y / 2;

    // Closest obstacle ahead that shares the player's vertical lane
    let threat = session
        .obstacles
        .iter()
        .map(|o| o.rect())
        .filter(|r| r.right() > player.left() && r.left() - player.right() < LOOKAHEAD)
        .filter(|r| r.top() - CLEARANCE < player.bottom() && r.bottom() + CLEARANCE > player.top())
        .min_by_key(|r| r.left());

    let target = match threat {
        Some(r) => {
            let above = r.top() - CLEARANCE - player.size.y / 2;
            let below = r.bottom() + CLEARANCE + player.size.y / 2;
            // Dodge toward whichever side is closer, unless it runs off screen
            if (player_mid - above).abs() <= (below - player_mid).abs() && above > 0 {
                above
            } else if below < rules.screen.y {
                below
            } else {
                above
            }
        }
        None => rules.screen.y / 2,
    };

    player_mid > target
}
