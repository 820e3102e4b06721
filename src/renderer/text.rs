//! Menu and HUD strings

pub const MAIN_MENU: &str = "Welcome to Flappy Gopher
Avoid the asteroids as long as possible
Hold the Spacebar to go up
Press Esc to quit at any time
Press Enter to start";

pub fn score(score: u64) -> String {
    format!("Score: {score}")
}

pub fn high_score(best: u64) -> String {
    format!("Highest Score: {best}")
}

pub fn game_over(score: u64) -> String {
    format!(
        "Game Over
Final Score: {score}
Press Enter to play again
Press Esc to quit"
    )
}
