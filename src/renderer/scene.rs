//! Builds the draw list for the current screen

use glam::IVec2;

use super::{DrawCommand, Image, colors, text};
use crate::consts::TEXT_SIZE;
use crate::sim::{GameState, Screen};

/// Compose one frame. `measure` returns the pixel width of text at a font size.
pub fn compose(state: &GameState, measure: impl Fn(&str, i32) -> i32) -> Vec<DrawCommand> {
    let session = &state.session;
    let screen = state.rules.screen;
    let mut cmds = Vec::with_capacity(session.obstacles.len() + 8);

    cmds.push(DrawCommand::Clear(colors::BACKGROUND));
    cmds.push(DrawCommand::Image {
        image: Image::Background,
        x: 0,
        y: 0,
    });

    if session.screen == Screen::MainMenu {
        cmds.push(centered(text::MAIN_MENU.to_string(), screen, colors::TEXT, &measure));
    } else if state.high_score.visible_on(session.screen) {
        let label = text::high_score(state.high_score.best());
        let width = measure(&label, TEXT_SIZE);
        cmds.push(DrawCommand::Text {
            text: label,
            x: screen.x - width - 10,
            y: 10,
            size: TEXT_SIZE,
            color: colors::HIGH_SCORE,
        });
    }

    if session.screen.shows_entities() {
        cmds.push(DrawCommand::Text {
            text: text::score(session.display_score()),
            x: 10,
            y: 10,
            size: TEXT_SIZE,
            color: colors::TEXT,
        });

        let entities = std::iter::once(&session.player).chain(session.obstacles.iter());
        for entity in entities {
            cmds.push(DrawCommand::Image {
                image: Image::Sprite(entity.sprite),
                x: entity.pos.x,
                y: entity.pos.y,
            });
        }
    }

    if session.screen == Screen::GameOver {
        let label = text::game_over(session.display_score());
        cmds.push(centered(label, screen, colors::GAME_OVER, &measure));
    }

    cmds
}

/// Multi-line text block centred on screen; vertical offset uses a quarter of
/// the measured width as an approximation of the block height
fn centered(
    label: String,
    screen: IVec2,
    color: colors::Color,
    measure: &impl Fn(&str, i32) -> i32,
) -> DrawCommand {
    let width = measure(&label, TEXT_SIZE);
    DrawCommand::Text {
        text: label,
        x: screen.x / 2 - width / 2,
        y: screen.y / 2 - width / 4,
        size: TEXT_SIZE,
        color,
    }
}
