//! OLED screens

use core::fmt::Write as _;

use heapless::String;
use platform::RenderSurface;

use crate::state::{GameState, Outcome, Position};

/// Label drawn before the score on the live frame.
pub const SCORE_LABEL: &str = "Score:";

const SCORE_ORIGIN: (i32, i32) = (0, 0);
const SCORE_VALUE_X: i32 = 48;
const CLICKS_ORIGIN: (i32, i32) = (0, 12);

/// Live gameplay frame: score, click count, cursor and target markers.
pub fn draw_live_frame<S: RenderSurface + ?Sized>(
    surface: &mut S,
    state: &GameState,
    width: u8,
    height: u8,
) {
    surface.clear();
    surface.draw_text(SCORE_LABEL, SCORE_ORIGIN.0, SCORE_ORIGIN.1);
    surface.draw_text(&number(state.score), SCORE_VALUE_X, SCORE_ORIGIN.1);
    surface.draw_text(&number(state.clicks), CLICKS_ORIGIN.0, CLICKS_ORIGIN.1);
    draw_marker(surface, state.cursor, width, height);
    draw_marker(surface, state.target, width, height);
    surface.present();
}

/// Terminal screen for `outcome`.
pub fn draw_outcome<S: RenderSurface + ?Sized>(surface: &mut S, outcome: Outcome, win_score: u8) {
    surface.clear();
    match outcome {
        Outcome::Victory => {
            let mut score: String<16> = String::new();
            // "Score: 255" is 10 bytes; capacity cannot be exceeded.
            let _ = write!(score, "{SCORE_LABEL} {win_score}");
            surface.draw_text("YOU WIN!", 20, 20);
            surface.draw_text(&score, 30, 35);
            surface.draw_text("COMPLETE!", 5, 50);
        }
        Outcome::Defeat => {
            surface.draw_text("GAME OVER!", 20, 20);
            surface.draw_text("You lost!", 20, 35);
        }
    }
    surface.present();
}

/// Blank the panel.
pub fn draw_blank<S: RenderSurface + ?Sized>(surface: &mut S) {
    surface.clear();
    surface.present();
}

/// 3×3 marker centred on `at`, skipping the outermost border pixels.
fn draw_marker<S: RenderSurface + ?Sized>(surface: &mut S, at: Position, width: u8, height: u8) {
    let (cx, cy) = (i32::from(at.x), i32::from(at.y));
    let (w, h) = (i32::from(width), i32::from(height));
    for dx in -1..=1 {
        for dy in -1..=1 {
            let (x, y) = (cx.saturating_add(dx), cy.saturating_add(dy));
            if (1..w.saturating_sub(1)).contains(&x) && (1..h.saturating_sub(1)).contains(&y) {
                surface.draw_pixel(x, y, true);
            }
        }
    }
}

fn number(value: u8) -> String<4> {
    let mut s = String::new();
    let _ = write!(s, "{value}");
    s
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{config::GameConfig, state::Phase};
    use platform::mocks::MockBoard;

    fn state(cursor: Position, target: Position, score: u8, clicks: u8) -> GameState {
        GameState {
            cursor,
            target,
            score,
            clicks,
            phase: Phase::Playing,
        }
    }

    #[test]
    fn live_frame_layout() {
        let mut board = MockBoard::new();
        let s = state(Position::new(64, 32), Position::new(10, 20), 7, 3);
        draw_live_frame(&mut board, &s, 128, 64);
        let frame = board.last_frame().unwrap();
        assert_eq!(frame.text_at("Score:"), Some((0, 0)));
        assert_eq!(frame.text_at("7"), Some((48, 0)));
        assert_eq!(frame.text_at("3"), Some((0, 12)));
        assert_eq!(frame.pixels.len(), 18);
        assert!(frame.is_lit(63, 31) && frame.is_lit(65, 33));
        assert!(frame.is_lit(9, 19) && frame.is_lit(11, 21));
    }

    #[test]
    fn markers_clip_at_border() {
        let mut board = MockBoard::new();
        let s = state(Position::new(0, 0), Position::new(127, 63), 0, 0);
        draw_live_frame(&mut board, &s, 128, 64);
        let frame = board.last_frame().unwrap();
        // Only (1,1) survives for the corner cursor; (126,62) for the target.
        assert_eq!(frame.pixels, vec![(1, 1), (126, 62)]);
    }

    #[test]
    fn victory_screen_lines() {
        let mut board = MockBoard::new();
        draw_outcome(&mut board, Outcome::Victory, GameConfig::DEFAULT.win_score);
        let frame = board.last_frame().unwrap();
        assert_eq!(frame.text_at("YOU WIN!"), Some((20, 20)));
        assert_eq!(frame.text_at("Score: 25"), Some((30, 35)));
        assert_eq!(frame.text_at("COMPLETE!"), Some((5, 50)));
    }

    #[test]
    fn defeat_screen_lines() {
        let mut board = MockBoard::new();
        draw_outcome(&mut board, Outcome::Defeat, 25);
        let frame = board.last_frame().unwrap();
        assert_eq!(frame.texts.len(), 2);
        assert_eq!(frame.text_at("GAME OVER!"), Some((20, 20)));
        assert_eq!(frame.text_at("You lost!"), Some((20, 35)));
    }
}
