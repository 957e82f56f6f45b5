//! Per-mode frame drawing
//!
//! Walks the game state once per frame and issues draw calls through the
//! platform layer. Purely observational - nothing here mutates the
//! simulation.

use glam::Vec2;

use crate::assets::Assets;
use crate::consts::{FRAME_CENTER, FRAME_HEIGHT, FRAME_WIDTH, PLAYER_RADIUS};
use crate::platform::{Color, Gfx, BLACK, RED, WHITE};
use crate::sim::{Feedback, GameState, Mode};
use crate::Rect;

const TEXT_HEIGHT: u32 = 24;
const LINE_SPACING: f32 = 32.0;
/// Countdown bar geometry on the petting screen
const BAR_WIDTH: f32 = 600.0;
const BAR_HEIGHT: f32 = 16.0;

fn frame_rect() -> Rect {
    Rect::from_pos_size(Vec2::ZERO, Vec2::new(FRAME_WIDTH, FRAME_HEIGHT))
}

/// Draw one frame of the current mode
pub fn draw(state: &GameState, assets: &Assets, gfx: &mut impl Gfx) {
    gfx.fill_rect(BLACK, frame_rect());

    match state.mode {
        Mode::Walking => draw_walking(state, assets, gfx),
        Mode::Petting => draw_petting(state, assets, gfx),
        Mode::Message | Mode::Help | Mode::GameOver => draw_screen(state, gfx),
    }
}

fn draw_walking(state: &GameState, assets: &Assets, gfx: &mut impl Gfx) {
    for (coord, tile) in state.matrix.iter() {
        let rect = state.matrix.tile_rect(coord);
        gfx.blit(assets.tile(tile.visual.image, tile.visual.rotation), rect.min);
    }
    for (_, tiger) in state.tigers.tigers_to_pet() {
        gfx.blit(assets.tiger_sprite(tiger.sprite_rotation), tiger.pos);
    }
    gfx.draw_circle(RED, FRAME_CENTER, PLAYER_RADIUS);
}

fn draw_petting(state: &GameState, assets: &Assets, gfx: &mut impl Gfx) {
    let (Some(session), Some(tiger_id)) = (&state.session, state.active_tiger) else {
        return;
    };
    let tiger = state.tigers.tiger(tiger_id);

    gfx.blit_centered(assets.portrait(tiger.portrait), FRAME_CENTER);

    // Reaction readout above the portrait
    let (label, color) = match session.feedback {
        Feedback::Purr => ("purrrrr...", Color(0, 255, 0)),
        Feedback::Yawn => ("*yawn*", Color(0, 0, 255)),
        Feedback::Grrr => ("GRRR!", RED),
    };
    let text = gfx.render_text(label, TEXT_HEIGHT, color);
    gfx.blit_centered(text, Vec2::new(FRAME_CENTER.x, 60.0));

    // Countdown bar along the bottom, shrinking as time runs out
    let fraction = session.remaining_ticks as f32 / state.config.petting_time_ticks as f32;
    let bar = Rect::from_pos_size(
        Vec2::new((FRAME_WIDTH - BAR_WIDTH) / 2.0, FRAME_HEIGHT - 40.0),
        Vec2::new(BAR_WIDTH * fraction, BAR_HEIGHT),
    );
    gfx.fill_rect(WHITE, bar);
}

fn draw_screen(state: &GameState, gfx: &mut impl Gfx) {
    let text = match state.mode {
        Mode::Help => crate::sim::state::help_text(),
        _ => match &state.message {
            Some(message) => message.text.clone(),
            None => return,
        },
    };

    let lines: Vec<&str> = text.lines().collect();
    let top = FRAME_CENTER.y - LINE_SPACING * (lines.len() as f32 - 1.0) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let image = gfx.render_text(line.trim(), TEXT_HEIGHT, WHITE);
        gfx.blit_centered(image, Vec2::new(FRAME_CENTER.x, top + LINE_SPACING * i as f32));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::NullGfx;

    #[test]
    fn test_draw_every_mode_against_null_backend() {
        let mut gfx = NullGfx::new();
        let assets = Assets::load(&mut gfx).unwrap();
        let mut state = GameState::new(5, Config::default(), assets.catalog()).unwrap();

        // Message screen (initial), then force each remaining mode
        draw(&state, &assets, &mut gfx);
        state.mode = Mode::Walking;
        draw(&state, &assets, &mut gfx);
        state.mode = Mode::Help;
        draw(&state, &assets, &mut gfx);
        state.mode = Mode::GameOver;
        draw(&state, &assets, &mut gfx);

        state.active_tiger = Some(0);
        state.session = Some(crate::sim::PettingSession::new(&state.config));
        state.mode = Mode::Petting;
        draw(&state, &assets, &mut gfx);
    }
}
