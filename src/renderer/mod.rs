//! Render boundary
//!
//! Turns a `GameState` into a flat, ordered draw list. The backend that
//! rasterizes it (window, terminal, test harness) lives outside the crate.

use glam::Vec2;

use crate::Rect;
use crate::sim::{GamePhase, GameState, SpriteId};

pub const START_TEXT: &str = "PRESS ANY KEY TO START";
pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// HUD margin from the screen edges
const HUD_MARGIN: f32 = 10.0;
/// Reload bar length when full
const RELOAD_BAR_WIDTH: f32 = 100.0;
const RELOAD_BAR_HEIGHT: f32 = 4.0;

/// Which point of the text `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear([f32; 4]),
    /// Sprite with its top-left corner at `pos`
    Sprite { sprite: SpriteId, pos: Vec2 },
    /// Solid rectangle
    Fill { rect: Rect, color: [f32; 4] },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: [f32; 4],
        anchor: Anchor,
    },
}

/// Everything to draw for one tick, back to front
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Text commands only, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Sprite commands only, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, pos } => Some((*sprite, *pos)),
            _ => None,
        })
    }
}

/// 8-bit RGB to normalized RGBA
#[inline]
pub fn rgba(color: [u8; 3]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let settings = &state.settings;
    let items = rgba(settings.items_color);
    let (w, h) = (settings.screen_width, settings.screen_height);
    let text_size = settings.text_size as f32;
    let mut commands = vec![DrawCommand::Clear(rgba(settings.background_color))];

    // Scenery and hazards, back to front
    for group in [
        &state.ground,
        &state.moons,
        &state.stars,
        &state.clouds,
        &state.cacti,
        &state.birds,
    ] {
        commands.extend(group.iter().map(|o| DrawCommand::Sprite {
            sprite: o.sprite(),
            pos: o.pos,
        }));
    }
    commands.extend(state.bullets.iter().map(|b| DrawCommand::Sprite {
        sprite: SpriteId::Bullet,
        pos: b.pos,
    }));
    commands.push(DrawCommand::Sprite {
        sprite: state.runner.sprite(),
        pos: state.runner.position(),
    });

    // HUD
    let text = |text: String, pos: Vec2, color: [f32; 4], anchor: Anchor| DrawCommand::Text {
        text,
        pos,
        size: text_size,
        color,
        anchor,
    };

    let score_color = if state.score.highlighted() {
        rgba(settings.highlight_color)
    } else {
        items
    };
    commands.push(text(
        state.score.text(),
        Vec2::new(w - HUD_MARGIN, HUD_MARGIN),
        score_color,
        Anchor::TopRight,
    ));
    commands.push(text(
        format!("BULLETS {}", state.bullets_available()),
        Vec2::splat(HUD_MARGIN),
        items,
        Anchor::TopLeft,
    ));
    if let Some(progress) = state.reload_progress() {
        commands.push(DrawCommand::Fill {
            rect: Rect::new(
                Vec2::new(HUD_MARGIN, HUD_MARGIN * 1.5 + text_size),
                Vec2::new(RELOAD_BAR_WIDTH * progress, RELOAD_BAR_HEIGHT),
            ),
            color: items,
        });
    }

    match state.phase {
        GamePhase::Attract => commands.push(text(
            START_TEXT.to_string(),
            Vec2::new(w / 2.0, h / 3.0),
            items,
            Anchor::Center,
        )),
        GamePhase::GameOver => {
            commands.push(text(
                GAME_OVER_TEXT.to_string(),
                Vec2::new(w / 2.0, h / 3.0),
                items,
                Anchor::Center,
            ));
            commands.push(DrawCommand::Sprite {
                sprite: SpriteId::RetryButton,
                pos: state.retry_button().pos,
            });
        }
        GamePhase::Playing => {}
    }

    Frame { commands }
}
