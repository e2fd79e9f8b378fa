//! Canvas 2D renderer
//!
//! Draws the tile grid with player and mine markers, and writes the debug
//! counters into the page.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::{HudCounters, TileView, colors, player_color, tile_views};
use crate::sim::GameState;

/// Gap between tiles (px)
const TILE_SPACING: f64 = 10.0;
/// Share of the canvas width the grid spans
const GRID_WIDTH_FRACTION: f64 = 0.6;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the canvas backing store to the window size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn tile_size(&self, beats: usize) -> f64 {
        self.canvas.width() as f64 * GRID_WIDTH_FRACTION / beats.max(1) as f64
    }

    pub fn render(&self, state: &GameState) {
        let ctx = &self.ctx;
        let tile = self.tile_size(state.grid.beats());
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        for view in tile_views(state) {
            let x = view.pos.beat as f64 * (tile + TILE_SPACING);
            let y = view.pos.pitch as f64 * (tile + TILE_SPACING);
            ctx.save();
            let _ = ctx.translate(x, y);
            self.draw_tile(&view, tile);
            ctx.restore();
        }
    }

    fn draw_tile(&self, view: &TileView, tile: f64) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(if view.active {
            colors::TILE_ACTIVE
        } else {
            colors::TILE
        });
        ctx.fill_rect(0.0, 0.0, tile, tile);

        for &id in &view.players {
            ctx.set_fill_style_str(player_color(id));
            ctx.fill_rect(20.0, 20.0, 20.0, 20.0);
        }

        if view.mine_visible {
            ctx.set_fill_style_str(colors::MINE);
            ctx.fill_rect(10.0, 10.0, 10.0, 10.0);
        }
    }
}

/// Write the debug counters into their page elements
pub fn update_hud(document: &Document, counters: HudCounters) {
    for (id, text) in counters.entries() {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&text));
        }
    }
}
