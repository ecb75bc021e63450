//! Character sheet pages. These do not use the talent grid.

use super::Context;
use crate::canvas::{Align, Canvas, Paint, trace, with_saved_state, with_text};
use crate::config::{BLACK, GRAY, Rgb, WHITE};
use crate::error::Error;
use crate::fonts::Typeface;
use crate::layout::geometry::gauge_band;
use crate::model::{CharacterSide, SheetRecord};

const CHARACTERISTICS: [&str; 6] = ["Brawn", "Agility", "Intellect", "Cunning", "Willpower", "Presence"];

const GAUGE_WIDTH: f32 = 65.0;

pub(super) fn generate(record: &SheetRecord, ctx: Context<'_>, canvas: &mut dyn Canvas) -> Result<(), Error> {
    match record.character_side() {
        CharacterSide::Front => front(ctx, canvas),
        CharacterSide::Back => {
            log::warn!("{}: character sheet back side has no layout yet, leaving the page empty", record.id);
            Ok(())
        }
    }
}

/// One gauge per characteristic, spread over the usable width.
fn front(ctx: Context<'_>, canvas: &mut dyn Canvas) -> Result<(), Error> {
    let config = ctx.config;
    let count = CHARACTERISTICS.len() as f32;
    let space = (config.usable_width() - GAUGE_WIDTH * count) / (count - 1.0);
    let y = config.top_y();
    for (i, name) in CHARACTERISTICS.iter().enumerate() {
        let label = ctx.strings.resolve(name)?.to_uppercase();
        let x = config.left_x() + i as f32 * (GAUGE_WIDTH + space);
        draw_characteristic(canvas, &label, x, y, config.passive_color, config.talent_box_stroke);
    }
    Ok(())
}

fn draw_characteristic(canvas: &mut dyn Canvas, label: &str, x: f32, y: f32, outline: Rgb, stroke: f32) {
    let center = x + GAUGE_WIDTH / 2.0;
    with_saved_state(canvas, |canvas| {
        canvas.set_fill_color(GRAY);
        for offset in [0.0, 13.0, 26.0] {
            trace(canvas, &gauge_band(x, y - offset, GAUGE_WIDTH, 12.0));
        }
        canvas.paint(Paint::Fill);

        canvas.set_stroke_color(outline);
        canvas.set_fill_color(WHITE);
        canvas.set_line_width(0.2);
        trace(canvas, &gauge_band(x, y - 39.0, GAUGE_WIDTH, 15.0));
        canvas.close_path(Paint::FillStroke);

        canvas.set_line_width(stroke);
        canvas.circle(center, y - 22.0, 20.0);
        canvas.paint(Paint::FillStroke);
        canvas.set_line_width(0.5);
        canvas.circle(center, y - 22.0, 18.0);
        canvas.paint(Paint::Stroke);
        canvas.set_line_width(0.2);
        canvas.circle(center, y - 22.0, 16.5);
        canvas.paint(Paint::Stroke);
    });
    with_text(canvas, |canvas| {
        canvas.set_font(Typeface::Regular, 8.0);
        canvas.set_fill_color(BLACK);
        canvas.show_text_aligned(Align::Center, label, center, y - 50.5);
    });
}
