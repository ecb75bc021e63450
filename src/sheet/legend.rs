use super::Page;
use crate::canvas::{Align, Canvas, Paint, trace, with_saved_state, with_text};
use crate::config::{BLACK, Rgb};
use crate::error::Error;
use crate::fonts::Typeface;
use crate::layout::geometry::{legend_arrow, normal_glyph, ranked_wedge};

const LABEL_SIZE: f32 = 10.0;
/// Gap between the glyph column and the right edge of the labels.
const LABEL_GAP: f32 = 20.0;

#[derive(Clone, Copy)]
enum Mark {
    Arrow(Rgb),
    Ranked(Rgb),
}

/// One legend line: glyph offset below the legend top, label key, label offset.
type Entry = (Mark, f32, &'static str, f32);

pub(super) fn standard(page: &mut Page<'_>) -> Result<(), Error> {
    let (active, passive) = (page.config.active_color, page.config.passive_color);
    draw_entries(
        page,
        &[
            (Mark::Arrow(active), 0.0, "Active", 7.0),
            (Mark::Arrow(passive), 15.0, "Passive", 22.0),
            (Mark::Ranked(passive), 30.0, "Ranked", 37.0),
        ],
    )
}

pub(super) fn signature(page: &mut Page<'_>) -> Result<(), Error> {
    let (active, passive) = (page.config.active_color, page.config.passive_color);
    draw_entries(
        page,
        &[
            (Mark::Arrow(active), 0.0, "BaseAbility", 7.0),
            (Mark::Arrow(passive), 15.0, "Upgrade", 22.0),
            (Mark::Ranked(passive), 30.0, "Ranked", 37.0),
        ],
    )
}

pub(super) fn force(page: &mut Page<'_>) -> Result<(), Error> {
    let passive = page.config.passive_color;
    draw_entries(
        page,
        &[
            (Mark::Arrow(passive), 0.0, "ForcePowerWedge", 7.0),
            (Mark::Ranked(passive), 15.0, "Ranked", 24.0),
        ],
    )
}

fn draw_entries(page: &mut Page<'_>, entries: &[Entry]) -> Result<(), Error> {
    let x = page.config.right_x();
    let y = page.config.top_y() - 20.0;
    let labels = entries
        .iter()
        .map(|&(_, _, key, _)| page.localized(key))
        .collect::<Result<Vec<_>, _>>()?;

    let canvas = &mut *page.canvas;
    for &(mark, offset, _, _) in entries {
        match mark {
            Mark::Arrow(color) => with_saved_state(canvas, |canvas| {
                canvas.set_fill_color(color);
                trace(canvas, &legend_arrow(x, y - offset));
                canvas.close_path(Paint::Fill);
            }),
            Mark::Ranked(color) => draw_ranked(canvas, x, y - offset, color),
        }
    }
    with_text(canvas, |canvas| {
        canvas.set_font(Typeface::Regular, LABEL_SIZE);
        canvas.set_fill_color(BLACK);
        for (&(_, _, _, label_offset), label) in entries.iter().zip(&labels) {
            canvas.show_text_aligned(Align::Right, label, x - LABEL_GAP, y - label_offset);
        }
    });
    Ok(())
}

/// Filled diamond; its right edge at `x`.
pub(super) fn draw_normal(canvas: &mut dyn Canvas, x: f32, y: f32, color: Rgb) {
    with_saved_state(canvas, |canvas| {
        canvas.set_fill_color(color);
        trace(canvas, &normal_glyph(x, y));
        canvas.close_path(Paint::Fill);
    });
}

/// Chevron plus diamond.
pub(super) fn draw_ranked(canvas: &mut dyn Canvas, x: f32, y: f32, color: Rgb) {
    with_saved_state(canvas, |canvas| {
        canvas.set_fill_color(color);
        trace(canvas, &ranked_wedge(x, y));
        canvas.close_path(Paint::Fill);
        trace(canvas, &normal_glyph(x, y));
        canvas.close_path(Paint::Fill);
    });
}
