//! Connector paths and talent boxes.

use serde_json::Value;

use super::Page;
use super::legend::{draw_normal, draw_ranked};
use crate::canvas::{Align, Paint, trace, with_saved_state, with_text};
use crate::config::{BLACK, WHITE};
use crate::error::Error;
use crate::fonts::Typeface;
use crate::layout::{Orientation, TextFitter};
use crate::layout::text::draw_cell;
use crate::model::{Cost, TalentCell};
use crate::talent::parse_entry;

const TITLE_SIZE: f32 = 13.0;
const TAB_TEXT_SIZE: f32 = 6.25;
const PAGE_TAB_WIDTH: f32 = 25.0;
const COST_TAB_WIDTH: f32 = 50.0;

fn flag(value: &Value) -> Option<bool> {
    match value.as_u64()? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Draw a connector for every set flag of `talent_paths`.
pub(super) fn talent_paths(page: &mut Page<'_>) -> Result<(), Error> {
    let rows = page
        .record
        .field("talent_paths")
        .ok_or_else(|| Error::missing_field(page.id(), "talent_paths"))?
        .as_array()
        .ok_or_else(|| Error::layout(page.id(), "talent_paths is not a list of rows"))?;
    let max_path_rows = page.config.max_rows * 2;
    let mut segments = Vec::new();
    for (path_row, row) in rows.iter().enumerate() {
        let flags = row
            .as_array()
            .ok_or_else(|| Error::layout(page.id(), format!("path row {path_row} is not a list")))?;
        for (col, value) in flags.iter().enumerate() {
            let set = flag(value).ok_or_else(|| {
                Error::layout(page.id(), format!("path flag at {path_row}/{col} is not 0 or 1"))
            })?;
            if !set {
                continue;
            }
            let inside = match Orientation::of_path_row(path_row) {
                Orientation::Horizontal => col + 1 < page.config.max_columns,
                Orientation::Vertical => col < page.config.max_columns && path_row / 2 + 1 < page.config.max_rows,
            };
            if path_row >= max_path_rows || !inside {
                return Err(Error::layout(
                    page.id(),
                    format!("path at {path_row}/{col} lies outside the grid"),
                ));
            }
            segments.push(page.grid.connector(path_row, col));
        }
    }

    let (color, width) = (page.config.line_color, page.config.talent_path_stroke);
    with_saved_state(&mut *page.canvas, |canvas| {
        canvas.set_stroke_color(color);
        canvas.set_line_width(width);
        for segment in &segments {
            canvas.move_to(segment.from.0, segment.from.1);
            canvas.line_to(segment.to.0, segment.to.1);
            canvas.paint(Paint::Stroke);
        }
    });
    Ok(())
}

/// Nodes above the first row joining the tree to its parent career.
pub(super) fn signature_nodes(page: &mut Page<'_>) -> Result<(), Error> {
    let flags = page
        .record
        .field("signature_nodes")
        .ok_or_else(|| Error::missing_field(page.id(), "signature_nodes"))?
        .as_array()
        .ok_or_else(|| Error::layout(page.id(), "signature_nodes is not a list"))?;
    let mut nodes = Vec::new();
    for (col, value) in flags.iter().enumerate() {
        let set = flag(value)
            .ok_or_else(|| Error::layout(page.id(), format!("signature node {col} is not 0 or 1")))?;
        if !set {
            continue;
        }
        if col >= page.config.max_columns {
            return Err(Error::layout(page.id(), format!("signature node {col} lies outside the grid")));
        }
        nodes.push(page.grid.signature_node(col));
    }

    let (color, width) = (page.config.line_color, page.config.talent_path_stroke);
    with_saved_state(&mut *page.canvas, |canvas| {
        canvas.set_stroke_color(color);
        canvas.set_fill_color(WHITE);
        canvas.set_line_width(width);
        for node in &nodes {
            canvas.move_to(node.stem.from.0, node.stem.from.1);
            canvas.line_to(node.stem.to.0, node.stem.to.1);
            canvas.paint(Paint::Stroke);
            trace(canvas, &node.bracket);
            canvas.paint(Paint::Stroke);
            trace(canvas, &node.diamond);
            canvas.close_path(Paint::FillStroke);
        }
    });
    Ok(())
}

/// Walk the talent rows; each entry advances the column by its span.
pub(super) fn talents(page: &mut Page<'_>, text_sizes: &[f32]) -> Result<(), Error> {
    let rows = page
        .record
        .field("talents")
        .ok_or_else(|| Error::missing_field(page.id(), "talents"))?
        .as_array()
        .ok_or_else(|| Error::layout(page.id(), "talents is not a list of rows"))?;
    if rows.len() > page.config.max_rows {
        return Err(Error::layout(
            page.id(),
            format!("{} talent rows, the grid holds {}", rows.len(), page.config.max_rows),
        ));
    }
    for (row, entries) in rows.iter().enumerate() {
        let entries = entries
            .as_array()
            .ok_or_else(|| Error::layout(page.id(), format!("talent row {row} is not a list")))?;
        let mut col = 0;
        for entry in entries {
            let entry = entry.as_str().ok_or_else(|| {
                Error::layout(page.id(), format!("talent at {row}/{col} is not a string key"))
            })?;
            let entry = parse_entry(entry);
            if col + entry.span > page.config.max_columns {
                return Err(Error::layout(
                    page.id(),
                    format!("talent `{}` at {row}/{col} runs past the last column", entry.key),
                ));
            }
            let span = entry.span;
            let cell = entry.into_cell(page.strings, row, col)?;
            draw_talent(page, &cell, text_sizes)?;
            col += span;
        }
    }
    Ok(())
}

fn draw_talent(page: &mut Page<'_>, cell: &TalentCell, text_sizes: &[f32]) -> Result<(), Error> {
    let c = page.config;
    let grid = page.grid;
    let s = c.talent_box_stroke;
    let wo = c.wedge_offset;
    let x = grid.col_offset(cell.col);
    let y = grid.row_offset(cell.row as i32);
    let width = grid.span_width(cell.span);
    let header = &cell.header;
    let two_line = header.is_two_line();
    let color = if header.active { c.active_color } else { c.passive_color };
    let footer_y = y - c.talent_box_height + s;
    let cost_text = match cell.cost {
        Cost::Printed(cost) => Some(format!("{} {cost}", page.localized("Cost")?)),
        Cost::Suppressed => None,
    };

    with_saved_state(&mut *page.canvas, |canvas| {
        canvas.set_stroke_color(color);
        canvas.set_fill_color(color);
        canvas.set_line_width(s);
        trace(canvas, &grid.box_outline(x, y, width));
        canvas.close_path(Paint::Stroke);

        if cost_text.is_some() {
            trace(canvas, &grid.footer_tab(x + wo + s, footer_y, PAGE_TAB_WIDTH));
            canvas.close_path(Paint::FillStroke);
        }
        let cost_tab_x = x + width - wo - s - COST_TAB_WIDTH;
        trace(canvas, &grid.footer_tab(cost_tab_x, footer_y, COST_TAB_WIDTH));
        canvas.close_path(Paint::FillStroke);

        let band_x = x + s * 2.5;
        let band_y = y - s * 2.5;
        let band_width = width - s * 5.0;
        trace(canvas, &grid.header_band(band_x, band_y, band_width, two_line));
        canvas.close_path(Paint::Fill);

        let (gx, gy) = (band_x + band_width - 2.2, band_y - 2.2);
        if header.is_ranked() {
            draw_ranked(canvas, gx, gy, WHITE);
        } else {
            draw_normal(canvas, gx, gy, WHITE);
        }
    });

    let title_x = x + s * 3.5;
    let title_y = y - s * 2.0 - 14.0;
    with_text(&mut *page.canvas, |canvas| {
        canvas.set_fill_color(WHITE);
        canvas.set_font(Typeface::Header, TITLE_SIZE);
        for (i, line) in header.title.split('\n').take(2).enumerate() {
            let line_y = title_y - i as f32 * 13.0;
            canvas.show_text_aligned(Align::Left, &line.to_uppercase(), title_x, line_y);
        }

        if let Some(cost_text) = &cost_text {
            let text_y = footer_y + wo - TAB_TEXT_SIZE / 2.0 + 0.5;
            canvas.set_font(Typeface::Bold, TAB_TEXT_SIZE);
            canvas.show_text_aligned(Align::Center, &header.page, x + wo + s + PAGE_TAB_WIDTH / 2.0, text_y);
            canvas.show_text_aligned(Align::Left, cost_text, x + width - s - COST_TAB_WIDTH, text_y);
        }
    });

    let text_top = if two_line {
        y - s * 2.0 - 28.0
    } else {
        y - s * 2.0 - 15.0
    };
    let available = text_top - (y - c.talent_box_height);
    let fitter = TextFitter::new(page.fonts, text_sizes, 2.0 * wo);
    let fitted = fitter.fit(&cell.body, width - s * 3.0, available);
    if fitted.overflow {
        log::debug!("{}: talent `{}` overflows its box", page.id(), cell.key);
    }
    page.canvas.set_fill_color(BLACK);
    draw_cell(&mut *page.canvas, &fitted, x + s * 1.5, text_top);
    Ok(())
}
