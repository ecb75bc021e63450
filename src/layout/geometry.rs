//! Grid positions and shape outlines. Everything is derived from
//! `SheetConfig`; no position is stored.

use crate::config::SheetConfig;

pub type Point = (f32, f32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Even path rows connect boxes side by side, odd rows connect a box to
    /// the one below it.
    pub fn of_path_row(path_row: usize) -> Self {
        if path_row % 2 == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Top-of-grid connector used by signature trees.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureNode {
    pub stem: Segment,
    /// Open bracket spanning the box width above the stem.
    pub bracket: [Point; 4],
    pub diamond: [Point; 4],
}

#[derive(Clone, Copy, Debug)]
pub struct Grid<'a> {
    config: &'a SheetConfig,
    row_shift: f32,
}

impl<'a> Grid<'a> {
    pub fn new(config: &'a SheetConfig) -> Self {
        Self {
            config,
            row_shift: 0.0,
        }
    }

    /// Grid moved down by `shift` points.
    pub fn shifted(config: &'a SheetConfig, shift: f32) -> Self {
        Self {
            config,
            row_shift: shift,
        }
    }

    pub fn config(&self) -> &'a SheetConfig {
        self.config
    }

    /// Gap between columns. Width for exactly four standard columns is
    /// always reserved, whatever the number of boxes in use.
    pub fn horizontal_spacing(&self) -> f32 {
        (self.config.usable_width() - 4.0 * self.config.talent_box_width) / 3.0
    }

    pub fn col_offset(&self, col: usize) -> f32 {
        self.config.left_x() + col as f32 * (self.horizontal_spacing() + self.config.talent_box_width)
    }

    /// Top edge of a box row. Data rows count downwards while page
    /// coordinates grow upwards, so row 0 is the highest.
    pub fn row_offset(&self, row: i32) -> f32 {
        let c = self.config;
        c.vertical_spacing / 2.0
            + c.margin_vertical
            + (5 - row) as f32 * (c.talent_box_height + c.vertical_spacing)
            - self.row_shift
    }

    /// Width of a box spanning `columns` columns, clamped to 1..=4.
    pub fn span_width(&self, columns: usize) -> f32 {
        let n = columns.clamp(1, 4) as f32;
        n * self.config.talent_box_width + (n - 1.0) * self.horizontal_spacing()
    }

    /// Connector for a set path flag at `path_row`/`col`.
    pub fn connector(&self, path_row: usize, col: usize) -> Segment {
        let c = self.config;
        let x = self.col_offset(col);
        let y = self.row_offset((path_row / 2) as i32);
        match Orientation::of_path_row(path_row) {
            Orientation::Horizontal => {
                let y = y - (c.talent_box_height / 2.0 + c.talent_box_stroke / 2.0);
                let x = x + c.talent_box_width - c.talent_box_stroke;
                Segment {
                    from: (x, y),
                    to: (x + self.horizontal_spacing() + 2.0 * c.talent_box_stroke, y),
                }
            }
            Orientation::Vertical => self.stem(x, y),
        }
    }

    fn stem(&self, col_x: f32, row_y: f32) -> Segment {
        let c = self.config;
        let x = col_x + c.talent_box_width / 2.0 - c.talent_path_stroke / 2.0;
        let y = row_y - c.talent_box_height;
        Segment {
            from: (x, y + c.vertical_spacing),
            to: (x, y - c.talent_box_stroke - c.wedge_offset - c.talent_box_stroke),
        }
    }

    /// Connector node above column `col`, sitting in the virtual row -1.
    pub fn signature_node(&self, col: usize) -> SignatureNode {
        let c = self.config;
        let stem = self.stem(self.col_offset(col), self.row_offset(-1));
        let (x, y) = (stem.from.0, stem.from.1);
        let half = c.talent_box_width / 2.0;
        let wo = c.wedge_offset;
        let bracket = [
            (x - half, y + wo),
            (x - half + wo, y),
            (x + half - wo, y),
            (x + half, y + wo),
        ];
        let offset = -15.766 / 2.0 - c.talent_path_stroke / 2.0;
        let diamond = [
            (x + 9.883 + offset, y - offset / 2.0),
            (x + 15.766 + offset, y - 5.883 - offset / 2.0),
            (x + 9.883 + offset, y - 11.765 - offset / 2.0),
            (x + 4.0 + offset, y - 5.883 - offset / 2.0),
        ];
        SignatureNode {
            stem,
            bracket,
            diamond,
        }
    }

    /// Box outline with 45° notches at the top right and bottom corners,
    /// inset by the stroke width.
    pub fn box_outline(&self, x: f32, y: f32, width: f32) -> [Point; 7] {
        let c = self.config;
        let s = c.talent_box_stroke;
        let wo = c.wedge_offset;
        let h = c.talent_box_height;
        [
            (x + s, y - s),
            (x + width - s - wo, y - s),
            (x + width - s, y - s - wo),
            (x + width - s, y - h + s + wo * 2.0),
            (x + width - s - wo, y - h + s + wo),
            (x + s + wo, y - h + s + wo),
            (x + s, y - h + s + wo * 2.0),
        ]
    }

    /// Hexagonal tab whose bottom edge is at `y`.
    pub fn footer_tab(&self, x: f32, y: f32, width: f32) -> [Point; 6] {
        let wo = self.config.wedge_offset;
        [
            (x, y + wo),
            (x + wo, y + wo * 2.0),
            (x + width - wo, y + wo * 2.0),
            (x + width, y + wo),
            (x + width - wo, y),
            (x + wo, y),
        ]
    }

    /// Title accent band; taller when the title takes two lines.
    pub fn header_band(&self, x: f32, y: f32, width: f32, two_line: bool) -> [Point; 5] {
        let wo = self.config.wedge_offset;
        let (inset, depth) = if two_line { (2.5, 3.5) } else { (1.0, 2.0) };
        [
            (x, y),
            (x + width - wo, y),
            (x + width, y - wo),
            (x + width - wo * inset, y - wo * depth),
            (x, y - wo * depth),
        ]
    }
}

const GLYPH_WIDTH: f32 = 15.766;

/// Diamond marking a normal talent; right edge at `x`.
pub fn normal_glyph(x: f32, y: f32) -> [Point; 4] {
    let x = x - GLYPH_WIDTH;
    [
        (x + 9.883, y),
        (x + 15.766, y - 5.883),
        (x + 9.883, y - 11.765),
        (x + 4.0, y - 5.883),
    ]
}

/// Chevron drawn left of the diamond for ranked talents.
pub fn ranked_wedge(x: f32, y: f32) -> [Point; 6] {
    let x = x - GLYPH_WIDTH;
    [
        (x + 5.883, y),
        (x + 6.883, y - 1.0),
        (x + 2.0, y - 5.883),
        (x + 6.883, y - 10.765),
        (x + 5.883, y - 11.765),
        (x, y - 5.883),
    ]
}

/// Right-pointing legend arrow ending at `x`.
pub fn legend_arrow(x: f32, y: f32) -> [Point; 5] {
    [
        (x - 4.0, y),
        (x, y - 4.0),
        (x - 4.0, y - 8.0),
        (x - 16.0, y - 8.0),
        (x - 16.0, y),
    ]
}

/// Octagonal band with 5pt corner cuts, top left corner at `x`/`y`.
pub fn gauge_band(x: f32, y: f32, width: f32, height: f32) -> [Point; 8] {
    [
        (x, y - 5.0),
        (x + 5.0, y),
        (x + width - 5.0, y),
        (x + width, y - 5.0),
        (x + width, y - height + 5.0),
        (x + width - 5.0, y - height),
        (x + 5.0, y - height),
        (x, y - height + 5.0),
    ]
}
