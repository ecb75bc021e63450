use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const GRAY: Rgb = [128, 128, 128];
pub const WHITE: Rgb = [255, 255, 255];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("a4") {
            Ok(PageSize::A4)
        } else if s.eq_ignore_ascii_case("letter") {
            Ok(PageSize::Letter)
        } else {
            Err(Error::Config(format!("unknown page size `{s}`")))
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => f.write_str("A4"),
            PageSize::Letter => f.write_str("letter"),
        }
    }
}

/// Fixed layout settings for one document. Every geometry and drawing call
/// receives this by reference; nothing here varies from page to page.
#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_horizontal: f32,
    pub margin_vertical: f32,
    pub header_text_max_width: f32,

    pub talent_box_stroke: f32,
    pub talent_path_stroke: f32,
    pub talent_box_width: f32,
    pub talent_box_height: f32,
    pub wedge_offset: f32,
    pub vertical_spacing: f32,
    /// Downward shift of every grid row on signature trees.
    pub signature_row_shift: f32,

    /// Printed grid limits used to reject out-of-range data.
    pub max_columns: usize,
    pub max_rows: usize,

    pub passive_color: Rgb,
    pub active_color: Rgb,
    pub line_color: Rgb,
}

impl SheetConfig {
    pub fn new(page_size: PageSize) -> Self {
        let (page_width, page_height) = page_size.dimensions();
        Self {
            page_width,
            page_height,
            margin_horizontal: 48.0,
            margin_vertical: 28.0,
            header_text_max_width: 420.0,
            talent_box_stroke: 2.0,
            talent_path_stroke: 4.0,
            talent_box_width: 111.0,
            talent_box_height: 128.0,
            wedge_offset: 8.0,
            vertical_spacing: 10.0,
            signature_row_shift: 50.0,
            max_columns: 5,
            max_rows: 6,
            passive_color: BLACK,
            active_color: GRAY,
            line_color: GRAY,
        }
    }

    /// Rejects page sizes whose usable width cannot hold four standard boxes.
    pub fn validate(&self) -> Result<(), Error> {
        let needed = 4.0 * self.talent_box_width;
        if self.usable_width() < needed {
            return Err(Error::Config(format!(
                "usable page width {:.1}pt is narrower than four talent boxes ({needed:.1}pt)",
                self.usable_width()
            )));
        }
        Ok(())
    }

    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_horizontal
    }

    pub fn left_x(&self) -> f32 {
        self.margin_horizontal
    }

    pub fn right_x(&self) -> f32 {
        self.page_width - self.margin_horizontal
    }

    pub fn top_y(&self) -> f32 {
        self.page_height - self.margin_vertical
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
