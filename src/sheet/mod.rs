//! Page generation. Every grid sheet runs the same fixed sequence of
//! stages; variants differ only in the steps they plug into it.

mod career;
mod character;
mod grid;
mod legend;

use crate::canvas::{Align, Canvas, with_text};
use crate::config::{BLACK, SheetConfig};
use crate::error::Error;
use crate::fonts::{FontBook, Typeface};
use crate::layout::text::{BlockAlign, LEADING_FACTOR, ParagraphStyle};
use crate::layout::{Flow, Grid};
use crate::markup;
use crate::model::{RunStyle, SheetRecord, TextRun, Variant};
use crate::strings::Strings;

/// Shared, read-only inputs for every page of a document.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub strings: &'a Strings,
    pub fonts: &'a FontBook,
    pub config: &'a SheetConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Legend,
    Header,
    Description,
    Paths,
    Talents,
    Footer,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::Legend,
        Stage::Header,
        Stage::Description,
        Stage::Paths,
        Stage::Talents,
        Stage::Footer,
    ];
}

type Step = fn(&mut Page<'_>) -> Result<(), Error>;

/// The overridable parts of the grid sheet skeleton.
struct Steps {
    legend: Step,
    header: Step,
    description: Step,
    /// Drawn before the regular connector paths.
    path_prelude: Option<Step>,
    row_shift: fn(&SheetConfig) -> f32,
    /// Candidate talent text sizes, largest first.
    text_sizes: &'static [f32],
}

/// Text sizes for grids whose boxes may span several columns.
const SPANNING_TEXT_SIZES: [f32; 3] = [9.0, 8.5, 7.5];
/// Regular, reduced and tiny sizes for career grids.
const CAREER_TEXT_SIZES: [f32; 3] = [9.0, 8.0, 7.0];

fn no_shift(_: &SheetConfig) -> f32 {
    0.0
}

fn signature_shift(config: &SheetConfig) -> f32 {
    config.signature_row_shift
}

impl Variant {
    /// `None` for variants that bypass the grid skeleton.
    fn steps(self) -> Option<Steps> {
        let simple = Steps {
            legend: legend::standard,
            header: header_line,
            description: descriptive_text,
            path_prelude: None,
            row_shift: no_shift,
            text_sizes: &SPANNING_TEXT_SIZES,
        };
        match self {
            Variant::Simple => Some(simple),
            Variant::Career => Some(Steps {
                description: career::skill_lists,
                text_sizes: &CAREER_TEXT_SIZES,
                ..simple
            }),
            Variant::Signature => Some(Steps {
                legend: legend::signature,
                header: header_two_lines,
                path_prelude: Some(grid::signature_nodes),
                row_shift: signature_shift,
                ..simple
            }),
            Variant::Force => Some(Steps {
                legend: legend::force,
                ..simple
            }),
            Variant::CharacterSheet => None,
        }
    }
}

/// Per-page drawing state, created for one record and dropped afterwards.
pub(crate) struct Page<'a> {
    pub(crate) record: &'a SheetRecord,
    pub(crate) strings: &'a Strings,
    pub(crate) fonts: &'a FontBook,
    pub(crate) config: &'a SheetConfig,
    pub(crate) canvas: &'a mut dyn Canvas,
    pub(crate) grid: Grid<'a>,
    pub(crate) flow: Flow,
}

impl<'a> Page<'a> {
    fn new(record: &'a SheetRecord, ctx: Context<'a>, canvas: &'a mut dyn Canvas, row_shift: f32) -> Self {
        let config = ctx.config;
        Self {
            record,
            strings: ctx.strings,
            fonts: ctx.fonts,
            config,
            canvas,
            grid: Grid::shifted(config, row_shift),
            flow: Flow::new(config.left_x(), config.top_y(), config.usable_width()),
        }
    }

    pub(crate) fn localized(&self, key: &str) -> Result<&'a str, Error> {
        self.strings.resolve(key)
    }

    pub(crate) fn mapped(&self, field: &str) -> Result<&'a str, Error> {
        self.strings.resolve_mapped(self.record, field)
    }

    pub(crate) fn id(&self) -> &'a str {
        &self.record.id
    }

    fn paragraph(&mut self, runs: &[TextRun], style: ParagraphStyle) {
        self.canvas.set_fill_color(BLACK);
        self.flow.paragraph(&mut *self.canvas, self.fonts, runs, style);
    }
}

/// Generate one page for `record` onto `canvas`.
pub fn generate(record: &SheetRecord, ctx: Context<'_>, canvas: &mut dyn Canvas) -> Result<(), Error> {
    let Some(steps) = record.variant.steps() else {
        return character::generate(record, ctx, canvas);
    };
    let shift = (steps.row_shift)(ctx.config);
    let mut page = Page::new(record, ctx, canvas, shift);
    for stage in Stage::ORDER {
        log::debug!("{} [{}]: {stage:?}", record.id, record.variant.name());
        match stage {
            Stage::Legend => (steps.legend)(&mut page)?,
            Stage::Header => (steps.header)(&mut page)?,
            Stage::Description => (steps.description)(&mut page)?,
            Stage::Paths => {
                if let Some(prelude) = steps.path_prelude {
                    prelude(&mut page)?;
                }
                grid::talent_paths(&mut page)?;
            }
            Stage::Talents => grid::talents(&mut page, steps.text_sizes)?,
            Stage::Footer => footer(&mut page)?,
        }
    }
    Ok(())
}

fn heading(size: f32) -> ParagraphStyle {
    ParagraphStyle {
        size,
        leading: size * 1.5,
        narrow: false,
        align: BlockAlign::Left,
        space_before: 0.0,
        max_width: None,
    }
}

fn header_line(page: &mut Page<'_>) -> Result<(), Error> {
    let text = format!("{}: {}", page.mapped("header")?, page.mapped("subheader")?);
    page.paragraph(&[TextRun::new(text, RunStyle::Bold)], heading(18.0));
    Ok(())
}

fn header_two_lines(page: &mut Page<'_>) -> Result<(), Error> {
    let header = page.mapped("header")?;
    let subheader = page.mapped("subheader")?;
    page.paragraph(&[TextRun::new(header, RunStyle::Bold)], heading(14.0));
    page.paragraph(&[TextRun::new(subheader, RunStyle::Bold)], heading(18.0));
    Ok(())
}

/// Optional free text named by the record's `descriptiveText` key.
fn descriptive_text(page: &mut Page<'_>) -> Result<(), Error> {
    let Some(key) = page.record.field("descriptiveText") else {
        return Ok(());
    };
    let key = key
        .as_str()
        .ok_or_else(|| Error::layout(page.id(), "descriptiveText is not a string key"))?;
    let runs = markup::parse(page.localized(key)?);
    page.paragraph(
        &runs,
        ParagraphStyle {
            size: 10.0,
            leading: 10.0 * LEADING_FACTOR,
            narrow: false,
            align: BlockAlign::Left,
            space_before: 5.0,
            max_width: None,
        },
    );
    Ok(())
}

fn footer(page: &mut Page<'_>) -> Result<(), Error> {
    let left = page.localized("copyright")?;
    let right = format!(
        "Version {} • {} • {} • {}",
        page.localized("version")?,
        page.localized("date")?,
        page.localized("game")?,
        page.localized("link")?
    );
    let (left_x, right_x, y) = (page.config.left_x(), page.config.right_x(), page.config.margin_vertical);
    with_text(&mut *page.canvas, |canvas| {
        canvas.set_font(Typeface::Regular, 6.0);
        canvas.set_fill_color(BLACK);
        canvas.show_text_aligned(Align::Left, left, left_x, y);
        canvas.show_text_aligned(Align::Right, &right, right_x, y);
    });
    Ok(())
}
