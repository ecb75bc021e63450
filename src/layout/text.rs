//! Line breaking for styled runs, the shrink-to-fit policy for talent text,
//! and flowing paragraphs for page headers.

use crate::canvas::{Align, Canvas, with_text};
use crate::fonts::{FontBook, Typeface};
use crate::markup;
use crate::model::{RunStyle, TextRun};

/// Inner padding of a talent text cell, on every side.
pub const CELL_PADDING: f32 = 2.0;

/// Leading as a multiple of the font size.
pub const LEADING_FACTOR: f32 = 1.2;

pub fn typeface(style: RunStyle, narrow: bool) -> Typeface {
    match (style, narrow) {
        (RunStyle::Regular, false) => Typeface::Regular,
        (RunStyle::Bold, false) => Typeface::Bold,
        (RunStyle::Regular, true) => Typeface::CondensedRegular,
        (RunStyle::Bold, true) => Typeface::CondensedBold,
        (RunStyle::Symbol, _) => Typeface::Symbol,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub face: Typeface,
    pub text: String,
    /// Offset from the line start.
    pub x: f32,
    pub width: f32,
    /// Index of the space-separated word this chunk belongs to.
    pub word: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub chunks: Vec<Chunk>,
    pub width: f32,
    pub words: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<Line>,
    pub font_size: f32,
    pub leading: f32,
    pub width: f32,
}

impl TextBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.leading
    }
}

enum Token {
    Word(Vec<(Typeface, String)>),
    Space(Typeface),
    Break,
}

/// Group runs into words. A word may cross run boundaries, so `*Brawn|:`
/// stays together; only whitespace and newlines separate words.
fn tokenize(runs: &[TextRun], narrow: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<(Typeface, String)> = Vec::new();
    for run in runs {
        let face = typeface(run.style, narrow);
        let mut piece = String::new();
        for ch in run.text.chars() {
            if ch.is_whitespace() {
                if !piece.is_empty() {
                    word.push((face, std::mem::take(&mut piece)));
                }
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(if ch == '\n' {
                    Token::Break
                } else {
                    Token::Space(face)
                });
            } else {
                piece.push(ch);
            }
        }
        if !piece.is_empty() {
            word.push((face, piece));
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

/// Greedy line breaking at `width`. Words wider than a line are kept whole
/// and overflow to the right.
pub fn break_lines(runs: &[TextRun], fonts: &FontBook, size: f32, narrow: bool, width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space = 0.0f32;

    for token in tokenize(runs, narrow) {
        match token {
            Token::Space(face) => {
                if !line.chunks.is_empty() {
                    pending_space = pending_space.max(fonts.space_width(face, size));
                }
            }
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                pending_space = 0.0;
            }
            Token::Word(parts) => {
                let measured: Vec<(Typeface, String, f32)> = parts
                    .into_iter()
                    .map(|(face, text)| {
                        let w = fonts.text_width(face, size, &text);
                        (face, text, w)
                    })
                    .collect();
                let word_width: f32 = measured.iter().map(|(_, _, w)| w).sum();
                if !line.chunks.is_empty() && line.width + pending_space + word_width > width {
                    lines.push(std::mem::take(&mut line));
                    pending_space = 0.0;
                }
                let mut x = if line.chunks.is_empty() {
                    0.0
                } else {
                    line.width + pending_space
                };
                for (face, text, w) in measured {
                    line.chunks.push(Chunk {
                        face,
                        text,
                        x,
                        width: w,
                        word: line.words,
                    });
                    x += w;
                }
                line.words += 1;
                line.width = x;
                pending_space = 0.0;
            }
        }
    }
    if !line.chunks.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn layout_block(runs: &[TextRun], fonts: &FontBook, size: f32, narrow: bool, width: f32) -> TextBlock {
    TextBlock {
        lines: break_lines(runs, fonts, size, narrow, width),
        font_size: size,
        leading: size * LEADING_FACTOR,
        width,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockAlign {
    Left,
    /// All lines but the last are stretched to the full width.
    Justify,
}

/// Draw `block` with its first line's top at `top`. Fill colour is left as set.
pub fn draw_block<C: Canvas + ?Sized>(canvas: &mut C, block: &TextBlock, x: f32, top: f32, align: BlockAlign) {
    let last = block.lines.len().saturating_sub(1);
    with_text(canvas, |canvas| {
        let mut current: Option<Typeface> = None;
        for (i, line) in block.lines.iter().enumerate() {
            let baseline = top - (i + 1) as f32 * block.leading;
            let gap = match align {
                BlockAlign::Justify if i != last && line.words > 1 => {
                    (block.width - line.width).max(0.0) / (line.words - 1) as f32
                }
                _ => 0.0,
            };
            for chunk in &line.chunks {
                if current != Some(chunk.face) {
                    canvas.set_font(chunk.face, block.font_size);
                    current = Some(chunk.face);
                }
                let cx = x + chunk.x + chunk.word as f32 * gap;
                canvas.show_text_aligned(Align::Left, &chunk.text, cx, baseline);
            }
        }
    });
}

/// Result of fitting marked-up text into a box.
#[derive(Clone, Debug)]
pub struct FittedText {
    pub runs: Vec<TextRun>,
    pub font_size: f32,
    pub block: TextBlock,
    /// True when even the smallest size did not fit.
    pub overflow: bool,
}

/// Picks the largest of a descending list of font sizes whose text block
/// fits the available height, or the smallest one if none does.
pub struct TextFitter<'a> {
    fonts: &'a FontBook,
    sizes: &'a [f32],
    /// Subtracted from the available height before comparing.
    margin: f32,
}

impl<'a> TextFitter<'a> {
    pub fn new(fonts: &'a FontBook, sizes: &'a [f32], margin: f32) -> Self {
        Self {
            fonts,
            sizes,
            margin,
        }
    }

    /// Height of the cell holding `runs` at `size` in a column `width` wide.
    pub fn measure(&self, runs: &[TextRun], size: f32, width: f32) -> f32 {
        self.cell_block(runs, size, width).height() + 2.0 * CELL_PADDING
    }

    fn cell_block(&self, runs: &[TextRun], size: f32, width: f32) -> TextBlock {
        layout_block(runs, self.fonts, size, true, width - 2.0 * CELL_PADDING)
    }

    pub fn fit(&self, markup_text: &str, width: f32, available_height: f32) -> FittedText {
        let runs = markup::parse(markup_text);
        let limit = available_height - self.margin;
        let mut smallest = None;
        for &size in self.sizes {
            let block = self.cell_block(&runs, size, width);
            if block.height() + 2.0 * CELL_PADDING <= limit {
                return FittedText {
                    runs,
                    font_size: size,
                    block,
                    overflow: false,
                };
            }
            smallest = Some((size, block));
        }
        let (font_size, block) = smallest.unwrap_or_else(|| {
            (
                DEFAULT_CELL_SIZE,
                self.cell_block(&runs, DEFAULT_CELL_SIZE, width),
            )
        });
        log::debug!("Text does not fit at {font_size}pt, accepting overflow: {markup_text:?}");
        FittedText {
            runs,
            font_size,
            block,
            overflow: true,
        }
    }
}

const DEFAULT_CELL_SIZE: f32 = 9.0;

/// Draw fitted text inside its cell; `x`/`top` is the cell's top left corner.
pub fn draw_cell<C: Canvas + ?Sized>(canvas: &mut C, fitted: &FittedText, x: f32, top: f32) {
    draw_block(
        canvas,
        &fitted.block,
        x + CELL_PADDING,
        top - CELL_PADDING,
        BlockAlign::Left,
    );
}

/// Paragraph settings for page header flow.
#[derive(Clone, Copy, Debug)]
pub struct ParagraphStyle {
    pub size: f32,
    pub leading: f32,
    pub narrow: bool,
    pub align: BlockAlign,
    pub space_before: f32,
    /// Narrower wrap width than the flow's, if any.
    pub max_width: Option<f32>,
}

/// Top-down flow of paragraphs from the top margin.
#[derive(Clone, Copy, Debug)]
pub struct Flow {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Flow {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    pub fn paragraph<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        fonts: &FontBook,
        runs: &[TextRun],
        style: ParagraphStyle,
    ) {
        let width = style.max_width.map_or(self.width, |w| w.min(self.width));
        let mut block = layout_block(runs, fonts, style.size, style.narrow, width);
        block.leading = style.leading;
        self.y -= style.space_before;
        draw_block(canvas, &block, self.x, self.y, style.align);
        self.y -= block.height();
    }
}
