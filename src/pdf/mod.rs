//! PDF backend: replays recorded pages into content streams.

use std::collections::{BTreeMap, HashSet};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{Align, DrawOp, Paint};
use crate::config::{Rgb, SheetConfig};
use crate::error::Error;
use crate::fonts::{EmbeddedFont, FontBook, Typeface, embed_font};

/// Metadata written to the document information dictionary.
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Star Wars Talent Trees".to_string(),
            creator: concat!("talentsheet ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Characters shown per typeface across all pages.
fn used_chars(pages: &[Vec<DrawOp>]) -> BTreeMap<Typeface, HashSet<char>> {
    let mut used: BTreeMap<Typeface, HashSet<char>> = BTreeMap::new();
    for ops in pages {
        let mut face = None;
        for op in ops {
            match op {
                DrawOp::Font(f, _) => face = Some(*f),
                DrawOp::Text { text, .. } => {
                    if let Some(f) = face {
                        used.entry(f).or_default().extend(text.chars());
                    }
                }
                _ => {}
            }
        }
    }
    used
}

pub fn render(
    pages: &[Vec<DrawOp>],
    fonts: &FontBook,
    config: &SheetConfig,
    info: &DocumentInfo,
) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Phase 1: subset and embed every face that is actually shown
    let mut embedded: BTreeMap<Typeface, EmbeddedFont> = BTreeMap::new();
    for (face, chars) in used_chars(pages) {
        let font = embed_font(&mut pdf, fonts, face, &chars, &mut alloc);
        embedded.insert(face, font);
    }
    let t_fonts = t0.elapsed();

    // Phase 2: content streams
    let contents: Vec<Vec<u8>> = pages
        .iter()
        .map(|ops| {
            let raw = replay(ops, fonts, &embedded);
            miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6)
        })
        .collect();
    let t_content = t0.elapsed();

    // Phase 3: page tree
    let n = contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, data) in contents.iter().enumerate() {
        pdf.stream(content_ids[i], data).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, config.page_width, config.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for font in embedded.values() {
            font_dict.pair(Name(font.pdf_name.as_bytes()), font.font_ref);
        }
    }

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .creator(TextStr(&info.creator));

    let t_assembly = t0.elapsed();
    log::info!(
        "Render phases: font_embed={:.1}ms, content={:.1}ms, assembly={:.1}ms ({} pages, {} fonts)",
        t_fonts.as_secs_f64() * 1000.0,
        (t_content - t_fonts).as_secs_f64() * 1000.0,
        (t_assembly - t_content).as_secs_f64() * 1000.0,
        n,
        embedded.len(),
    );

    Ok(pdf.finish())
}

fn rgb(color: Rgb) -> (f32, f32, f32) {
    let [r, g, b] = color;
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Four cubic Béziers approximating a full circle.
fn circle(content: &mut Content, x: f32, y: f32, r: f32) {
    const KAPPA: f32 = 0.552_284_8;
    let k = r * KAPPA;
    content.move_to(x + r, y);
    content.cubic_to(x + r, y + k, x + k, y + r, x, y + r);
    content.cubic_to(x - k, y + r, x - r, y + k, x - r, y);
    content.cubic_to(x - r, y - k, x - k, y - r, x, y - r);
    content.cubic_to(x + k, y - r, x + r, y - k, x + r, y);
    content.close_path();
}

fn replay(ops: &[DrawOp], fonts: &FontBook, embedded: &BTreeMap<Typeface, EmbeddedFont>) -> Vec<u8> {
    let mut content = Content::new();
    let mut font: Option<(Typeface, f32)> = None;

    for op in ops {
        match op {
            DrawOp::SaveState => {
                content.save_state();
            }
            DrawOp::RestoreState => {
                content.restore_state();
            }
            DrawOp::FillColor(color) => {
                let (r, g, b) = rgb(*color);
                content.set_fill_rgb(r, g, b);
            }
            DrawOp::StrokeColor(color) => {
                let (r, g, b) = rgb(*color);
                content.set_stroke_rgb(r, g, b);
            }
            DrawOp::LineWidth(width) => {
                content.set_line_width(*width);
            }
            DrawOp::MoveTo(x, y) => {
                content.move_to(*x, *y);
            }
            DrawOp::LineTo(x, y) => {
                content.line_to(*x, *y);
            }
            DrawOp::Circle(x, y, r) => circle(&mut content, *x, *y, *r),
            DrawOp::Paint(paint) => {
                match paint {
                    Paint::Stroke => content.stroke(),
                    Paint::Fill => content.fill_nonzero(),
                    Paint::FillStroke => content.fill_nonzero_and_stroke(),
                };
            }
            DrawOp::ClosePath(paint) => {
                match paint {
                    Paint::Stroke => content.close_and_stroke(),
                    Paint::Fill => content.close_path().fill_nonzero(),
                    Paint::FillStroke => content.close_fill_nonzero_and_stroke(),
                };
            }
            DrawOp::BeginText => {
                content.begin_text();
            }
            DrawOp::EndText => {
                content.end_text();
            }
            DrawOp::Font(face, size) => {
                let Some(entry) = embedded.get(face) else {
                    continue;
                };
                content.set_font(Name(entry.pdf_name.as_bytes()), *size);
                content.set_horizontal_scaling(fonts.metrics(*face).scale * 100.0);
                font = Some((*face, *size));
            }
            DrawOp::Text { align, text, x, y } => {
                let Some((face, size)) = font else {
                    log::warn!("Text shown before any font was set: {text:?}");
                    continue;
                };
                let Some(entry) = embedded.get(&face) else {
                    continue;
                };
                let width = fonts.text_width(face, size, text);
                let x = match align {
                    Align::Left => *x,
                    Align::Center => x - width / 2.0,
                    Align::Right => x - width,
                };
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, *y]);
                content.show(Str(&entry.encode(text)));
            }
        }
    }
    content.finish().as_slice().to_vec()
}
