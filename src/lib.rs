pub mod canvas;
pub mod config;
mod error;
pub mod fonts;
pub mod input;
pub mod layout;
pub mod markup;
pub mod model;
pub mod pdf;
pub mod sequence;
pub mod sheet;
pub mod strings;
pub mod talent;

pub use config::{PageSize, SheetConfig};
pub use error::Error;
pub use fonts::FontBook;
pub use model::{SheetRecord, Variant};
pub use strings::Strings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use canvas::{DrawOp, Recorder};
use pdf::DocumentInfo;
use sheet::Context;

/// One generated page, still in recorded form.
#[derive(Clone, Debug)]
pub struct ComposedPage {
    pub id: String,
    pub variant: Variant,
    pub ops: Vec<DrawOp>,
}

/// Order `records` and draw each onto its own recorder. Stops at the first
/// failing page; no partial document is returned.
pub fn compose(records: Vec<SheetRecord>, ctx: Context<'_>) -> Result<Vec<ComposedPage>, Error> {
    ctx.config.validate()?;
    let records = sequence::sequence(records, ctx.strings);
    let mut pages = Vec::with_capacity(records.len());
    for record in records {
        let mut recorder = Recorder::new();
        sheet::generate(&record, ctx, &mut recorder)?;
        log::info!("Generated: {}", record.id);
        pages.push(ComposedPage {
            id: record.id,
            variant: record.variant,
            ops: recorder.into_ops(),
        });
    }
    Ok(pages)
}

/// Compose and render a complete document to PDF bytes.
pub fn render_sheets(records: Vec<SheetRecord>, ctx: Context<'_>) -> Result<Vec<u8>, Error> {
    let pages = compose(records, ctx)?;
    let ops: Vec<Vec<DrawOp>> = pages.into_iter().map(|page| page.ops).collect();
    let info = DocumentInfo {
        title: ctx
            .strings
            .get("PDFTitle")
            .map(str::to_string)
            .unwrap_or_else(|| DocumentInfo::default().title),
        ..DocumentInfo::default()
    };
    pdf::render(&ops, ctx.fonts, ctx.config, &info)
}

/// Output file named by the `FileName` string, `out.pdf` otherwise.
pub fn default_output_path(strings: &Strings) -> PathBuf {
    let stem = strings.get("FileName").unwrap_or("out");
    PathBuf::from(format!("{stem}.pdf"))
}

/// Where the CLI reads its inputs from.
#[derive(Clone, Debug)]
pub struct Job<'a> {
    pub data: &'a Path,
    /// Explicit strings file; otherwise `strings_<language>.txt` next to `data`.
    pub strings: Option<&'a Path>,
    /// Ignored when `strings` is set. Defaults to the system locale.
    pub language: Option<&'a str>,
    pub fonts: Option<&'a Path>,
    pub page_size: PageSize,
    pub output: Option<&'a Path>,
}

fn strings_file(job: &Job<'_>) -> Result<PathBuf, Error> {
    if let Some(path) = job.strings {
        return Ok(path.to_path_buf());
    }
    let language = job
        .language
        .map(str::to_string)
        .unwrap_or_else(input::system_language);
    let dir = job
        .data
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    input::locate_strings(dir, &language)
}

/// Load inputs, generate every page and write the PDF. Returns the path written.
pub fn generate_talent_trees(job: &Job<'_>) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let strings_path = strings_file(job)?;
    log::debug!("Strings from {}", strings_path.display());
    let strings = input::load_strings(&strings_path)?;
    let records = input::load_records(job.data)?;
    let fonts = FontBook::load(job.fonts)?;
    let config = SheetConfig::new(job.page_size);
    let t_load = t0.elapsed();

    let ctx = Context {
        strings: &strings,
        fonts: &fonts,
        config: &config,
    };
    let page_count = records.len();
    let bytes = render_sheets(records, ctx)?;
    let t_render = t0.elapsed();

    let output = job
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&strings));
    std::fs::write(&output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages, output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        page_count,
        bytes.len(),
    );

    Ok(output)
}
