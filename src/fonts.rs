use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::Error;

/// The six typefaces a sheet is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Typeface {
    Header,
    Regular,
    Bold,
    CondensedRegular,
    CondensedBold,
    Symbol,
}

impl Typeface {
    pub const ALL: [Typeface; 6] = [
        Typeface::Header,
        Typeface::Regular,
        Typeface::Bold,
        Typeface::CondensedRegular,
        Typeface::CondensedBold,
        Typeface::Symbol,
    ];

    /// File looked up in the font directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Typeface::Header => "LeagueGothic-Regular.otf",
            Typeface::Regular => "LiberationSans-Regular.ttf",
            Typeface::Bold => "LiberationSans-Bold.ttf",
            Typeface::CondensedRegular => "LiberationSansNarrow-Regular.ttf",
            Typeface::CondensedBold => "LiberationSansNarrow-Bold.ttf",
            Typeface::Symbol => "EotE_Symbol-Regular_v1.otf",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn pdf_name(self) -> String {
        format!("F{}", self.index() + 1)
    }

    /// Standard-14 face and horizontal scaling used when no file is loaded.
    fn fallback(self) -> (&'static str, f32) {
        match self {
            Typeface::Header => ("Helvetica-Bold", 0.75),
            Typeface::Regular | Typeface::Symbol => ("Helvetica", 1.0),
            Typeface::Bold => ("Helvetica-Bold", 1.0),
            Typeface::CondensedRegular => ("Helvetica", 0.82),
            Typeface::CondensedBold => ("Helvetica-Bold", 0.82),
        }
    }
}

enum Source {
    Builtin,
    File { data: Vec<u8>, cff: bool },
}

pub(crate) struct FaceMetrics {
    source: Source,
    /// WinAnsi widths (chars 32..=255) at 1000 units/em.
    widths_1000: Vec<f32>,
    /// Horizontal scaling applied when drawing, 1.0 for loaded faces.
    pub(crate) scale: f32,
}

impl FaceMetrics {
    fn builtin(face: Typeface) -> Self {
        let (_, scale) = face.fallback();
        Self {
            source: Source::Builtin,
            widths_1000: helvetica_widths(),
            scale,
        }
    }

    fn from_data(data: Vec<u8>) -> Option<Self> {
        let (widths_1000, cff) = {
            let face = Face::parse(&data, 0).ok()?;
            let units = face.units_per_em() as f32;
            let widths: Vec<f32> = (32u8..=255u8)
                .map(|byte| {
                    face.glyph_index(winansi_to_char(byte))
                        .and_then(|gid| face.glyph_hor_advance(gid))
                        .map(|adv| adv as f32 / units * 1000.0)
                        .unwrap_or(0.0)
                })
                .collect();
            (widths, face.tables().cff.is_some())
        };
        Some(Self {
            source: Source::File { data, cff },
            widths_1000,
            scale: 1.0,
        })
    }

    /// Width of a single character in 1000-units. Characters outside WinAnsi
    /// are measured from the face itself when one is loaded.
    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            return self.widths_1000[(byte - 32) as usize];
        }
        match &self.source {
            Source::File { data, .. } => Face::parse(data, 0)
                .ok()
                .and_then(|face| {
                    let units = face.units_per_em() as f32;
                    face.glyph_index(ch)
                        .and_then(|gid| face.glyph_hor_advance(gid))
                        .map(|adv| adv as f32 / units * 1000.0)
                })
                .unwrap_or(0.0),
            Source::Builtin => 0.0,
        }
    }
}

/// Width metrics for every typeface, plus the data needed to embed them.
pub struct FontBook {
    faces: Vec<FaceMetrics>,
}

impl FontBook {
    /// Standard-14 Helvetica stand-ins for all faces. Measurements are
    /// approximate but fully deterministic.
    pub fn builtin() -> Self {
        Self {
            faces: Typeface::ALL.iter().map(|&f| FaceMetrics::builtin(f)).collect(),
        }
    }

    /// Load faces from `dir` (or the directories in `TALENTSHEET_FONTS`).
    /// Missing files fall back to the built-in face; unreadable ones are errors.
    pub fn load(dir: Option<&Path>) -> Result<Self, Error> {
        let dirs = font_directories(dir);
        let mut faces = Vec::with_capacity(Typeface::ALL.len());
        for face in Typeface::ALL {
            let path = dirs
                .iter()
                .map(|d| d.join(face.file_name()))
                .find(|p| p.is_file());
            let metrics = match path {
                Some(path) => {
                    let data = std::fs::read(&path)?;
                    let metrics = FaceMetrics::from_data(data).ok_or_else(|| {
                        Error::Font(format!("{} could not be parsed", path.display()))
                    })?;
                    log::debug!("Loaded {face:?} from {}", path.display());
                    metrics
                }
                None => {
                    log::warn!(
                        "Font not found: {}, using {}",
                        face.file_name(),
                        face.fallback().0
                    );
                    FaceMetrics::builtin(face)
                }
            };
            faces.push(metrics);
        }
        Ok(Self { faces })
    }

    pub(crate) fn metrics(&self, face: Typeface) -> &FaceMetrics {
        &self.faces[face.index()]
    }

    pub fn text_width(&self, face: Typeface, size: f32, text: &str) -> f32 {
        let metrics = self.metrics(face);
        text.chars()
            .map(|ch| metrics.char_width_1000(ch) * size / 1000.0)
            .sum::<f32>()
            * metrics.scale
    }

    pub fn space_width(&self, face: Typeface, size: f32) -> f32 {
        self.text_width(face, size, " ")
    }
}

fn font_directories(dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(dir) = dir {
        dirs.push(dir.to_path_buf());
    }
    if let Ok(val) = std::env::var("TALENTSHEET_FONTS") {
        let sep = if cfg!(windows) { ';' } else { ':' };
        dirs.extend(
            val.split(sep)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        );
    }
    dirs
}

/// A typeface written into the PDF.
pub(crate) struct EmbeddedFont {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    pub(crate) char_to_gid: Option<HashMap<char, u16>>,
}

impl EmbeddedFont {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Write the font objects for `face`. Loaded faces are subsetted to
/// `used_chars` and embedded as CIDFonts; built-in faces become Type1 refs.
pub(crate) fn embed_font(
    pdf: &mut Pdf,
    book: &FontBook,
    face: Typeface,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> EmbeddedFont {
    let font_ref = alloc();
    let pdf_name = face.pdf_name();
    let metrics = book.metrics(face);

    let char_to_gid = match &metrics.source {
        Source::File { data, cff } => {
            embed_opentype(pdf, font_ref, face, data, *cff, used_chars, alloc)
        }
        Source::Builtin => None,
    };
    if char_to_gid.is_none() {
        let (base_font, _) = face.fallback();
        pdf.type1_font(font_ref)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    EmbeddedFont {
        pdf_name,
        font_ref,
        char_to_gid,
    }
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
fn embed_opentype(
    pdf: &mut Pdf,
    font_ref: Ref,
    face_kind: Typeface,
    font_data: &[u8],
    cff: bool,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<HashMap<char, u16>> {
    let face = Face::parse(font_data, 0).ok()?;
    let descriptor_ref = alloc();
    let data_ref = alloc();

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut gid_widths: Vec<(u16, f32)> = Vec::new();
    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();
    for &ch in &chars {
        if let Some(gid) = face.glyph_index(ch) {
            let new_gid = remapper.remap(gid.0);
            char_to_gid.insert(ch, new_gid);
            let w = face
                .glyph_hor_advance(gid)
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0);
            gid_widths.push((new_gid, w));
        }
    }
    gid_widths.sort_by_key(|&(gid, _)| gid);
    gid_widths.dedup_by_key(|&mut (gid, _)| gid);

    let subset_data = subsetter::subset(font_data, 0, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {face_kind:?}: {e}, embedding full font");
        font_data.to_vec()
    });

    let ps_name = face_kind
        .file_name()
        .split('.')
        .next()
        .unwrap_or("Font")
        .replace(['_', ' '], "");

    if cff {
        pdf.stream(data_ref, &subset_data)
            .pair(Name(b"Subtype"), Name(b"OpenType"));
    } else {
        let data_len = i32::try_from(subset_data.len()).ok()?;
        pdf.stream(data_ref, &subset_data)
            .pair(Name(b"Length1"), data_len);
    }

    {
        let flags = if face_kind == Typeface::Symbol {
            pdf_writer::types::FontFlags::SYMBOLIC
        } else {
            pdf_writer::types::FontFlags::NON_SYMBOLIC
        };
        let mut descriptor = pdf.font_descriptor(descriptor_ref);
        descriptor
            .name(Name(ps_name.as_bytes()))
            .flags(flags)
            .bbox(bbox)
            .italic_angle(0.0)
            .ascent(ascent)
            .descent(descent)
            .cap_height(cap_height)
            .stem_v(80.0);
        if cff {
            descriptor.font_file3(data_ref);
        } else {
            descriptor.font_file2(data_ref);
        }
    }

    let cid_font_ref = alloc();
    let system_info = pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(if cff {
            pdf_writer::types::CidFontType::Type0
        } else {
            pdf_writer::types::CidFontType::Type2
        });
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info);
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        if !cff {
            cid.cid_to_gid_map_predefined(Name(b"Identity"));
        }
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    for ch in &chars {
        if let Some(&new_gid) = char_to_gid.get(ch) {
            cmap.pair(new_gid, *ch);
        }
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Some(char_to_gid)
}

/// Windows-1252 (WinAnsi) byte to Unicode char mapping.
/// Bytes 0x80-0x9F are remapped; all others map directly to their Unicode codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}', // bullet
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes, dropping unmappable chars.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match char_to_winansi(c) {
            0 => None,
            b => Some(b),
        })
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}
