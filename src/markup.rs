//! Pipe-delimited markup: `|*bold |regular|#symbol|`.

use crate::model::{RunStyle, TextRun};

/// Split a marked-up string into styled runs. Empty segments are skipped.
/// A marked segment ending in a space has that space split off into a
/// regular run so spacing never takes the marked typeface.
pub fn parse(markup: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    for part in markup.split('|') {
        if part.is_empty() {
            continue;
        }
        let (style, rest) = if let Some(rest) = part.strip_prefix('*') {
            (RunStyle::Bold, rest)
        } else if let Some(rest) = part.strip_prefix('#') {
            (RunStyle::Symbol, rest)
        } else {
            runs.push(TextRun::new(part, RunStyle::Regular));
            continue;
        };
        match rest.strip_suffix(' ') {
            Some(body) => {
                runs.push(TextRun::new(body, style));
                runs.push(TextRun::new(" ", RunStyle::Regular));
            }
            None => runs.push(TextRun::new(rest, style)),
        }
    }
    runs
}

/// Concatenated text of all runs, ignoring style.
pub fn plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
