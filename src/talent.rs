use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;
use crate::model::{Cost, HeaderProperties, TalentCell};
use crate::strings::Strings;

/// Parse a four-field header descriptor: `title|page|A or P|status`.
/// Fields past the fourth and characters past the first status char are ignored.
pub fn parse_header(key: &str, line: &str) -> Result<HeaderProperties, Error> {
    let parts: Vec<&str> = line.split('|').collect();
    let status = parts.get(3).and_then(|s| s.chars().next());
    let (Some(&title), Some(&page), Some(&flag), Some(status)) =
        (parts.first(), parts.get(1), parts.get(2), status)
    else {
        return Err(Error::MalformedHeaderData {
            key: key.to_string(),
            line: line.to_string(),
        });
    };
    Ok(HeaderProperties {
        title: title.to_string(),
        page: page.to_string(),
        active: flag.eq_ignore_ascii_case("A"),
        status,
    })
}

/// Resolve `<key>Data` and parse it as a header descriptor.
pub fn header_properties(strings: &Strings, key: &str) -> Result<HeaderProperties, Error> {
    let data_key = format!("{key}Data");
    let line = strings.resolve(&data_key)?;
    parse_header(&data_key, line)
}

fn span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*([1-4])").expect("valid span pattern"))
}

fn cost_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\|([0-9]+)").expect("valid cost pattern"))
}

/// Directives embedded in a talent entry, e.g. `Grit*2|10`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TalentEntry {
    pub key: String,
    pub span: usize,
    /// `None` when no cost directive is present.
    pub custom_cost: Option<u32>,
}

pub fn parse_entry(entry: &str) -> TalentEntry {
    let span = span_pattern()
        .captures(entry)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or(1);
    let key = span_pattern().replace_all(entry, "");
    let custom_cost = cost_pattern()
        .captures(&key)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let key = cost_pattern().replace_all(&key, "").into_owned();
    TalentEntry {
        key,
        span: span.clamp(1, 4),
        custom_cost,
    }
}

impl TalentEntry {
    pub fn resolve_cost(&self, row: usize) -> Cost {
        match self.custom_cost {
            Some(0) => Cost::Suppressed,
            Some(cost) => Cost::Printed(cost),
            None => Cost::Printed((row as u32 + 1) * 5),
        }
    }

    /// Look up header descriptor and body text for the cell at `row`/`col`.
    pub fn into_cell(self, strings: &Strings, row: usize, col: usize) -> Result<TalentCell, Error> {
        let header = header_properties(strings, &self.key)?;
        let body = strings.resolve(&self.key)?.to_string();
        let cost = self.resolve_cost(row);
        Ok(TalentCell {
            row,
            col,
            header,
            body,
            span: self.span,
            cost,
            key: self.key,
        })
    }
}
