//! Loaders for the record file and the localization file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::model::SheetRecord;
use crate::strings::Strings;

/// Read sheet records. `.json` files hold one array; anything else is read
/// as a YAML document stream.
pub fn load_records(path: &Path) -> Result<Vec<SheetRecord>, Error> {
    let text = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_records(&text)
    } else {
        parse_record_stream(&text)
    }
}

/// One record per YAML document. A document holding a list contributes each
/// entry; empty documents are skipped.
pub fn parse_record_stream(text: &str) -> Result<Vec<SheetRecord>, Error> {
    let mut records = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        match Value::deserialize(document)? {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    records.push(SheetRecord::from_value(item)?);
                }
            }
            other => records.push(SheetRecord::from_value(other)?),
        }
    }
    Ok(records)
}

pub fn parse_records(text: &str) -> Result<Vec<SheetRecord>, Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items.into_iter().map(SheetRecord::from_value).collect(),
        other => Err(Error::InvalidInput(format!(
            "record file must hold a list of sheets, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// `strings_<language>.txt` in `dir`, else `strings_en.txt`.
pub fn locate_strings(dir: &Path, language: &str) -> Result<PathBuf, Error> {
    [format!("strings_{language}.txt"), "strings_en.txt".to_string()]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "neither strings_{language}.txt nor strings_en.txt found in {}",
                dir.display()
            ))
        })
}

/// Language of the current locale (`LC_ALL`, `LC_MESSAGES`, `LANG`), `en`
/// when none names one.
pub fn system_language() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| language_code(&value))
        .unwrap_or_else(|| "en".to_string())
}

/// `de_DE.UTF-8` -> `de`. The `C` and `POSIX` locales name no language.
pub fn language_code(locale: &str) -> Option<String> {
    let code = locale.split(['_', '-', '.', '@']).next()?;
    if code.is_empty() || code == "C" || code == "POSIX" {
        return None;
    }
    Some(code.to_ascii_lowercase())
}

/// Read a UTF-8 `.properties` file.
pub fn load_strings(path: &Path) -> Result<Strings, Error> {
    let text = fs::read_to_string(path)?;
    parse_properties(&text)
}

/// Parse `.properties` text: `key=value`, `key: value` or `key value`
/// pairs, `#`/`!` comments, backslash continuations and escapes.
pub fn parse_properties(text: &str) -> Result<Strings, Error> {
    let mut pairs = Vec::new();
    let mut lines = text.lines().enumerate();
    while let Some((number, line)) = lines.next() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut logical = String::from(line);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        let (key, value) = split_pair(&logical);
        let key = unescape(key).map_err(|e| Error::InvalidInput(format!("line {}: {e}", number + 1)))?;
        let value = unescape(value).map_err(|e| Error::InvalidInput(format!("line {}: {e}", number + 1)))?;
        pairs.push((key, value));
    }
    Ok(pairs.into_iter().collect())
}

/// An odd number of trailing backslashes joins the next line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }
    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map(|r| r.trim_start_matches([' ', '\t', '\u{c}']))
        .unwrap_or(rest);
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .ok_or_else(|| format!("malformed \\u escape `\\u{hex}`"))?;
                // surrogates are replaced rather than paired
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
