use std::collections::HashMap;

use crate::error::Error;
use crate::model::SheetRecord;

/// Localization table: key to translated, possibly marked-up string.
#[derive(Clone, Debug, Default)]
pub struct Strings {
    table: HashMap<String, String>,
}

impl Strings {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn resolve(&self, key: &str) -> Result<&str, Error> {
        self.get(key).ok_or_else(|| Error::MissingTranslation {
            key: key.to_string(),
            context: None,
        })
    }

    /// Two-stage lookup: `field` is read from the record, its value is then
    /// translated. Both misses are reported as missing translations; only
    /// the second names `field` as its context.
    pub fn resolve_mapped<'a>(&'a self, record: &'a SheetRecord, field: &str) -> Result<&'a str, Error> {
        let mapped = record.str_field(field).map_err(|_| Error::MissingTranslation {
            key: field.to_string(),
            context: None,
        })?;
        self.get(mapped).ok_or_else(|| Error::MissingTranslation {
            key: mapped.to_string(),
            context: Some(field.to_string()),
        })
    }
}

impl FromIterator<(String, String)> for Strings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

/// Fill `{0}`, `{1}`, ... placeholders. A doubled `''` collapses to one quote.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '{' => {
                let rest = &template[i + 1..];
                let arg = rest
                    .find('}')
                    .and_then(|end| rest[..end].parse::<usize>().ok().map(|n| (n, end)));
                match arg {
                    Some((n, end)) if n < args.len() => {
                        out.push_str(args[n]);
                        // skip digits and closing brace
                        for _ in 0..=end {
                            chars.next();
                        }
                    }
                    _ => out.push(ch),
                }
            }
            '\'' if matches!(chars.peek(), Some((_, '\''))) => {
                chars.next();
                out.push('\'');
            }
            _ => out.push(ch),
        }
    }
    out
}
