//! Page ordering.

use serde_json::Value;

use crate::model::{CharacterSide, SheetRecord, Variant};
use crate::strings::Strings;

/// Key a record sorts by. Character sheets always get fixed keys; other
/// records use an explicit `sort` field, then their localized title, then
/// their id.
pub fn sort_key(record: &SheetRecord, strings: &Strings) -> String {
    if record.variant == Variant::CharacterSheet {
        return match record.character_side() {
            CharacterSide::Front => "000",
            CharacterSide::Back => "001",
        }
        .to_string();
    }
    if let Some(key) = record.field("sort").and_then(Value::as_str) {
        return key.to_string();
    }
    match (
        strings.resolve_mapped(record, "header"),
        strings.resolve_mapped(record, "subheader"),
    ) {
        (Ok(header), Ok(subheader)) => format!("{header} {subheader}"),
        _ => record.id.clone(),
    }
}

/// Stable sort of all records. Character sheets lead regardless of what
/// other keys look like.
pub fn sequence(mut records: Vec<SheetRecord>, strings: &Strings) -> Vec<SheetRecord> {
    records.sort_by_cached_key(|record| (record.variant != Variant::CharacterSheet, sort_key(record, strings)));
    records
}
