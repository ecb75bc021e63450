mod common;

use serde_json::json;
use talentsheet::Error;
use talentsheet::input::{parse_properties, parse_records};
use talentsheet::model::Variant;
use talentsheet::strings::format_template;

#[test]
fn missing_key_is_named() {
    let strings = common::strings();
    assert_eq!(strings.resolve("Cost").unwrap(), "Cost");
    let err = strings.resolve("NoSuchKey").unwrap_err();
    assert!(err.to_string().contains("NoSuchKey"));
}

#[test]
fn mapped_lookup_goes_through_record() {
    let strings = common::strings();
    let record = common::record(common::simple_value("assassin"));
    assert_eq!(strings.resolve_mapped(&record, "header").unwrap(), "Bounty Hunter");

    let err = strings.resolve_mapped(&record, "nonexistent").unwrap_err();
    assert!(matches!(err, Error::MissingTranslation { ref key, context: None } if key == "nonexistent"));
    assert_eq!(err.to_string(), "no translation for `nonexistent`");

    let untranslated = common::record(json!({
        "type": "Simple",
        "id": "x",
        "header": "Untranslated"
    }));
    let err = strings.resolve_mapped(&untranslated, "header").unwrap_err();
    assert_eq!(err.to_string(), "no translation for `Untranslated` in key `header`");
}

#[test]
fn templates() {
    assert_eq!(format_template("{0} Bonus Career Skills", &["Assassin"]), "Assassin Bonus Career Skills");
    assert_eq!(format_template("{1}/{0}", &["a", "b"]), "b/a");
    assert_eq!(format_template("It''s {2}", &["a"]), "It's {2}");
}

#[test]
fn properties_file() {
    let text = r"
# comment
! another comment
Cost=Kosten
Spaced : value with spaces
Bare value
Multi=first \
      second
Escaped=Line\nBreak\té
key\=with\:separators=ok
Empty=
";
    let strings = parse_properties(text).unwrap();
    assert_eq!(strings.get("Cost"), Some("Kosten"));
    assert_eq!(strings.get("Spaced"), Some("value with spaces"));
    assert_eq!(strings.get("Bare"), Some("value"));
    assert_eq!(strings.get("Multi"), Some("first second"));
    assert_eq!(strings.get("Escaped"), Some("Line\nBreak\té"));
    assert_eq!(strings.get("key=with:separators"), Some("ok"));
    assert_eq!(strings.get("Empty"), Some(""));
    assert_eq!(strings.len(), 7);
}

#[test]
fn malformed_unicode_escape() {
    let err = parse_properties("Bad=\\u12").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn record_file() {
    let records = parse_records(
        r#"[
            {"type": "Career", "id": "a"},
            {"type": "de.beimax.talenttree.PageGeneratorSignature", "id": "b"},
            {"type": "charactersheet", "id": "c", "page": "front"}
        ]"#,
    )
    .unwrap();
    let variants: Vec<Variant> = records.iter().map(|r| r.variant).collect();
    assert_eq!(variants, [Variant::Career, Variant::Signature, Variant::CharacterSheet]);
}

#[test]
fn record_file_errors() {
    assert!(matches!(parse_records(r#"{"type": "Career"}"#), Err(Error::InvalidInput(_))));
    assert!(matches!(parse_records(r#"[{"id": "a"}]"#), Err(Error::InvalidInput(_))));
    assert!(matches!(
        parse_records(r#"[{"type": "Poster", "id": "a"}]"#),
        Err(Error::UnsupportedVariant { ref tag }) if tag == "Poster"
    ));
    assert!(matches!(
        parse_records(r#"[{"type": "Force"}]"#),
        Err(Error::MissingField { ref field, .. }) if field == "id"
    ));
    assert!(matches!(parse_records("[1, 2"), Err(Error::Json(_))));
}
