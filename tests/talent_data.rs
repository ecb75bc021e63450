mod common;

use talentsheet::Error;
use talentsheet::model::Cost;
use talentsheet::talent::{header_properties, parse_entry, parse_header};

#[test]
fn header_fields_are_parsed() {
    let header = parse_header("GritData", "Grit|p.139|a|Rxyz|extra").unwrap();
    assert_eq!(header.title, "Grit");
    assert_eq!(header.page, "p.139");
    assert!(header.active);
    assert_eq!(header.status, 'R');
    assert!(header.is_ranked());
    assert!(!header.is_two_line());
}

#[test]
fn anything_but_a_is_passive() {
    for flag in ["P", "", "active", "AA"] {
        let header = parse_header("k", &format!("T|1|{flag}|N")).unwrap();
        assert!(!header.active, "flag {flag:?}");
        assert!(!header.is_ranked());
    }
}

#[test]
fn short_descriptor_names_key_and_line() {
    let err = parse_header("BrokenData", "Title|p.1|A").unwrap_err();
    match &err {
        Error::MalformedHeaderData { key, line } => {
            assert_eq!(key, "BrokenData");
            assert_eq!(line, "Title|p.1|A");
        }
        other => panic!("unexpected error {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("BrokenData") && message.contains("Title|p.1|A"));

    assert!(parse_header("EmptyStatus", "Title|p.1|A|").is_err());
}

#[test]
fn descriptor_is_read_from_data_key() {
    let strings = common::strings();
    let header = header_properties(&strings, "QuickDraw").unwrap();
    assert_eq!(header.title, "Quick\nDraw");
    assert!(header.is_two_line());
    assert!(header.active);

    let err = header_properties(&strings, "Unknown").unwrap_err();
    assert!(matches!(err, Error::MissingTranslation { ref key, .. } if key == "UnknownData"));
}

#[test]
fn entry_directives() {
    let plain = parse_entry("Grit");
    assert_eq!((plain.key.as_str(), plain.span, plain.custom_cost), ("Grit", 1, None));

    let wide = parse_entry("Grit*3");
    assert_eq!((wide.key.as_str(), wide.span), ("Grit", 3));

    let both = parse_entry("Grit*2|25");
    assert_eq!((both.key.as_str(), both.span, both.custom_cost), ("Grit", 2, Some(25)));

    let free = parse_entry("Grit|0");
    assert_eq!(free.custom_cost, Some(0));
}

#[test]
fn out_of_range_span_is_not_a_directive() {
    let entry = parse_entry("Grit*7");
    assert_eq!(entry.span, 1);
    assert_eq!(entry.key, "Grit*7");
}

#[test]
fn costs() {
    assert_eq!(parse_entry("Grit").resolve_cost(0), Cost::Printed(5));
    assert_eq!(parse_entry("Grit").resolve_cost(4), Cost::Printed(25));
    assert_eq!(parse_entry("Grit|15").resolve_cost(0), Cost::Printed(15));
    assert_eq!(parse_entry("Grit|0").resolve_cost(3), Cost::Suppressed);
}

#[test]
fn cell_resolution() {
    let strings = common::strings();
    let cell = parse_entry("Toughened*2|10").into_cell(&strings, 1, 2).unwrap();
    assert_eq!(cell.key, "Toughened");
    assert_eq!((cell.row, cell.col, cell.span), (1, 2, 2));
    assert_eq!(cell.cost, Cost::Printed(10));
    assert_eq!(cell.body, "Gain +2 wound threshold.");
    assert_eq!(cell.header.title, "Toughened");

    let err = parse_entry("Missing").into_cell(&strings, 0, 0).unwrap_err();
    assert!(matches!(err, Error::MissingTranslation { .. }));
}
