mod common;

use serde_json::json;
use talentsheet::sequence::{sequence, sort_key};

fn ids(records: &[talentsheet::SheetRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn character_sheets_lead() {
    let strings = common::strings();
    let input = vec![
        common::record(common::career_value("career")),
        common::record(common::character_value("back", "back")),
        common::record(common::character_value("front", "front")),
        common::record(common::simple_value("simple")),
    ];
    let first = sequence(input.clone(), &strings);
    assert_eq!(ids(&first)[..2], ["front", "back"]);

    let second = sequence(input, &strings);
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn keys() {
    let strings = common::strings();
    let front = common::record(common::character_value("front", "front"));
    assert_eq!(sort_key(&front, &strings), "000");
    let other_side = common::record(common::character_value("back", "anything"));
    assert_eq!(sort_key(&other_side, &strings), "001");

    let career = common::record(common::career_value("career"));
    assert_eq!(sort_key(&career, &strings), "Bounty Hunter Assassin");

    let explicit = common::record(json!({"type": "Force", "id": "sense", "sort": "!first"}));
    assert_eq!(sort_key(&explicit, &strings), "!first");

    let untitled = common::record(json!({"type": "Force", "id": "sense"}));
    assert_eq!(sort_key(&untitled, &strings), "sense");
}

#[test]
fn explicit_keys_never_pass_character_sheets() {
    let strings = common::strings();
    let input = vec![
        common::record(json!({"type": "Force", "id": "early", "sort": "!"})),
        common::record(common::character_value("front", "front")),
    ];
    assert_eq!(ids(&sequence(input, &strings)), ["front", "early"]);
}

#[test]
fn equal_keys_keep_input_order() {
    let strings = common::strings();
    let input: Vec<_> = ["b", "a", "c"]
        .iter()
        .map(|id| common::record(json!({"type": "Simple", "id": id, "sort": "same"})))
        .collect();
    assert_eq!(ids(&sequence(input, &strings)), ["b", "a", "c"]);
}
