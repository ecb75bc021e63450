mod common;

use std::fs;

use talentsheet::input::{language_code, load_records, locate_strings, parse_record_stream};
use talentsheet::model::Variant;
use talentsheet::{Error, Job, PageSize, generate_talent_trees};

const STREAM: &str = "\
type: de.beimax.talenttree.PageGeneratorSimple
id: assassin
header: Bounty
subheader: Assassin
talents:
  - [Grit, Toughened*2]
talent_paths:
  - [1]
---
type: de.beimax.talenttree.PageGeneratorCharacterSheet
id: front
page: front
";

#[test]
fn yaml_stream_holds_one_record_per_document() {
    let records = parse_record_stream(STREAM).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].variant, Variant::Simple);
    assert_eq!(records[0].id, "assassin");
    assert_eq!(records[0].str_field("header").unwrap(), "Bounty");
    assert_eq!(records[1].variant, Variant::CharacterSheet);
}

#[test]
fn yaml_list_document_and_errors() {
    let records = parse_record_stream("- {type: Career, id: a}\n- {type: Force, id: b}\n").unwrap();
    let variants: Vec<Variant> = records.iter().map(|r| r.variant).collect();
    assert_eq!(variants, [Variant::Career, Variant::Force]);

    assert!(matches!(parse_record_stream("id: untyped\n"), Err(Error::InvalidInput(_))));
    assert!(matches!(parse_record_stream("type: [unclosed\n"), Err(Error::Yaml(_))));
}

#[test]
fn record_format_follows_extension() {
    let dir = common::scratch_dir("records");
    let json = dir.join("data.json");
    fs::write(&json, r#"[{"type": "Career", "id": "a"}]"#).unwrap();
    let yaml = dir.join("data.yaml");
    fs::write(&yaml, STREAM).unwrap();

    assert_eq!(load_records(&json).unwrap().len(), 1);
    assert_eq!(load_records(&yaml).unwrap().len(), 2);
}

#[test]
fn strings_file_falls_back_to_english() {
    let dir = common::scratch_dir("lookup");
    assert!(matches!(locate_strings(&dir, "de"), Err(Error::InvalidInput(_))));

    fs::write(dir.join("strings_en.txt"), "Cost=Cost\n").unwrap();
    fs::write(dir.join("strings_de.txt"), "Cost=Kosten\n").unwrap();
    assert_eq!(locate_strings(&dir, "de").unwrap(), dir.join("strings_de.txt"));
    assert_eq!(locate_strings(&dir, "fr").unwrap(), dir.join("strings_en.txt"));
}

#[test]
fn locale_names_reduce_to_language() {
    assert_eq!(language_code("de_DE.UTF-8").as_deref(), Some("de"));
    assert_eq!(language_code("en-US").as_deref(), Some("en"));
    assert_eq!(language_code("FR").as_deref(), Some("fr"));
    assert_eq!(language_code("C.UTF-8"), None);
    assert_eq!(language_code("POSIX"), None);
    assert_eq!(language_code(""), None);
}

#[test]
fn job_reads_strings_next_to_data() {
    common::init_logging();
    let dir = common::scratch_dir("job");
    fs::write(
        dir.join("data.yaml"),
        "type: CharacterSheet\nid: front\npage: front\n",
    )
    .unwrap();
    fs::write(
        dir.join("strings_en.txt"),
        "Brawn=Brawn\nAgility=Agility\nIntellect=Intellect\nCunning=Cunning\n\
         Willpower=Willpower\nPresence=Presence\nPDFTitle=Talent Trees\n",
    )
    .unwrap();
    let data = dir.join("data.yaml");
    let output = dir.join("sheets.pdf");
    let job = Job {
        data: &data,
        strings: None,
        language: Some("sv"),
        fonts: None,
        page_size: PageSize::A4,
        output: Some(&output),
    };

    let written = generate_talent_trees(&job).unwrap();
    assert_eq!(written, output);
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn job_without_strings_fails() {
    let dir = common::scratch_dir("nostrings");
    let data = dir.join("data.yaml");
    fs::write(&data, "type: CharacterSheet\nid: front\npage: front\n").unwrap();
    let output = dir.join("never.pdf");
    let job = Job {
        data: &data,
        strings: None,
        language: Some("en"),
        fonts: None,
        page_size: PageSize::A4,
        output: Some(&output),
    };
    assert!(matches!(generate_talent_trees(&job), Err(Error::InvalidInput(_))));
    assert!(!output.exists());
}
