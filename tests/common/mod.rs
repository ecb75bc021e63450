#![allow(dead_code)]

use serde_json::{Value, json};
use talentsheet::canvas::{Align, DrawOp, Recorder};
use talentsheet::fonts::Typeface;
use talentsheet::sheet::{self, Context};
use talentsheet::{Error, FontBook, SheetConfig, SheetRecord, Strings};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Localization table covering every key the sample records touch.
pub fn strings() -> Strings {
    [
        ("copyright", "© Fantasy Flight Games"),
        ("version", "1.0"),
        ("date", "2024-01-01"),
        ("game", "Edge of the Empire"),
        ("link", "example.org"),
        ("Active", "Active"),
        ("Passive", "Passive"),
        ("Ranked", "Ranked"),
        ("BaseAbility", "Base Ability"),
        ("Upgrade", "Upgrade"),
        ("ForcePowerWedge", "Force Power"),
        ("Cost", "Cost"),
        ("CareerSkills", "Career Skills"),
        ("BonusSkills", "{0} Bonus Career Skills"),
        ("Bounty", "Bounty Hunter"),
        ("Assassin", "Assassin"),
        ("Sense", "Sense"),
        ("Athletics", "Athletics"),
        ("Brawl", "Brawl"),
        ("Perception", "Perception"),
        ("Vigilance", "Vigilance"),
        ("Stealth", "Stealth"),
        ("Grit", "Gain |*+1 strain threshold|."),
        ("GritData", "Grit|p.139|P|R"),
        ("Toughened", "Gain +2 wound threshold."),
        ("ToughenedData", "Toughened|p.146|P|R"),
        ("QuickDraw", "Once per round, draw or holster a weapon as an incidental."),
        ("QuickDrawData", "Quick\nDraw|p.145|A|N"),
        ("Dedication", "Gain +1 to a single characteristic."),
        ("DedicationData", "Dedication|p.137|P|N"),
        ("Brawn", "Brawn"),
        ("Agility", "Agility"),
        ("Intellect", "Intellect"),
        ("Cunning", "Cunning"),
        ("Willpower", "Willpower"),
        ("Presence", "Presence"),
        ("PDFTitle", "Talent Trees"),
        ("Aerztliche", "Ärztliche Hilfe"),
        ("Athletik", "Athletik"),
        ("Oeffnen", "Öffnen"),
        ("Ueberleben", "Überleben"),
        ("Zielen", "Zielen"),
        ("HunterIntro", "Bounty hunters track down their quarry for the reward. |*Grit| and patience are the tools of a trade that spans every sector of the galaxy, from the Core Worlds to the Outer Rim and the lawless spaces between them."),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn record(value: Value) -> SheetRecord {
    SheetRecord::from_value(value).expect("valid record")
}

pub fn simple_value(id: &str) -> Value {
    json!({
        "type": "Simple",
        "id": id,
        "header": "Bounty",
        "subheader": "Assassin",
        "talents": [
            ["Grit", "Toughened", "QuickDraw", "Grit"],
            ["Toughened*2", "Dedication|0", "Grit"]
        ],
        "talent_paths": [
            [1, 0, 1],
            [1, 0, 0, 1]
        ]
    })
}

pub fn career_value(id: &str) -> Value {
    json!({
        "type": "Career",
        "id": id,
        "header": "Bounty",
        "subheader": "Assassin",
        "skills": ["Vigilance", "Athletics", "Perception"],
        "bonus_skills": ["Stealth", "Brawl"],
        "talents": [["Grit", "Toughened", "QuickDraw", "Dedication"]],
        "talent_paths": [[1, 1, 1]]
    })
}

pub fn character_value(id: &str, side: &str) -> Value {
    json!({ "type": "CharacterSheet", "id": id, "page": side })
}

/// Draw one record with default settings into a fresh recorder.
pub fn draw(record: &SheetRecord, strings: &Strings) -> Result<Recorder, Error> {
    let fonts = FontBook::builtin();
    let config = SheetConfig::default();
    let ctx = Context {
        strings,
        fonts: &fonts,
        config: &config,
    };
    let mut recorder = Recorder::new();
    sheet::generate(record, ctx, &mut recorder)?;
    Ok(recorder)
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("talentsheet-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// A shown string with the font it was shown in.
#[derive(Clone, Debug)]
pub struct Shown<'a> {
    pub face: Typeface,
    pub size: f32,
    pub align: Align,
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
}

impl Shown<'_> {
    pub fn right_edge(&self) -> f32 {
        self.x + FontBook::builtin().text_width(self.face, self.size, self.text)
    }
}

pub fn shown(recorder: &Recorder) -> Vec<Shown<'_>> {
    let mut font = None;
    let mut out = Vec::new();
    for op in recorder.ops() {
        match op {
            DrawOp::Font(face, size) => font = Some((*face, *size)),
            DrawOp::Text { align, text, x, y } => {
                let (face, size) = font.expect("font set before text");
                out.push(Shown {
                    face,
                    size,
                    align: *align,
                    text: text.as_str(),
                    x: *x,
                    y: *y,
                });
            }
            _ => {}
        }
    }
    out
}

pub fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

pub fn has_segment(segments: &[((f32, f32), (f32, f32))], from: (f32, f32), to: (f32, f32)) -> bool {
    segments.iter().any(|&(f, t)| {
        close(f.0, from.0) && close(f.1, from.1) && close(t.0, to.0) && close(t.1, to.1)
    })
}
