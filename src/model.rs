use serde_json::{Map, Value};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Simple,
    Career,
    Signature,
    Force,
    CharacterSheet,
}

impl Variant {
    /// Resolve a record's `type` tag. Accepts the bare name (`Career`) as well
    /// as qualified generator names ending in `PageGenerator<Name>`.
    pub fn from_tag(tag: &str) -> Result<Self, Error> {
        let name = tag.rsplit('.').next().unwrap_or(tag);
        let name = name.strip_prefix("PageGenerator").unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "simple" => Ok(Variant::Simple),
            "career" => Ok(Variant::Career),
            "signature" => Ok(Variant::Signature),
            "force" => Ok(Variant::Force),
            "charactersheet" => Ok(Variant::CharacterSheet),
            _ => Err(Error::UnsupportedVariant {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Simple => "Simple",
            Variant::Career => "Career",
            Variant::Signature => "Signature",
            Variant::Force => "Force",
            Variant::CharacterSheet => "CharacterSheet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterSide {
    Front,
    /// Layout not implemented yet; renders an empty page.
    Back,
}

/// One page's declarative content, as produced by the record loader.
#[derive(Clone, Debug)]
pub struct SheetRecord {
    pub variant: Variant,
    pub id: String,
    pub fields: Map<String, Value>,
}

impl SheetRecord {
    pub fn new(variant: Variant, id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            variant,
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a loaded object carrying `type` and `id` keys.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(fields) = value else {
            return Err(Error::InvalidInput(format!(
                "sheet record is not an object: {value}"
            )));
        };
        let tag = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "the following data contained no type: {}",
                    Value::Object(fields.clone())
                ))
            })?;
        let variant = Variant::from_tag(tag)?;
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_field(tag, "id"))?
            .to_string();
        Ok(Self {
            variant,
            id,
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Result<&str, Error> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_field(&self.id, name))
    }

    pub fn character_side(&self) -> CharacterSide {
        match self.fields.get("page").and_then(Value::as_str) {
            Some("front") => CharacterSide::Front,
            _ => CharacterSide::Back,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStyle {
    Regular,
    Bold,
    Symbol,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderProperties {
    /// May contain a `\n` splitting the title over two lines.
    pub title: String,
    pub page: String,
    pub active: bool,
    pub status: char,
}

impl HeaderProperties {
    pub fn is_ranked(&self) -> bool {
        self.status == 'R'
    }

    pub fn is_two_line(&self) -> bool {
        self.title.contains('\n')
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cost {
    Printed(u32),
    Suppressed,
}

#[derive(Clone, Debug)]
pub struct TalentCell {
    pub row: usize,
    pub col: usize,
    pub key: String,
    pub header: HeaderProperties,
    pub body: String,
    pub span: usize,
    pub cost: Cost,
}
