use std::cmp::Ordering;

use feruca::Collator;

use super::Page;
use crate::error::Error;
use crate::layout::text::{BlockAlign, ParagraphStyle};
use crate::model::{RunStyle, TextRun};
use crate::strings::format_template;

const SKILLS: ParagraphStyle = ParagraphStyle {
    size: 10.5,
    leading: 13.2,
    narrow: false,
    align: BlockAlign::Justify,
    space_before: 0.0,
    max_width: None,
};

/// Career and bonus skill paragraphs.
pub(super) fn skill_lists(page: &mut Page<'_>) -> Result<(), Error> {
    let mut collator = Collator::default();
    let career = page.localized("CareerSkills")?.to_string();
    skill_paragraph(page, &mut collator, &career, "skills")?;
    let bonus = format_template(page.localized("BonusSkills")?, &[page.mapped("subheader")?]);
    skill_paragraph(page, &mut collator, &bonus, "bonus_skills")
}

fn skill_paragraph(page: &mut Page<'_>, collator: &mut Collator, prefix: &str, field: &str) -> Result<(), Error> {
    let keys = page
        .record
        .field(field)
        .ok_or_else(|| Error::missing_field(page.id(), field))?
        .as_array()
        .ok_or_else(|| Error::layout(page.id(), format!("{field} is not a list")))?;
    let mut skills = keys
        .iter()
        .map(|key| {
            let key = key
                .as_str()
                .ok_or_else(|| Error::layout(page.id(), format!("{field} holds a non-string key")))?;
            page.localized(key)
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_localized(collator, &mut skills);

    let runs = [
        TextRun::new(format!("{prefix}: "), RunStyle::Bold),
        TextRun::new(skills.join(", "), RunStyle::Regular),
    ];
    let max_width = Some(page.config.header_text_max_width);
    page.paragraph(&runs, ParagraphStyle { max_width, ..SKILLS });
    Ok(())
}

/// Locale-aware order, ties broken by code point.
fn sort_localized(collator: &mut Collator, names: &mut [&str]) {
    names.sort_by(|a, b| match collator.collate(*a, *b) {
        Ordering::Equal => a.cmp(b),
        other => other,
    });
}
