use talentsheet::FontBook;
use talentsheet::layout::TextFitter;
use talentsheet::layout::text::{CELL_PADDING, break_lines};
use talentsheet::markup;

const SIZES: [f32; 3] = [9.0, 8.5, 7.5];

#[test]
fn short_text_keeps_largest_size() {
    let fonts = FontBook::builtin();
    let fitter = TextFitter::new(&fonts, &SIZES, 16.0);
    let fitted = fitter.fit("Gain |*+1 |strain threshold.", 105.0, 90.0);
    assert_eq!(fitted.font_size, 9.0);
    assert!(!fitted.overflow);
    assert!(fitted.block.height() + 2.0 * CELL_PADDING <= 90.0 - 16.0);
}

#[test]
fn overlong_text_takes_smallest_size_and_overflows() {
    let fonts = FontBook::builtin();
    let fitter = TextFitter::new(&fonts, &SIZES, 16.0);
    let text = "Add a setback die to every check. ".repeat(30);
    let fitted = fitter.fit(&text, 105.0, 90.0);
    assert_eq!(fitted.font_size, 7.5);
    assert!(fitted.overflow);
}

#[test]
fn fit_picks_first_size_that_fits() {
    let fonts = FontBook::builtin();
    let fitter = TextFitter::new(&fonts, &SIZES, 0.0);
    let text = "Once per session, take a free maneuver and heal strain equal to ranks. ".repeat(3);
    let runs = markup::parse(&text);
    let at_9 = fitter.measure(&runs, 9.0, 105.0);
    let at_8_5 = fitter.measure(&runs, 8.5, 105.0);
    assert!(at_8_5 < at_9);
    let fitted = fitter.fit(&text, 105.0, (at_9 + at_8_5) / 2.0);
    assert_eq!(fitted.font_size, 8.5);
    assert!(!fitted.overflow);
}

#[test]
fn lines_respect_width_and_breaks() {
    let fonts = FontBook::builtin();
    let runs = markup::parse("alpha beta gamma delta epsilon zeta eta theta\nnext");
    let lines = break_lines(&runs, &fonts, 10.0, false, 80.0);
    assert!(lines.len() > 2);
    for line in &lines {
        assert!(line.width <= 80.0 || line.words == 1);
    }
    let last = lines.last().unwrap();
    assert_eq!(last.chunks.len(), 1);
    assert_eq!(last.chunks[0].text, "next");
}

#[test]
fn words_stay_whole_across_runs() {
    let fonts = FontBook::builtin();
    let runs = markup::parse("|*Brawn|: soak");
    let lines = break_lines(&runs, &fonts, 9.0, true, 500.0);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].words, 2);
    assert_eq!(lines[0].chunks[0].word, lines[0].chunks[1].word);
}
