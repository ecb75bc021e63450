mod common;

use common::close;
use talentsheet::config::{PageSize, SheetConfig};
use talentsheet::layout::{Grid, Orientation};

#[test]
fn first_column_starts_at_left_margin() {
    for size in [PageSize::A4, PageSize::Letter] {
        let config = SheetConfig::new(size);
        let grid = Grid::new(&config);
        assert!(close(grid.col_offset(0), config.left_x()));
    }
}

#[test]
fn four_column_span_fills_usable_width() {
    for size in [PageSize::A4, PageSize::Letter] {
        let config = SheetConfig::new(size);
        let grid = Grid::new(&config);
        assert!(close(grid.span_width(4), config.usable_width()));
        assert!(close(grid.span_width(1), config.talent_box_width));
        assert!(close(grid.span_width(9), grid.span_width(4)));
        assert!(close(grid.span_width(0), grid.span_width(1)));
    }
}

#[test]
fn offsets_are_monotonic() {
    let config = SheetConfig::default();
    let grid = Grid::new(&config);
    for col in 0..4 {
        assert!(grid.col_offset(col + 1) > grid.col_offset(col));
    }
    for row in -1..5 {
        assert!(grid.row_offset(row + 1) < grid.row_offset(row));
    }
}

#[test]
fn a4_reference_positions() {
    let config = SheetConfig::new(PageSize::A4);
    let grid = Grid::new(&config);
    assert!(close(grid.horizontal_spacing(), 55.0 / 3.0));
    assert!(close(grid.row_offset(0), 723.0));
    assert!(close(grid.row_offset(5), 33.0));
}

#[test]
fn shifted_grid_moves_rows_only() {
    let config = SheetConfig::default();
    let plain = Grid::new(&config);
    let shifted = Grid::shifted(&config, config.signature_row_shift);
    assert!(close(plain.row_offset(2) - shifted.row_offset(2), 50.0));
    assert!(close(plain.col_offset(3), shifted.col_offset(3)));
}

#[test]
fn connectors() {
    assert_eq!(Orientation::of_path_row(0), Orientation::Horizontal);
    assert_eq!(Orientation::of_path_row(3), Orientation::Vertical);

    let config = SheetConfig::new(PageSize::A4);
    let grid = Grid::new(&config);

    let horizontal = grid.connector(0, 0);
    assert!(close(horizontal.from.0, 157.0));
    assert!(close(horizontal.from.1, 658.0));
    assert!(close(horizontal.to.0, 157.0 + 55.0 / 3.0 + 4.0));
    assert!(close(horizontal.to.1, horizontal.from.1));

    let vertical = grid.connector(1, 1);
    let x = 48.0 + 111.0 + 55.0 / 3.0 + 55.5 - 2.0;
    assert!(close(vertical.from.0, x) && close(vertical.to.0, x));
    assert!(close(vertical.from.1, 605.0));
    assert!(close(vertical.to.1, 583.0));
}

#[test]
fn signature_node_sits_above_first_row() {
    let config = SheetConfig::default();
    let grid = Grid::shifted(&config, config.signature_row_shift);
    let node = grid.signature_node(0);
    assert!(node.stem.from.1 > grid.row_offset(0));
    assert!(node.bracket.iter().all(|&(_, y)| y >= node.stem.from.1));
}

#[test]
fn narrow_page_is_rejected() {
    let mut config = SheetConfig::default();
    config.page_width = 400.0;
    assert!(config.validate().is_err());
    assert!(SheetConfig::new(PageSize::Letter).validate().is_ok());
}
