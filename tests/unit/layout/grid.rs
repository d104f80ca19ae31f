use super::*;

fn spec(columns: u32) -> GridSpec {
    GridSpec {
        columns,
        cell: Size::new(420, 480),
        padding_x: 10,
        padding_y: 12,
    }
}

#[test]
fn origins_follow_row_major_arithmetic() {
    let grid = GridLayout::new(spec(6), 12).unwrap();
    assert_eq!(grid.origin(0), Some((10, 12)));
    assert_eq!(grid.origin(1), Some((440, 12)));
    assert_eq!(grid.origin(6), Some((10, 504)));
    assert_eq!(grid.origin(11), Some((10 + 5 * 430, 504)));
    assert_eq!(grid.origin(12), None);
    assert_eq!(grid.canvas_size(), Size::new(6 * 420 + 7 * 10, 2 * 480 + 3 * 12));
}

#[test]
fn every_origin_lies_inside_the_canvas() {
    for columns in 1..8u32 {
        for count in 0..40usize {
            let grid = GridLayout::new(spec(columns), count).unwrap();
            assert_eq!(grid.rows() as usize, count.div_ceil(columns as usize));
            let canvas = grid.canvas_size();
            assert_eq!(grid.origins().count(), count);
            for (x, y) in grid.origins() {
                assert!(x < canvas.width && y < canvas.height);
                assert!(x + 420 <= canvas.width && y + 480 <= canvas.height);
            }
        }
    }
}

#[test]
fn items_in_the_same_row_advance_left_to_right() {
    let grid = GridLayout::new(spec(4), 10).unwrap();
    for i1 in 0..10 {
        for i2 in (i1 + 1)..10 {
            if i1 / 4 != i2 / 4 {
                continue;
            }
            let (x1, y1) = grid.origin(i1).unwrap();
            let (x2, y2) = grid.origin(i2).unwrap();
            assert!(x1 < x2);
            assert_eq!(y1, y2);
        }
    }
}

#[test]
fn partial_last_row_sizes_canvas_by_actual_rows() {
    let grid = GridLayout::new(GridSpec::uniform(4, Size::new(500, 500), 80), 5).unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.canvas_size().height, 2 * 500 + 3 * 80);
}

#[test]
fn header_band_shifts_rows_down() {
    let grid = GridLayout::new(GridSpec::uniform(3, Size::new(420, 260), 28), 2)
        .unwrap()
        .with_header(50);
    assert_eq!(grid.origin(0), Some((28, 78)));
    assert_eq!(grid.canvas_size().height, 50 + 260 + 2 * 28);
}

#[test]
fn rejects_zero_columns() {
    assert!(GridLayout::new(spec(0), 3).is_err());
    assert_eq!(rows_for(3, 0), 0);
}

#[test]
fn thirty_six_people_make_three_full_pages() {
    let people: Vec<u32> = (0..36).collect();
    let pages: Vec<&[u32]> = paginate(&people, 6 * 2).collect();
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|p| p.len() == 12));
    assert_eq!(pages[2][11], 35);

    let uneven: Vec<u32> = (0..13).collect();
    let sizes: Vec<usize> = paginate(&uneven, 12).map(<[u32]>::len).collect();
    assert_eq!(sizes, vec![12, 1]);
}
