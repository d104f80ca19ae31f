use super::*;

const CELL: Size = Size::new(420, 260);
const PAD: u32 = 28;
const LABEL: u32 = 42;

#[test]
fn short_row_is_centred_not_left_aligned() {
    let layout = layout_tiers(&[(7, 4)], CELL, PAD, LABEL).unwrap();
    let tier = &layout.tiers[0];
    assert_eq!(tier.rows, 2);
    assert_eq!(tier.origins.len(), 7);

    let first_row = &tier.origins[..4];
    let second_row = &tier.origins[4..];
    assert_eq!(first_row[0].0, PAD);
    assert!(second_row[0].0 > first_row[0].0);

    let left = second_row[0].0;
    let right = layout.canvas.width - (second_row[2].0 + CELL.width);
    assert!(left.abs_diff(right) <= 1, "left {left} right {right}");
    assert!(second_row.iter().all(|&(_, y)| y == second_row[0].1));
    assert_eq!(second_row[0].1, first_row[0].1 + CELL.height + PAD);
}

#[test]
fn canvas_width_comes_from_widest_tier() {
    let layout = layout_tiers(&[(7, 4), (2, 3), (3, 3)], CELL, PAD, LABEL).unwrap();
    assert_eq!(layout.canvas.width, 4 * 420 + 5 * 28);

    let silver = &layout.tiers[1];
    let left = silver.origins[0].0;
    let right = layout.canvas.width - (silver.origins[1].0 + CELL.width);
    assert!(left.abs_diff(right) <= 1);
}

#[test]
fn tiers_stack_without_overlap_and_fit_the_canvas() {
    let layout = layout_tiers(&[(7, 4), (2, 3), (3, 3)], CELL, PAD, LABEL).unwrap();
    let mut previous_bottom = 0;
    for tier in &layout.tiers {
        assert!(tier.label_y >= previous_bottom);
        for &(x, y) in &tier.origins {
            assert!(y >= tier.label_y + LABEL);
            assert!(x + CELL.width <= layout.canvas.width);
            assert!(y + CELL.height <= layout.canvas.height);
            previous_bottom = previous_bottom.max(y + CELL.height);
        }
    }
}

#[test]
fn empty_tier_still_reserves_its_label() {
    let layout = layout_tiers(&[(0, 3)], CELL, PAD, LABEL).unwrap();
    assert_eq!(layout.tiers[0].rows, 0);
    assert!(layout.tiers[0].origins.is_empty());
    assert_eq!(layout.canvas.height, PAD + LABEL + PAD);
}

#[test]
fn zero_columns_is_rejected() {
    assert!(layout_tiers(&[(3, 0)], CELL, PAD, LABEL).is_err());
}
