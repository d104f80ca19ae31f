use crate::{
    foundation::{
        core::Size,
        error::{ConfartError, ConfartResult},
    },
    layout::grid::rows_for,
};

/// Where one tier's label and items land on the combined canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierPlacement {
    /// Top of the tier label line.
    pub label_y: u32,
    /// Cell origins of the tier's items, in item order.
    pub origins: Vec<(u32, u32)>,
    /// Rows the tier occupies.
    pub rows: u32,
}

/// Stacked multi-tier layout sharing one canvas width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TieredLayout {
    pub canvas: Size,
    pub tiers: Vec<TierPlacement>,
}

/// Lay out tiers top to bottom.
///
/// `tiers` holds `(item_count, columns)` per tier. The canvas is as wide as the tier with the
/// most columns; every row of every tier is centred on that width on its own, so a short last
/// row is centred rather than left-aligned. Each tier block is
/// `padding + label_height + rows * cell_h + (rows + 1) * padding` tall.
pub fn layout_tiers(
    tiers: &[(usize, u32)],
    cell: Size,
    padding: u32,
    label_height: u32,
) -> ConfartResult<TieredLayout> {
    if tiers.iter().any(|&(_, cols)| cols == 0) {
        return Err(ConfartError::validation("tier column count must be >= 1"));
    }
    let max_cols = tiers.iter().map(|&(_, cols)| cols).max().unwrap_or(1);
    let total_width = row_width(max_cols, cell.width, padding);

    let mut placements = Vec::with_capacity(tiers.len());
    let mut cursor = 0u32;
    for &(count, columns) in tiers {
        let label_y = cursor + padding;
        cursor += padding + label_height;

        let rows = rows_for(count, columns);
        let mut origins = Vec::with_capacity(count);
        for row in 0..rows {
            let start = (row * columns) as usize;
            let in_row = (count - start).min(columns as usize) as u32;
            let x_offset = total_width.saturating_sub(row_width(in_row, cell.width, padding)) / 2;
            let y = cursor + row * (cell.height + padding);
            for col in 0..in_row {
                origins.push((x_offset + padding + col * (cell.width + padding), y));
            }
        }
        cursor += rows * cell.height + (rows + 1) * padding;

        placements.push(TierPlacement {
            label_y,
            origins,
            rows,
        });
    }

    Ok(TieredLayout {
        canvas: Size::new(total_width, cursor),
        tiers: placements,
    })
}

fn row_width(items: u32, cell_w: u32, padding: u32) -> u32 {
    items * cell_w + (items + 1) * padding
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tiers.rs"]
mod tests;
