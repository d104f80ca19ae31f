use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Size,
    error::{ConfartError, ConfartResult},
};

/// Fixed cell geometry shared by every item of one collage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Cells per row, at least 1.
    pub columns: u32,
    /// Size of every cell.
    pub cell: Size,
    /// Horizontal gap around and between cells.
    pub padding_x: u32,
    /// Vertical gap around and between cells.
    pub padding_y: u32,
}

impl GridSpec {
    /// Grid with the same padding on both axes.
    pub fn uniform(columns: u32, cell: Size, padding: u32) -> Self {
        Self {
            columns,
            cell,
            padding_x: padding,
            padding_y: padding,
        }
    }
}

/// Cell placement for `item_count` items.
///
/// Item `i` sits in row `i / columns`, column `i % columns`, with its cell origin at
/// `(padding_x + col * (cell_w + padding_x), top + padding_y + row * (cell_h + padding_y))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    spec: GridSpec,
    item_count: usize,
    top: u32,
}

impl GridLayout {
    pub fn new(spec: GridSpec, item_count: usize) -> ConfartResult<Self> {
        if spec.columns == 0 {
            return Err(ConfartError::validation("grid column count must be >= 1"));
        }
        if spec.cell.is_empty() {
            return Err(ConfartError::validation("grid cell size must be non-zero"));
        }
        Ok(Self {
            spec,
            item_count,
            top: 0,
        })
    }

    /// Reserve a header band of `top` pixels above the first row.
    pub fn with_header(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn rows(&self) -> u32 {
        rows_for(self.item_count, self.spec.columns)
    }

    /// Canvas exactly containing all columns and the rows actually used.
    pub fn canvas_size(&self) -> Size {
        let GridSpec {
            columns,
            cell,
            padding_x,
            padding_y,
        } = self.spec;
        let rows = self.rows();
        Size::new(
            columns * cell.width + (columns + 1) * padding_x,
            self.top + rows * cell.height + (rows + 1) * padding_y,
        )
    }

    /// Top-left pixel of item `index`, or `None` past the last item.
    pub fn origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.item_count {
            return None;
        }
        let cols = self.spec.columns as usize;
        let row = (index / cols) as u32;
        let col = (index % cols) as u32;
        let x = self.spec.padding_x + col * (self.spec.cell.width + self.spec.padding_x);
        let y =
            self.top + self.spec.padding_y + row * (self.spec.cell.height + self.spec.padding_y);
        Some((x, y))
    }

    /// Origins of all items in index order.
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.item_count).filter_map(|i| self.origin(i))
    }
}

/// `ceil(item_count / columns)`; zero columns yields zero rows.
pub fn rows_for(item_count: usize, columns: u32) -> u32 {
    if columns == 0 {
        return 0;
    }
    item_count.div_ceil(columns as usize) as u32
}

/// Split `items` into consecutive pages of at most `per_page` items.
pub fn paginate<T>(items: &[T], per_page: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(per_page.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
