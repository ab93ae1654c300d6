use crate::games::SessionRng;
use super::settings::{GridMode, MIN_GRID_CELLS};
use super::types::Cell;

pub const DEFAULT_VIEWPORT_PX: (u32, u32) = (600, 600);

fn cell_count(cells: u32, min: u32) -> i32 {
    i32::try_from(cells.max(min)).unwrap_or(i32::MAX)
}

/// Supplies the current grid dimensions in cells.
pub trait BoundsProvider: Send {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Called when the host surface changes size. Fixed grids ignore it.
    fn resize_viewport(&mut self, _width_px: u32, _height_px: u32) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedGrid {
    width: i32,
    height: i32,
}

impl FixedGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: cell_count(width, 1),
            height: cell_count(height, 1),
        }
    }
}

impl BoundsProvider for FixedGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}

/// Cell counts derived from the viewport and recomputed on every resize. A small viewport never
/// shrinks the grid below `MIN_GRID_CELLS`, so the start cell stays reachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportGrid {
    cell_size: u32,
    width: i32,
    height: i32,
}

impl ViewportGrid {
    pub fn new(cell_size: u32, width_px: u32, height_px: u32) -> Self {
        let mut grid = Self {
            cell_size: cell_size.max(1),
            width: cell_count(0, MIN_GRID_CELLS),
            height: cell_count(0, MIN_GRID_CELLS),
        };
        grid.resize_viewport(width_px, height_px);
        grid
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
}

impl BoundsProvider for ViewportGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn resize_viewport(&mut self, width_px: u32, height_px: u32) {
        self.width = cell_count(width_px / self.cell_size, MIN_GRID_CELLS);
        self.height = cell_count(height_px / self.cell_size, MIN_GRID_CELLS);
    }
}

pub struct GridModel {
    bounds: Box<dyn BoundsProvider>,
}

impl GridModel {
    pub fn new(bounds: impl BoundsProvider + 'static) -> Self {
        Self {
            bounds: Box::new(bounds),
        }
    }

    pub fn from_mode(mode: &GridMode) -> Self {
        match *mode {
            GridMode::Fixed { width, height } => Self::new(FixedGrid::new(width, height)),
            GridMode::Viewport { cell_size } => Self::new(ViewportGrid::new(
                cell_size,
                DEFAULT_VIEWPORT_PX.0,
                DEFAULT_VIEWPORT_PX.1,
            )),
        }
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        (0..self.width()).contains(&cell.x) && (0..self.height()).contains(&cell.y)
    }

    /// Entities are left where they are; anything now outside is handled by the bounds check.
    pub fn resize_viewport(&mut self, width_px: u32, height_px: u32) {
        self.bounds.resize_viewport(width_px, height_px);
    }

    /// Uniform sample over the whole grid. Occupied cells are not excluded.
    pub fn random_cell(&self, rng: &mut SessionRng) -> Cell {
        Cell::new(
            rng.random_range(0..self.width()),
            rng.random_range(0..self.height()),
        )
    }
}
