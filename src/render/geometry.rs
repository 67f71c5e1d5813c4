use crate::snapshot::GridSize;

/// Maps grid coordinates to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
    pub diameter: f64,
    canvas_width: f64,
    mirror: bool,
}

impl CellGeometry {
    /// Geometry for drawing `grid` onto a `canvas_width x canvas_height` canvas.
    /// Dots are `diameter_adj * min(cell_width, cell_height)` across.
    pub fn new(
        canvas_width: u32,
        canvas_height: u32,
        grid: GridSize,
        diameter_adj: f64,
        mirror: bool,
    ) -> Self {
        let cell_width = if grid.width > 0 { canvas_width as f64 / grid.width as f64 } else { 0.0 };
        let cell_height = if grid.height > 0 { canvas_height as f64 / grid.height as f64 } else { 0.0 };

        Self {
            cell_width,
            cell_height,
            diameter: cell_width.min(cell_height) * diameter_adj,
            canvas_width: canvas_width as f64,
            mirror,
        }
    }

    /// Canvas center of a (possibly fractional) grid position
    pub fn center(&self, grid_x: f64, grid_y: f64) -> (f64, f64) {
        let x = grid_x * self.cell_width + self.cell_width / 2.0;
        let y = grid_y * self.cell_height + self.cell_height / 2.0;
        if self.mirror {
            (self.canvas_width - x, y)
        } else {
            (x, y)
        }
    }
}

/// Canvas height that keeps the grid's aspect ratio at a given width
pub fn fit_height(canvas_width: u32, grid: GridSize) -> u32 {
    if grid.width == 0 {
        return 0;
    }
    (canvas_width as u64 * grid.height as u64 / grid.width as u64) as u32
}
