// grid.rs - Bounded Game of Life grid for Conway's Game of Life
//
// The active W x H playing area is stored inside a one cell border that is
// always dead. Bordered coordinates run 1..=H and 1..=W, so neighbour reads
// never leave the buffer and off-grid positions count as dead.

use log::{debug, trace};

use crate::error::GridError;

/// A cell address: `(row, col)` with `row < height` and `col < width`.
pub type Cell = (usize, usize);

pub const DEFAULT_WIDTH: usize  = 100;
pub const DEFAULT_HEIGHT: usize = 100;

/// Fixed-size Game of Life grid.
///
/// The engine is the only owner of cell state. Every mutation goes through
/// its methods, and [`tick`](GridEngine::tick) reports which cells changed so
/// a presentation layer can redraw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEngine {
    width: usize,
    height: usize,
    stride: usize,      // width + 2 border columns
    current: Vec<bool>, // (height + 2) * stride, border included
    next: Vec<bool>,    // staging buffer for the generation being computed
}

impl GridEngine {
    /// Allocates a `width` x `height` grid with every cell dead.
    ///
    /// Zero dimensions, and dimensions whose bordered buffer would not fit
    /// in memory addressing, are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimension { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let stride = width.checked_add(2).ok_or(invalid)?;
        let total = height
            .checked_add(2)
            .and_then(|rows| rows.checked_mul(stride))
            .filter(|&total| total <= isize::MAX as usize)
            .ok_or(invalid)?;
        debug!("allocated {width}x{height} grid");

        Ok(Self {
            width,
            height,
            stride,
            current: vec![false; total],
            next: vec![false; total],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let idx = self.index(row, col)?;
        Ok(self.current[idx])
    }

    pub fn set_alive(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.set(row, col, true)
    }

    pub fn set_dead(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.set(row, col, false)
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        let idx = self.index(row, col)?;
        self.current[idx] = !self.current[idx];
        Ok(self.current[idx])
    }

    /// Counts live cells in the Moore neighbourhood of `(row, col)`.
    ///
    /// The cell itself is not counted and positions past the grid edge are
    /// absent rather than wrapped, so corners top out at 3 and edges at 5.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.index(row, col)?;
        Ok(count_neighbors(&self.current, self.stride, row + 1, col + 1))
    }

    /// Advances the whole grid by one generation.
    ///
    /// Every next state is computed from the current buffer into the staging
    /// buffer before either is modified, then the buffers are swapped. Returns
    /// the cells whose state changed, in row-major order.
    pub fn tick(&mut self) -> Vec<Cell> {
        let stride = self.stride;
        self.next.fill(false);

        for row in 1..=self.height {
            let out = &mut self.next[row * stride..(row + 1) * stride];
            process_row(&self.current, stride, self.width, row, out);
        }

        debug_assert!(border_is_dead(&self.next, self.width, self.height));

        let changed: Vec<Cell> = self
            .cells()
            .filter(|&(row, col)| {
                let idx = (row + 1) * stride + col + 1;
                self.current[idx] != self.next[idx]
            })
            .collect();

        std::mem::swap(&mut self.current, &mut self.next);
        trace!("tick changed {} cells", changed.len());
        changed
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.current.fill(false);
        debug!("grid cleared");
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&alive| alive).count()
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells()
            .filter(move |&(row, col)| self.current[(row + 1) * self.stride + col + 1])
    }

    fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.current[idx] = alive;
        Ok(())
    }

    // Maps a public coordinate to its slot in the bordered buffer.
    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok((row + 1) * self.stride + col + 1)
    }
}

/// Computes one row of the next generation into `row_result`.
///
/// `row` is a bordered row index; border slots of `row_result` are left dead.
fn process_row(current: &[bool], stride: usize, width: usize, row: usize, row_result: &mut [bool]) {
    for col in 1..=width {
        let count = count_neighbors(current, stride, row, col);
        let current_alive = current[row * stride + col];

        row_result[col] = match (current_alive, count) {
            (true, 2) | (true, 3) => true,   // Survival
            (false, 3)            => true,   // Birth
            _                     => false,  // Under/overpopulation or stays dead
        };
    }
}

// `row` and `col` are bordered coordinates, so all eight reads stay in the buffer.
fn count_neighbors(grid: &[bool], stride: usize, row: usize, col: usize) -> u8 {
    let neighbors = [
        (row-1,col-1),(row-1,col),(row-1,col+1),(row,col-1),
        (row,col+1),(row+1,col-1),(row+1,col),(row+1,col+1)
    ];

    neighbors
        .iter()
        .filter(|&&(nr, nc)| grid[nr * stride + nc])
        .count() as u8
}

fn border_is_dead(grid: &[bool], width: usize, height: usize) -> bool {
    let stride = width + 2;
    let last_row = height + 1;
    let rows_dead = (0..stride).all(|c| !grid[c] && !grid[last_row * stride + c]);
    let cols_dead = (0..=last_row).all(|r| !grid[r * stride] && !grid[r * stride + width + 1]);
    rows_dead && cols_dead
}
