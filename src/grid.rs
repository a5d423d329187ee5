//! Run-constrained shortest paths over a grid of digit weights
//!
//! A walker starts in the top-left cell and must reach the bottom-right cell.
//! It moves in straight runs of between `min_run` and `max_run` cells and must
//! turn 90 degrees after every run. Entering a cell costs that cell's weight;
//! the start cell is free.
//!
//! Each cell is split into two search nodes, one per axis the walker arrived
//! along. A node entered vertically may only leave horizontally and the other
//! way round, so a single edge covers a whole run. The resulting graph is
//! solved with the bulk-loaded [`shortest_paths`].
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::grid::WeightGrid;
//!
//! let grid: WeightGrid = "111\n991\n991".parse().unwrap();
//! assert_eq!(grid.min_path_cost(1, 3).unwrap(), Some(4));
//! assert_eq!(grid.min_path_cost(2, 2).unwrap(), Some(4));
//! assert_eq!(grid.min_path_cost(3, 3).unwrap(), None);
//! ```

use crate::element::NodeIndex;
use crate::error::GridError;
use crate::pathfinding::{shortest_paths, Graph, ShortestPaths};
use std::fmt;
use std::str::FromStr;

/// Axis a walker arrived along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Axis {
    Vertical = 0,
    Horizontal = 1,
}

impl Axis {
    fn other(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// A rectangular grid of single-digit weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightGrid {
    width: usize,
    height: usize,
    weights: Vec<u8>,
}

impl WeightGrid {
    /// Parses rows of decimal digits. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] if there are no rows
    /// - [`GridError::InvalidDigit`] for a non-digit character
    /// - [`GridError::RaggedRow`] if a row's length differs from the first row's
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let mut width = 0;
        let mut height = 0;
        let mut weights = Vec::new();

        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row = height;
            let mut found = 0;
            for (col, ch) in line.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(GridError::InvalidDigit { row, col, found: ch })?;
                weights.push(digit as u8);
                found += 1;
            }
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if height == 0 {
            return Err(GridError::Empty);
        }
        Ok(WeightGrid {
            width,
            height,
            weights,
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Weight of the cell at `(row, col)`
    pub fn weight(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(u32::from(self.weights[row * self.width + col]))
    }

    /// Cheapest cost from the top-left to the bottom-right cell, or `None` if
    /// the run bounds make the corner unreachable.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidRun`] if `min_run` is zero or larger than `max_run`.
    pub fn min_path_cost(&self, min_run: usize, max_run: usize) -> Result<Option<u32>, GridError> {
        let paths = self.solve(min_run, max_run)?;
        Ok(self.best_end(&paths).map(|(_, cost)| cost))
    }

    /// Like [`min_path_cost`](Self::min_path_cost), also returning every cell
    /// on the cheapest path.
    pub fn best_path(&self, min_run: usize, max_run: usize) -> Result<Option<GridPath>, GridError> {
        let paths = self.solve(min_run, max_run)?;
        let Some((end, cost)) = self.best_end(&paths) else {
            return Ok(None);
        };
        let Some(nodes) = paths.path_to(end) else {
            return Ok(None);
        };

        let mut cells = vec![(0, 0)];
        for pair in nodes.windows(2) {
            let (mut row, mut col) = self.cell_of(pair[0]);
            let (to_row, to_col) = self.cell_of(pair[1]);
            while (row, col) != (to_row, to_col) {
                row = step_toward(row, to_row);
                col = step_toward(col, to_col);
                cells.push((row, col));
            }
        }
        Ok(Some(GridPath { cost, cells }))
    }

    fn solve(&self, min_run: usize, max_run: usize) -> Result<ShortestPaths<u32>, GridError> {
        if min_run == 0 || min_run > max_run {
            return Err(GridError::InvalidRun { min_run, max_run });
        }
        let graph = RunGraph {
            grid: self,
            min_run,
            max_run,
        };
        let sources = [
            graph.node(0, 0, Axis::Vertical),
            graph.node(0, 0, Axis::Horizontal),
        ];
        Ok(shortest_paths(&graph, &sources)?)
    }

    /// The cheaper of the two end nodes, with its cost
    fn best_end(&self, paths: &ShortestPaths<u32>) -> Option<(NodeIndex, u32)> {
        let cell = (self.height - 1) * self.width + self.width - 1;
        [cell * 2, cell * 2 + 1]
            .into_iter()
            .filter_map(|node| Some((node, paths.distance(node)?)))
            .min_by_key(|&(_, cost)| cost)
    }

    fn cell_of(&self, node: NodeIndex) -> (usize, usize) {
        let cell = node / 2;
        (cell / self.width, cell % self.width)
    }
}

impl FromStr for WeightGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightGrid::parse(s)
    }
}

fn step_toward(from: usize, to: usize) -> usize {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + 1,
        std::cmp::Ordering::Equal => from,
        std::cmp::Ordering::Greater => from - 1,
    }
}

/// The cheapest path found by [`WeightGrid::best_path`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    /// Sum of the weights of every cell entered
    pub cost: u32,
    /// Every cell visited, starting at `(0, 0)`, as `(row, col)`
    pub cells: Vec<(usize, usize)>,
}

impl GridPath {
    /// Draws the grid with each entered cell replaced by the arrow it was
    /// entered with.
    pub fn render(&self, grid: &WeightGrid) -> String {
        let mut canvas: Vec<Vec<char>> = (0..grid.height)
            .map(|row| {
                (0..grid.width)
                    .map(|col| char::from(b'0' + grid.weights[row * grid.width + col]))
                    .collect()
            })
            .collect();

        for pair in self.cells.windows(2) {
            let ((r0, c0), (r1, c1)) = (pair[0], pair[1]);
            let arrow = if r1 > r0 {
                'v'
            } else if r1 < r0 {
                '^'
            } else if c1 > c0 {
                '>'
            } else {
                '<'
            };
            if let Some(cell) = canvas.get_mut(r1).and_then(|row| row.get_mut(c1)) {
                *cell = arrow;
            }
        }

        let mut out = String::with_capacity(grid.height * (grid.width + 1));
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for GridPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cost {} over {} cells", self.cost, self.cells.len())
    }
}

/// The split-cell graph of a grid under given run bounds
struct RunGraph<'a> {
    grid: &'a WeightGrid,
    min_run: usize,
    max_run: usize,
}

impl RunGraph<'_> {
    fn node(&self, row: usize, col: usize, entered: Axis) -> NodeIndex {
        (row * self.grid.width + col) * 2 + entered as usize
    }

    /// Pushes the runs leaving `(row, col)` in one direction along `axis`
    fn push_runs(
        &self,
        row: usize,
        col: usize,
        axis: Axis,
        forward: bool,
        edges: &mut Vec<(NodeIndex, u32)>,
    ) {
        let (limit, from) = match (axis, forward) {
            (Axis::Vertical, true) => (self.grid.height - 1 - row, row),
            (Axis::Vertical, false) => (row, row),
            (Axis::Horizontal, true) => (self.grid.width - 1 - col, col),
            (Axis::Horizontal, false) => (col, col),
        };

        let mut cost = 0;
        for run in 1..=self.max_run.min(limit) {
            let along = if forward { from + run } else { from - run };
            let (r, c) = match axis {
                Axis::Vertical => (along, col),
                Axis::Horizontal => (row, along),
            };
            cost += u32::from(self.grid.weights[r * self.grid.width + c]);
            if run >= self.min_run {
                edges.push((self.node(r, c, axis), cost));
            }
        }
    }
}

impl Graph for RunGraph<'_> {
    type Cost = u32;

    fn node_count(&self) -> usize {
        self.grid.weights.len() * 2
    }

    fn successors(&self, node: NodeIndex, edges: &mut Vec<(NodeIndex, u32)>) {
        let entered = if node % 2 == 0 {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        let cell = node / 2;
        let (row, col) = (cell / self.grid.width, cell % self.grid.width);
        let leave = entered.other();

        self.push_runs(row, col, leave, true, edges);
        self.push_runs(row, col, leave, false, edges);
    }
}
