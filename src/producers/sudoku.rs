//! Sudoku backtracking step producer.
//!
//! Straightforward first-empty-cell backtracking over a 9x9 grid.
//! Givens that already conflict, or a grid with no solution, degrade to
//! a short "no solution" run instead of an error.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Board side length.
pub const GRID: usize = 9;

/// Sudoku configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SudokuConfig {
    /// Initial grid, row-major; 0 means empty. Rows beyond 9 or cells
    /// outside `[0, 9]` are dropped/cleared rather than rejected.
    #[serde(default)]
    pub grid: Vec<Vec<u8>>,
}

/// Snapshot payload: full grid plus the cell being worked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuPayload {
    /// Current grid, row-major, 0 = empty.
    pub grid: Vec<Vec<u8>>,
    /// Cell touched by this step, if any.
    pub current_cell: Option<(usize, usize)>,
    /// Whether the grid is fully solved.
    pub solved: bool,
}

/// Sudoku step producer.
#[derive(Debug, Clone)]
pub struct SudokuProducer {
    config: SudokuConfig,
    grid: [[u8; GRID]; GRID],
}

impl SudokuProducer {
    fn payload(&self, current_cell: Option<(usize, usize)>, solved: bool) -> SudokuPayload {
        SudokuPayload {
            grid: self.grid.iter().map(|row| row.to_vec()).collect(),
            current_cell,
            solved,
        }
    }

    fn fits_in(grid: &[[u8; GRID]; GRID], row: usize, col: usize, value: u8) -> bool {
        for i in 0..GRID {
            if grid[row][i] == value || grid[i][col] == value {
                return false;
            }
        }
        let (br, bc) = (row / 3 * 3, col / 3 * 3);
        for r in br..br + 3 {
            for c in bc..bc + 3 {
                if grid[r][c] == value {
                    return false;
                }
            }
        }
        true
    }

    fn fits(&self, row: usize, col: usize, value: u8) -> bool {
        Self::fits_in(&self.grid, row, col, value)
    }

    fn first_empty(&self) -> Option<(usize, usize)> {
        (0..GRID).find_map(|r| (0..GRID).find(|&c| self.grid[r][c] == 0).map(|c| (r, c)))
    }

    fn givens_consistent(&self) -> bool {
        for r in 0..GRID {
            for c in 0..GRID {
                let v = self.grid[r][c];
                if v == 0 {
                    continue;
                }
                // A given is consistent iff it still fits with itself
                // removed.
                let mut grid = self.grid;
                grid[r][c] = 0;
                if !Self::fits_in(&grid, r, c, v) {
                    return false;
                }
            }
        }
        true
    }

    fn solve(&mut self, recorder: &mut StepRecorder<SudokuPayload>) -> bool {
        let Some((row, col)) = self.first_empty() else {
            return true;
        };

        for value in 1..=9u8 {
            if self.fits(row, col, value) {
                self.grid[row][col] = value;
                recorder.record(
                    format!("Try {value} at row {row}, column {col}"),
                    self.payload(Some((row, col)), false),
                );
                if self.solve(recorder) {
                    return true;
                }
                self.grid[row][col] = 0;
                recorder.record(
                    format!("Backtrack: clear row {row}, column {col}"),
                    self.payload(Some((row, col)), false),
                );
            }
        }
        false
    }
}

impl StepProducer for SudokuProducer {
    type Config = SudokuConfig;
    type Payload = SudokuPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.grid.truncate(GRID);
        for row in &mut config.grid {
            row.truncate(GRID);
            for cell in row.iter_mut() {
                if *cell > 9 {
                    *cell = 0;
                }
            }
        }

        let mut grid = [[0u8; GRID]; GRID];
        for (r, row) in config.grid.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                grid[r][c] = cell;
            }
        }
        Self { config, grid }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "sudoku"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(200)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        // Reset working grid from clamped config.
        let mut grid = [[0u8; GRID]; GRID];
        for (r, row) in self.config.grid.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                grid[r][c] = cell;
            }
        }
        self.grid = grid;

        let mut recorder = StepRecorder::new();
        let givens = self
            .grid
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        recorder.record(
            format!("Initial grid with {givens} givens"),
            self.payload(None, false),
        );

        if !self.givens_consistent() {
            recorder.record(
                "Givens conflict: no solution possible",
                self.payload(None, false),
            );
            return recorder.into_sequence();
        }

        let solved = self.solve(&mut recorder);
        recorder.record(
            if solved {
                "Grid solved".to_string()
            } else {
                "Search exhausted: no solution exists".to_string()
            },
            self.payload(None, solved),
        );
        recorder.into_sequence()
    }
}
