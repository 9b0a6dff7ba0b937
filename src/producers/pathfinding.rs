//! Grid pathfinding step producer: Dijkstra and A*.
//!
//! Uniform-cost grid with 4-connected moves and seeded random walls.
//! Dijkstra is A* with a zero heuristic, so one search routine serves
//! both; the only difference is the priority used in the frontier.
//! A grid with no path degrades to a "no path found" run.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::rng::VizRng;
use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum grid side length.
pub const MAX_SIDE: usize = 40;

/// Which search to visualize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    /// Uniform-cost search.
    #[default]
    Dijkstra,
    /// Best-first with Manhattan heuristic.
    Astar,
}

impl PathAlgorithm {
    /// Display name used in snapshot descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::Astar => "A*",
        }
    }
}

/// Pathfinding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Search algorithm.
    #[serde(default)]
    pub algorithm: PathAlgorithm,

    /// Grid width; clamped to `[2, 40]`.
    #[serde(default = "default_side")]
    pub width: usize,

    /// Grid height; clamped to `[2, 40]`.
    #[serde(default = "default_side")]
    pub height: usize,

    /// Wall density in `[0.0, 0.6]`; clamped.
    #[serde(default = "default_wall_density")]
    pub wall_density: f64,

    /// Seed for wall placement.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_side() -> usize {
    15
}

const fn default_wall_density() -> f64 {
    0.25
}

const fn default_seed() -> u64 {
    42
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            algorithm: PathAlgorithm::default(),
            width: default_side(),
            height: default_side(),
            wall_density: default_wall_density(),
            seed: default_seed(),
        }
    }
}

/// Snapshot payload: full search state for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPayload {
    /// Grid width.
    pub width: usize,
    /// Grid height.
    pub height: usize,
    /// Wall cells as `(x, y)`.
    pub walls: Vec<(usize, usize)>,
    /// Cells settled so far, in visit order.
    pub visited: Vec<(usize, usize)>,
    /// Cells currently on the frontier.
    pub frontier: Vec<(usize, usize)>,
    /// Cell settled by this step.
    pub current: Option<(usize, usize)>,
    /// Final path, start to goal, once reconstructed.
    pub path: Vec<(usize, usize)>,
}

/// Pathfinding step producer.
///
/// Start is the top-left corner, goal the bottom-right; both are always
/// kept clear of walls.
#[derive(Debug, Clone)]
pub struct PathfindingProducer {
    config: PathConfig,
    walls: Vec<bool>,
    visited: Vec<(usize, usize)>,
    path: Vec<(usize, usize)>,
}

impl PathfindingProducer {
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.config.width + x
    }

    fn payload(
        &self,
        frontier: Vec<(usize, usize)>,
        current: Option<(usize, usize)>,
    ) -> PathPayload {
        let walls = (0..self.config.height)
            .flat_map(|y| (0..self.config.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.walls[y * self.config.width + x])
            .collect();
        PathPayload {
            width: self.config.width,
            height: self.config.height,
            walls,
            visited: self.visited.clone(),
            frontier,
            current,
            path: self.path.clone(),
        }
    }

    fn heuristic(&self, x: usize, y: usize) -> u32 {
        let goal = (self.config.width - 1, self.config.height - 1);
        (goal.0.abs_diff(x) + goal.1.abs_diff(y)) as u32
    }

    fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if x > 0 {
            out.push((x - 1, y));
        }
        if y > 0 {
            out.push((x, y - 1));
        }
        if x + 1 < self.config.width {
            out.push((x + 1, y));
        }
        if y + 1 < self.config.height {
            out.push((x, y + 1));
        }
        out
    }

    fn search(&mut self, recorder: &mut StepRecorder<PathPayload>) -> bool {
        let (w, h) = (self.config.width, self.config.height);
        let start = (0usize, 0usize);
        let goal = (w - 1, h - 1);

        let mut dist: Vec<u32> = vec![u32::MAX; w * h];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; w * h];
        let mut settled = vec![false; w * h];

        // Min-heap keyed on (priority, distance) for stable expansion.
        let mut heap: BinaryHeap<Reverse<(u32, u32, usize, usize)>> = BinaryHeap::new();

        dist[self.index(start.0, start.1)] = 0;
        let start_priority = match self.config.algorithm {
            PathAlgorithm::Dijkstra => 0,
            PathAlgorithm::Astar => self.heuristic(start.0, start.1),
        };
        heap.push(Reverse((start_priority, 0, start.0, start.1)));

        while let Some(Reverse((_, d, x, y))) = heap.pop() {
            let idx = self.index(x, y);
            if settled[idx] {
                continue;
            }
            settled[idx] = true;
            self.visited.push((x, y));

            let frontier: Vec<(usize, usize)> = heap
                .iter()
                .map(|Reverse((_, _, fx, fy))| (*fx, *fy))
                .filter(|&(fx, fy)| !settled[fy * w + fx])
                .collect();
            recorder.record(
                format!("Settle ({x}, {y}) at distance {d}"),
                self.payload(frontier, Some((x, y))),
            );

            if (x, y) == goal {
                // Reconstruct goal-to-start, then flip.
                let mut cell = Some(goal);
                while let Some((cx, cy)) = cell {
                    self.path.push((cx, cy));
                    cell = prev[cy * w + cx];
                }
                self.path.reverse();
                recorder.record(
                    format!(
                        "Goal reached: path of {} cells, cost {d}",
                        self.path.len()
                    ),
                    self.payload(Vec::new(), Some(goal)),
                );
                return true;
            }

            for (nx, ny) in self.neighbors(x, y) {
                let nidx = ny * w + nx;
                if self.walls[nidx] || settled[nidx] {
                    continue;
                }
                let candidate = d + 1;
                if candidate < dist[nidx] {
                    dist[nidx] = candidate;
                    prev[nidx] = Some((x, y));
                    let priority = match self.config.algorithm {
                        PathAlgorithm::Dijkstra => candidate,
                        PathAlgorithm::Astar => candidate + self.heuristic(nx, ny),
                    };
                    heap.push(Reverse((priority, candidate, nx, ny)));
                }
            }
        }
        false
    }
}

impl StepProducer for PathfindingProducer {
    type Config = PathConfig;
    type Payload = PathPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.width = config.width.clamp(2, MAX_SIDE);
        config.height = config.height.clamp(2, MAX_SIDE);
        config.wall_density = if config.wall_density.is_nan() {
            0.0
        } else {
            config.wall_density.clamp(0.0, 0.6)
        };
        Self {
            config,
            walls: Vec::new(),
            visited: Vec::new(),
            path: Vec::new(),
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "path"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(100)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        let (w, h) = (self.config.width, self.config.height);
        let mut rng = VizRng::new(self.config.seed);
        self.walls = (0..w * h)
            .map(|_| rng.gen_f64() < self.config.wall_density)
            .collect();
        // Start and goal are always open.
        self.walls[0] = false;
        self.walls[w * h - 1] = false;
        self.visited = Vec::new();
        self.path = Vec::new();

        let mut recorder = StepRecorder::new();
        let wall_count = self.walls.iter().filter(|&&wall| wall).count();
        recorder.record(
            format!(
                "{} search on {w}x{h} grid with {wall_count} walls",
                self.config.algorithm.label()
            ),
            self.payload(Vec::new(), None),
        );

        if !self.search(&mut recorder) {
            recorder.record(
                "Frontier exhausted: no path from start to goal",
                self.payload(Vec::new(), None),
            );
        }
        recorder.into_sequence()
    }
}
