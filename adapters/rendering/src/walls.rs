//! Sources deciding where decorative maze walls appear.

use contrib_maze_core::{GridCoord, MazeComplexity};
use rand::Rng;

/// Decides whether a calendar cell receives a decorative wall.
///
/// Walls are purely cosmetic; implementations never influence the route,
/// the eaten dots or the score.
pub trait WallSampler {
    /// Returns `true` when a wall should be drawn at `cell`.
    fn place_wall(&mut self, complexity: MazeComplexity, cell: GridCoord) -> bool;
}

/// Sampler that never draws walls.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWalls;

impl WallSampler for NoWalls {
    fn place_wall(&mut self, _complexity: MazeComplexity, _cell: GridCoord) -> bool {
        false
    }
}

/// Sampler that places walls independently per cell with the complexity's
/// probability.
#[derive(Clone, Debug)]
pub struct RandomWalls<R> {
    rng: R,
}

impl<R: Rng> RandomWalls<R> {
    /// Wraps the provided random source.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WallSampler for RandomWalls<R> {
    fn place_wall(&mut self, complexity: MazeComplexity, _cell: GridCoord) -> bool {
        let probability = complexity.wall_probability();
        // Simple mazes leave the random stream untouched.
        if probability <= 0.0 {
            return false;
        }
        self.rng.gen_bool(probability)
    }
}

impl<F> WallSampler for F
where
    F: FnMut(MazeComplexity, GridCoord) -> bool,
{
    fn place_wall(&mut self, complexity: MazeComplexity, cell: GridCoord) -> bool {
        self(complexity, cell)
    }
}
