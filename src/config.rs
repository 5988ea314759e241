use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::chaos::{ChaosGame, Point, PointStream};
use crate::error::{FernError, Result};
use crate::transform::TransformTable;

/// Number of points in the reference render.
pub const DEFAULT_POINTS: usize = 25_000;

/// Everything needed to reproduce a point stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub points: usize,
    pub table: TransformTable,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub warmup: usize,
    pub start: Point,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            table: TransformTable::default(),
            seed: None,
            warmup: 0,
            start: (0.0, 0.0),
        }
    }
}

impl Config {
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start = (x, y);
        self
    }

    pub fn with_table(mut self, table: TransformTable) -> Self {
        self.table = table;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let (x, y) = self.start;
        if !x.is_finite() || !y.is_finite() {
            return Err(FernError::NonFiniteStart { x, y });
        }
        Ok(())
    }

    fn game(&self, seed: Option<u64>) -> Result<ChaosGame<Pcg64>> {
        self.validate()?;
        Ok(ChaosGame::new(self.table.clone(), rng(seed))
            .with_start(self.start.0, self.start.1)?
            .with_warmup(self.warmup))
    }
}

fn rng(seed: Option<u64>) -> Pcg64 {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}

/// Runs one chaos game as described by `config`.
pub fn generate(config: &Config) -> Result<PointStream> {
    log::debug!(
        "generating {} points, warm-up {}, seed {:?}",
        config.points,
        config.warmup,
        config.seed
    );
    config.game(config.seed)?.run(config.points)
}

/// Runs one independent chaos game per seed on the rayon pool.
///
/// Each orbit owns its own RNG and state, so results are the same as running
/// `generate` once per seed. Output is in seed order.
pub fn generate_many(config: &Config, seeds: &[u64]) -> Result<Vec<PointStream>> {
    config.validate()?;
    seeds
        .par_iter()
        .map(|&seed| config.game(Some(seed))?.run(config.points))
        .collect()
}
