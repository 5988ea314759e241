//! The chaos game: repeatedly pick a transform by weight and apply it to the
//! current point.

use rand::Rng;

use crate::error::{FernError, Result};
use crate::transform::{Role, TransformTable};

pub type Point = (f64, f64);

/// One emitted point and the transform that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Point,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Points are still being discarded; holds the number left to drop.
    Warming(usize),
    Emitting,
}

/// Emitted points in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStream {
    samples: Vec<Sample>,
}

impl PointStream {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().map(|s| s.point)
    }

    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.point.0).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.point.1).collect()
    }

    /// Drops the first `count` samples, e.g. to cut a transient.
    pub fn skip(&self, count: usize) -> PointStream {
        PointStream {
            samples: self.samples.iter().skip(count).copied().collect(),
        }
    }
}

impl FromIterator<Sample> for PointStream {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        PointStream {
            samples: iter.into_iter().collect(),
        }
    }
}

pub struct ChaosGame<R: Rng> {
    table: TransformTable,
    rng: R,
    state: Point,
    mode: Mode,
    steps: u64,
}

impl<R: Rng> ChaosGame<R> {
    pub fn new(table: TransformTable, rng: R) -> Self {
        Self {
            table,
            rng,
            state: (0.0, 0.0),
            mode: Mode::Emitting,
            steps: 0,
        }
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(FernError::NonFiniteStart { x, y });
        }
        self.state = (x, y);
        Ok(self)
    }

    /// Number of iterates discarded before the first emitted point.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.mode = if warmup > 0 {
            Mode::Warming(warmup)
        } else {
            Mode::Emitting
        };
        self
    }

    pub fn state(&self) -> Point {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn table(&self) -> &TransformTable {
        &self.table
    }

    /// Advances the orbit by one iterate, regardless of mode.
    ///
    /// A non-finite result is reported as [`FernError::NumericAnomaly`] and the
    /// state is left untouched.
    pub fn step(&mut self) -> Result<Sample> {
        let u: f64 = self.rng.gen();
        let index = self.table.select(u);
        let role = Role::ALL[index];
        let (x, y) = self.table.get(role).apply(self.state.0, self.state.1);
        self.steps += 1;

        if !x.is_finite() || !y.is_finite() {
            return Err(FernError::NumericAnomaly {
                step: self.steps,
                role,
                x,
                y,
            });
        }

        self.state = (x, y);
        Ok(Sample {
            point: self.state,
            role,
        })
    }

    /// Next point that is not discarded by warm-up.
    fn next_emitted(&mut self) -> Result<Sample> {
        while let Mode::Warming(remaining) = self.mode {
            self.step()?;
            self.mode = if remaining > 1 {
                Mode::Warming(remaining - 1)
            } else {
                log::debug!("warm-up finished after {} steps", self.steps);
                Mode::Emitting
            };
        }
        self.step()
    }

    /// Streams `count` emitted points. Iteration stops after the first error.
    pub fn points(&mut self, count: usize) -> Points<'_, R> {
        Points {
            game: self,
            remaining: count,
        }
    }

    /// Generates `count` emitted points. On error nothing is returned.
    pub fn run(&mut self, count: usize) -> Result<PointStream> {
        let mut samples = Vec::with_capacity(count);
        for sample in self.points(count) {
            samples.push(sample?);
        }
        Ok(PointStream { samples })
    }
}

pub struct Points<'a, R: Rng> {
    game: &'a mut ChaosGame<R>,
    remaining: usize,
}

impl<R: Rng> Iterator for Points<'_, R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.game.next_emitted() {
            Ok(sample) => {
                self.remaining -= 1;
                Some(Ok(sample))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::AffineTransform;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn game(seed: u64) -> ChaosGame<Pcg64> {
        ChaosGame::new(TransformTable::default(), Pcg64::seed_from_u64(seed))
    }

    #[test]
    fn zero_points_is_empty() {
        let stream = game(1).run(0).unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn one_point_is_first_after_warmup() {
        let mut reference = game(7);
        for _ in 0..5 {
            reference.step().unwrap();
        }
        let expected = reference.step().unwrap();

        let mut warmed = game(7).with_warmup(5);
        let stream = warmed.run(1).unwrap();
        assert_eq!(stream.samples(), &[expected]);
        assert_eq!(warmed.mode(), Mode::Emitting);
    }

    #[test]
    fn warmup_counts_down_then_emits() {
        let mut g = game(3).with_warmup(2);
        assert_eq!(g.mode(), Mode::Warming(2));
        g.run(1).unwrap();
        assert_eq!(g.mode(), Mode::Emitting);
        assert_eq!(g.steps, 3);
    }

    #[test]
    fn stream_length_matches_request() {
        let stream = game(11).with_warmup(20).run(1234).unwrap();
        assert_eq!(stream.len(), 1234);
        assert_eq!(stream.xs().len(), stream.ys().len());
    }

    #[test]
    fn state_tracks_last_point() {
        let mut g = game(5);
        let stream = g.run(10).unwrap();
        assert_eq!(g.state(), stream.samples()[9].point);
    }

    #[test]
    fn start_point_is_used() {
        let only_main = TransformTable::new(vec![
            AffineTransform::new(0.0, 0.0, 0.0, 0.25, 0.0, 0.0, 0.0),
            AffineTransform::new(0.5, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0),
            AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        ])
        .unwrap();
        let mut g = ChaosGame::new(only_main, Pcg64::seed_from_u64(0))
            .with_start(2.0, 4.0)
            .unwrap();
        let s = g.step().unwrap();
        assert_eq!(s.role, Role::MainLeaflet);
        assert_eq!(s.point, (2.0, 3.0));
    }

    #[test]
    fn rejects_non_finite_start() {
        assert!(matches!(
            game(0).with_start(f64::INFINITY, 0.0),
            Err(FernError::NonFiniteStart { .. })
        ));
    }

    #[test]
    fn overflow_is_a_numeric_anomaly() {
        let exploding = TransformTable::new(vec![
            AffineTransform::new(f64::MAX, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(f64::MAX, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(f64::MAX, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(f64::MAX, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
        ])
        .unwrap();
        let mut g = ChaosGame::new(exploding, Pcg64::seed_from_u64(0))
            .with_start(4.0, 0.0)
            .unwrap();
        assert!(matches!(
            g.run(10),
            Err(FernError::NumericAnomaly { step: 1, .. })
        ));
        assert_eq!(g.state(), (4.0, 0.0));
    }

    #[test]
    fn streaming_stops_after_error() {
        let exploding = TransformTable::new(vec![
            AffineTransform::new(1e300, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(1e300, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(1e300, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
            AffineTransform::new(1e300, 0.0, 0.0, 1.0, 0.0, 0.0, 0.25),
        ])
        .unwrap();
        let mut g = ChaosGame::new(exploding, Pcg64::seed_from_u64(0))
            .with_start(1.0, 0.0)
            .unwrap();
        let results: Vec<_> = g.points(10).collect();
        // 1 -> 1e300 is fine, the next step overflows
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
