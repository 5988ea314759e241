use std::fmt;

use rayon::prelude::*;

use crate::chaos::PointStream;
use crate::render::PostTransform;
use crate::transform::Role;

/// Axis-aligned box around a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    const EMPTY: Bounds = Bounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// `None` for an empty stream.
    pub fn of(stream: &PointStream) -> Option<Bounds> {
        if stream.is_empty() {
            return None;
        }
        let bounds = stream
            .samples()
            .par_iter()
            .fold(
                || Bounds::EMPTY,
                |b, s| Bounds {
                    min_x: b.min_x.min(s.point.0),
                    max_x: b.max_x.max(s.point.0),
                    min_y: b.min_y.min(s.point.1),
                    max_y: b.max_y.max(s.point.1),
                },
            )
            .reduce(|| Bounds::EMPTY, Bounds::union);
        Some(bounds)
    }

    fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Aggregate view of a finished stream, for the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub counts: [usize; 4],
    pub bounds: Option<Bounds>,
    /// Scale applied by the renderer, used for the placed size line.
    pub placement_scale: f64,
}

impl Summary {
    pub fn from_stream(stream: &PointStream, placement: &PostTransform) -> Summary {
        if stream.is_empty() {
            log::warn!("summarising an empty point stream");
        }
        let counts = stream
            .samples()
            .par_iter()
            .fold(
                || [0usize; 4],
                |mut counts, s| {
                    counts[s.role.index()] += 1;
                    counts
                },
            )
            .reduce(
                || [0usize; 4],
                |mut total, part| {
                    for (t, p) in total.iter_mut().zip(part) {
                        *t += p;
                    }
                    total
                },
            );
        Summary {
            total: stream.len(),
            counts,
            bounds: Bounds::of(stream),
            placement_scale: placement.a,
        }
    }

    pub fn count(&self, role: Role) -> usize {
        self.counts[role.index()]
    }

    pub fn percentage(&self, role: Role) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(role) as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(55);
        writeln!(f, "{rule}")?;
        writeln!(f, "BARNSLEY FERN - 0 TO 3 COORDINATE SYSTEM")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Points generated: {}", self.total)?;
        for role in Role::ALL {
            writeln!(
                f,
                "  {:<14} {:>8} ({:.2}%)",
                role.to_string(),
                self.count(role),
                self.percentage(role)
            )?;
        }
        match &self.bounds {
            Some(b) => {
                writeln!(
                    f,
                    "Bounds: x [{:.2}, {:.2}], y [{:.2}, {:.2}]",
                    b.min_x, b.max_x, b.min_y, b.max_y
                )?;
                writeln!(
                    f,
                    "Original size - Width: {:.2}, Height: {:.2}",
                    b.width(),
                    b.height()
                )?;
                writeln!(
                    f,
                    "Placed size - Width: {:.2}, Height: {:.2}",
                    b.width() * self.placement_scale,
                    b.height() * self.placement_scale
                )?;
            }
            None => writeln!(f, "Bounds: none")?,
        }
        write!(f, "{rule}")
    }
}
