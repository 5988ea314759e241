use std::fmt;

use crate::error::{FernError, Result};

/// Allowed drift of the summed weights away from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Slot of a transform in the table. Only used as a stable name for the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Stem,
    MainLeaflet,
    LeftLeaflet,
    RightLeaflet,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Stem,
        Role::MainLeaflet,
        Role::LeftLeaflet,
        Role::RightLeaflet,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Stem => "stem",
            Role::MainLeaflet => "main leaflet",
            Role::LeftLeaflet => "left leaflet",
            Role::RightLeaflet => "right leaflet",
        };
        f.write_str(name)
    }
}

/// `x' = a*x + b*y + e`, `y' = c*x + d*y + f`, picked with probability `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub weight: f64,
}

impl AffineTransform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, weight: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            weight,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.e,
            self.c * x + self.d * y + self.f,
        )
    }

    fn coefficients_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// The four fern transforms, in `Role` order.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTable {
    transforms: [AffineTransform; 4],
}

impl TransformTable {
    /// Validates count, weights and coefficients. Nothing is iterated with a
    /// table that fails here.
    pub fn new(transforms: Vec<AffineTransform>) -> Result<Self> {
        let transforms: [AffineTransform; 4] = transforms
            .try_into()
            .map_err(|rest: Vec<AffineTransform>| FernError::TransformCount { found: rest.len() })?;

        for (role, transform) in Role::ALL.iter().zip(&transforms) {
            if !transform.weight.is_finite() || !(0.0..=1.0).contains(&transform.weight) {
                return Err(FernError::InvalidWeight {
                    role: *role,
                    weight: transform.weight,
                });
            }
            if !transform.coefficients_finite() {
                return Err(FernError::NonFiniteCoefficient { role: *role });
            }
        }

        let sum: f64 = transforms.iter().map(|t| t.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(FernError::WeightSum { sum });
        }

        log::debug!("transform table accepted, weight sum {sum}");
        Ok(Self { transforms })
    }

    pub fn get(&self, role: Role) -> &AffineTransform {
        &self.transforms[role.index()]
    }

    pub fn transforms(&self) -> &[AffineTransform; 4] {
        &self.transforms
    }

    pub fn weights(&self) -> [f64; 4] {
        self.transforms.map(|t| t.weight)
    }

    /// Index of the transform owning draw `u`, see [`select`].
    pub fn select(&self, u: f64) -> usize {
        select(&self.weights(), u)
    }
}

impl Default for TransformTable {
    fn default() -> Self {
        Self {
            transforms: [
                AffineTransform::new(0.0, 0.0, 0.0, 0.25, 0.0, 0.0, 0.01),
                AffineTransform::new(0.80, 0.08, -0.08, 0.80, 0.0, 1.8, 0.85),
                AffineTransform::new(0.30, -0.35, 0.35, 0.30, 0.0, 1.8, 0.07),
                AffineTransform::new(-0.25, 0.35, 0.35, 0.30, 0.0, 0.6, 0.07),
            ],
        }
    }
}

/// Cumulative-probability partitioning of `[0, 1)`.
///
/// Returns the first index whose running weight sum exceeds `u`. When rounding
/// leaves the sum short of `u` the last index is returned, so the result is
/// always in range for a non-empty `weights`.
pub fn select(weights: &[f64], u: f64) -> usize {
    let mut sum = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        sum += weight;
        if u < sum {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}
