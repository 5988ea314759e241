//! Barnsley fern point generation with the chaos game.
//!
//! A [`ChaosGame`] walks an orbit through the four fern transforms, picking
//! one per step by weight. The resulting [`PointStream`] can be summarised
//! with [`Summary`] or plotted with [`render::render_png`].
//!
//! ```
//! use barnsley_fern::{generate, Config};
//!
//! let stream = generate(&Config::default().with_points(1_000).with_seed(7))?;
//! assert_eq!(stream.len(), 1_000);
//! # Ok::<(), barnsley_fern::FernError>(())
//! ```

pub mod chaos;
pub mod config;
pub mod error;
pub mod render;
pub mod summary;
pub mod transform;

pub use chaos::{ChaosGame, Mode, Point, PointStream, Sample};
pub use config::{generate, generate_many, Config, DEFAULT_POINTS};
pub use error::{FernError, Result};
pub use summary::{Bounds, Summary};
pub use transform::{select, AffineTransform, Role, TransformTable};
