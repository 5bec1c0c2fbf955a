//! # miniball-points
//! Point set sources for smallest enclosing ball (miniball) solvers.
//!
//! # Features
//! * A fixed-shape point set container: [ArrayPointSet], accessed through the [PointSet] and
//!   [PointSetMut] traits
//! * Random point sets, either uniform in the cube `[-1, 1]^d` or pushed close to the unit
//!   sphere to stress boundary handling: [random_point_set]
//! * Reading point sets from a simple line oriented text format: [read_point_set]
//!
//! Both producers are generic over the target container and over the coordinate type
//! (`f32` or `f64`).
//!
//! # Cargo features
//! * `serde`: implements `Serialize` and `Deserialize` for [ArrayPointSet]
//!
//! # Example
//! ```
//! use miniball_points::{parse_point_set, random_point_set, ArrayPointSet, Placement, PointSet};
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), miniball_points::ParseError> {
//! let mut rng = rand::rngs::StdRng::seed_from_u64(2);
//! let random: ArrayPointSet = random_point_set(2, 10, &mut rng, Placement::InCube);
//! assert_eq!(random.size(), 10);
//!
//! let parsed: ArrayPointSet = parse_point_set("3 2\n0 0\n2 3\n4 5\n")?;
//! assert_eq!(parsed.point(2), &[4.0, 5.0]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

mod generation;
mod point_set;
mod reader;

#[cfg(test)]
mod test_utilities;

pub use crate::generation::{random_point_set, Placement, WIGGLE};
pub use crate::point_set::{ArrayPointSet, Coordinate, PointSet, PointSetMut};
pub use crate::reader::{parse_point_set, read_point_set, ParseError};
