use std::fmt::{self, Display, Formatter};

use log::trace;
use num_traits::{Float, One, Zero};
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::{PointSet, PointSetMut};

/// Upper bound of the random radius offset added in [Placement::NearBoundary] mode.
pub const WIGGLE: f64 = 1e-2;

/// Selects where [random_point_set] puts its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Placement {
    /// Every coordinate is uniformly distributed in `[-1, 1]`. Points fill the hypercube
    /// `[-1, 1]^d` and are not normalized.
    #[default]
    InCube,

    /// Every point is scaled to lie slightly outside the unit sphere.
    ///
    /// A point with direction `v` ends up with length `1 + WIGGLE * u * |v|` for a fresh uniform
    /// draw `u` in `[0, 1)`. Many points end up almost cospherical, which is a hard case for
    /// enclosing ball solvers.
    NearBoundary,
}

impl From<bool> for Placement {
    /// Maps an `on_boundary` flag to its placement.
    fn from(on_boundary: bool) -> Self {
        if on_boundary {
            Placement::NearBoundary
        } else {
            Placement::InCube
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Placement::InCube => "uniform in cube",
            Placement::NearBoundary => "near unit sphere",
        })
    }
}

/// Generates `size` random points of dimension `dimension`.
///
/// All randomness is taken from `rng`: equal generator states yield equal point sets. Every
/// uniform draw in `[0, 1)` is mapped to a coordinate `2 * u - 1`.
///
/// With [Placement::NearBoundary], each point is rescaled afterwards, consuming one more draw
/// per point. A point drawn as the zero vector has no direction and cannot be rescaled; its
/// coordinates are drawn again until at least one of them is non-zero. The redraw loop only ends
/// once `rng` produces a draw other than exactly `0.5`: a degenerate source that keeps returning
/// that value (such as `StepRng::new(1 << 63, 0)`) makes this function loop forever.
///
/// # Example
/// ```
/// use miniball_points::{random_point_set, ArrayPointSet, Placement, PointSet};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let points: ArrayPointSet = random_point_set(3, 100, &mut rng, Placement::NearBoundary);
///
/// assert_eq!(points.size(), 100);
/// for i in 0..points.size() {
///     assert!(points.squared_length(i).sqrt() >= 1.0 - 1e-12);
/// }
/// ```
pub fn random_point_set<P, R>(
    dimension: usize,
    size: usize,
    rng: &mut R,
    placement: Placement,
) -> P
where
    P: PointSetMut,
    R: Rng + ?Sized,
    Standard: Distribution<P::Scalar>,
{
    let zero = P::Scalar::zero();
    let one = P::Scalar::one();
    let two = one + one;
    let wiggle: P::Scalar = num_traits::cast::<f64, P::Scalar>(WIGGLE)
        .expect("Every floating point coordinate type can represent WIGGLE. This is a bug.");

    let mut points = P::with_shape(dimension, size);

    for i in 0..size {
        let mut squared_length;
        loop {
            squared_length = zero;
            for j in 0..dimension {
                let v = two * rng.gen::<P::Scalar>() - one;
                points.set_coord(i, j, v);
                squared_length = squared_length + v * v;
            }

            if placement == Placement::InCube || dimension == 0 || squared_length > zero {
                break;
            }
            trace!("Redrawing zero length point {}", i);
        }

        if placement == Placement::NearBoundary && dimension > 0 {
            let scale = one / squared_length.sqrt() + wiggle * rng.gen::<P::Scalar>();
            for j in 0..dimension {
                let scaled = points.coord(i, j) * scale;
                points.set_coord(i, j, scaled);
            }
        }
    }

    points
}

#[cfg(test)]
mod test {
    use super::{random_point_set, Placement, WIGGLE};
    use crate::test_utilities::{seeded_rng, SEED, SEED2};
    use crate::{ArrayPointSet, PointSet};
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_placement_from_flag() {
        assert_eq!(Placement::from(false), Placement::InCube);
        assert_eq!(Placement::from(true), Placement::NearBoundary);
        assert_eq!(Placement::default(), Placement::InCube);
    }

    #[test]
    fn test_shape() {
        for dimension in 1..6 {
            for size in [0, 1, 17] {
                for placement in [Placement::InCube, Placement::NearBoundary] {
                    let points: ArrayPointSet =
                        random_point_set(dimension, size, &mut seeded_rng(SEED), placement);
                    assert_eq!(points.dimension(), dimension);
                    assert_eq!(points.size(), size);
                    assert_eq!(points.coordinates().len(), dimension * size);
                }
            }
        }
    }

    #[test]
    fn test_in_cube() {
        for dimension in 1..8 {
            let points: ArrayPointSet =
                random_point_set(dimension, 500, &mut seeded_rng(SEED), Placement::InCube);
            for point in points.points() {
                for coordinate in point {
                    assert!((-1.0..=1.0).contains(coordinate));
                }
            }
        }
    }

    #[test]
    fn test_in_cube_is_not_normalized() {
        let points: ArrayPointSet =
            random_point_set(3, 200, &mut seeded_rng(SEED2), Placement::InCube);
        let lengths: Vec<_> = (0..points.size())
            .map(|i| points.squared_length(i).sqrt())
            .collect();
        assert!(lengths.iter().any(|l| *l < 0.9));
        assert!(lengths.iter().any(|l| *l > 1.1));
    }

    #[test]
    fn test_near_boundary_length() {
        for dimension in 1..8 {
            let upper = 1.0 + WIGGLE * (dimension as f64).sqrt();
            let points: ArrayPointSet = random_point_set(
                dimension,
                500,
                &mut seeded_rng(SEED),
                Placement::NearBoundary,
            );
            for i in 0..points.size() {
                let length = points.squared_length(i).sqrt();
                assert!(length >= 1.0 - 1e-12, "length {} below 1", length);
                assert!(length < upper + 1e-12, "length {} above {}", length, upper);
            }
        }
    }

    #[test]
    fn test_near_boundary_one_dimensional() {
        let points: ArrayPointSet =
            random_point_set(1, 1000, &mut seeded_rng(SEED2), Placement::NearBoundary);
        for point in points.points() {
            let length = point[0].abs();
            assert!((1.0 - 1e-12..1.01).contains(&length));
        }
    }

    #[test]
    fn test_near_boundary_f32() {
        let points: ArrayPointSet<f32> =
            random_point_set(2, 300, &mut seeded_rng(SEED), Placement::NearBoundary);
        for i in 0..points.size() {
            let length = points.squared_length(i).sqrt();
            assert!(length > 0.9999 && length < 1.0 + 0.01 * 2.0f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn test_near_boundary_applies_wiggle() {
        fn max_excess<S: Into<f64>>(lengths: impl Iterator<Item = S>) -> f64 {
            lengths.map(|l| l.into() - 1.0).fold(0.0, f64::max)
        }

        let points: ArrayPointSet =
            random_point_set(3, 200, &mut seeded_rng(SEED), Placement::NearBoundary);
        let excess = max_excess((0..points.size()).map(|i| points.squared_length(i).sqrt()));
        assert!(excess > WIGGLE / 2.0, "largest excess {}", excess);

        let points: ArrayPointSet<f32> =
            random_point_set(3, 200, &mut seeded_rng(SEED), Placement::NearBoundary);
        let excess = max_excess((0..points.size()).map(|i| points.squared_length(i).sqrt()));
        assert!(excess > WIGGLE / 2.0, "largest excess {}", excess);
    }

    #[test]
    fn test_determinism() {
        for placement in [Placement::InCube, Placement::NearBoundary] {
            let first: ArrayPointSet = random_point_set(4, 50, &mut seeded_rng(SEED), placement);
            let second: ArrayPointSet = random_point_set(4, 50, &mut seeded_rng(SEED), placement);
            let other: ArrayPointSet = random_point_set(4, 50, &mut seeded_rng(SEED2), placement);
            assert_eq!(first, second);
            assert_ne!(first, other);
        }
    }

    #[test]
    fn test_zero_dimension() {
        let points: ArrayPointSet =
            random_point_set(0, 5, &mut seeded_rng(SEED), Placement::NearBoundary);
        assert_eq!(points.size(), 5);
        assert!(points.coordinates().is_empty());
    }

    #[test]
    fn test_zero_vector_is_redrawn() {
        // The first draw is exactly one half, which maps to the coordinate 0.0.
        let half = 1u64 << 63;
        let mut rng = StepRng::new(half, 1 << 52);
        let points: ArrayPointSet = random_point_set(1, 1, &mut rng, Placement::NearBoundary);

        let length = points.coord(0, 0).abs();
        assert!(length >= 1.0 - 1e-12);
        assert!(length < 1.0 + WIGGLE);
    }
}
