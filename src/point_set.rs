use std::fmt::Debug;
use std::str::FromStr;

use num_traits::{Float, Zero};

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// A coordinate type that can be stored in a point set.
///
/// Coordinates are always real numbers. This type should usually be either `f32` or `f64`.
pub trait Coordinate: Float + FromStr + Debug {}

impl<T> Coordinate for T where T: Float + FromStr + Debug {}

/// Read access to a fixed-shape collection of `size()` points, each with `dimension()` coordinates.
///
/// Both [random_point_set](crate::random_point_set) and
/// [read_point_set](crate::read_point_set) produce point sets through [PointSetMut]. Solvers only
/// need this trait to consume them.
pub trait PointSet {
    /// The number type used by this point set.
    type Scalar: Coordinate;

    /// Returns the number of coordinates of every point.
    fn dimension(&self) -> usize;

    /// Returns the number of points.
    fn size(&self) -> usize;

    /// Returns coordinate `coordinate` of point `point`.
    ///
    /// # Panics
    /// Panics if `point >= self.size()` or `coordinate >= self.dimension()`.
    fn coord(&self, point: usize, coordinate: usize) -> Self::Scalar;

    /// Returns `true` if the set contains no points.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the squared euclidean length of a point, interpreted as a vector from the origin.
    fn squared_length(&self, point: usize) -> Self::Scalar {
        (0..self.dimension())
            .map(|j| self.coord(point, j))
            .fold(Self::Scalar::zero(), |sum, v| sum + v * v)
    }
}

/// A point set whose shape is fixed on creation and whose coordinates can be written.
pub trait PointSetMut: PointSet + Sized {
    /// Creates a point set holding `size` points of dimension `dimension`. All coordinates
    /// start as zero.
    fn with_shape(dimension: usize, size: usize) -> Self;

    /// Overwrites coordinate `coordinate` of point `point`.
    ///
    /// # Panics
    /// Panics if `point >= self.size()` or `coordinate >= self.dimension()`.
    fn set_coord(&mut self, point: usize, coordinate: usize, value: Self::Scalar);
}

/// A point set backed by a single contiguous, row-major buffer.
///
/// # Example
/// ```
/// use miniball_points::{ArrayPointSet, PointSet, PointSetMut};
///
/// let mut points: ArrayPointSet = ArrayPointSet::with_shape(2, 3);
/// points.set_coord(1, 0, 2.0);
/// points.set_coord(1, 1, 3.0);
///
/// assert_eq!(points.size(), 3);
/// assert_eq!(points.point(1), &[2.0, 3.0]);
/// assert_eq!(points.point(2), &[0.0, 0.0]);
/// ```
///
/// With the `serde` feature, deserialization rejects data whose coordinate count differs from
/// `dimension * size`.
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(crate = "serde"))]
pub struct ArrayPointSet<S = f64> {
    dimension: usize,
    size: usize,
    coordinates: Vec<S>,
}

impl<S: Coordinate> ArrayPointSet<S> {
    /// Creates a point set from a list of rows.
    ///
    /// # Panics
    /// Panics if any row does not contain exactly `dimension` coordinates.
    pub fn from_rows<I, R>(dimension: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
    {
        let mut coordinates = Vec::new();
        let mut size = 0;
        for row in rows {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                dimension,
                "Row {} has {} coordinates, expected {}",
                size,
                row.len(),
                dimension
            );
            coordinates.extend_from_slice(row);
            size += 1;
        }
        ArrayPointSet {
            dimension,
            size,
            coordinates,
        }
    }

    /// Returns all coordinates of a single point.
    #[inline]
    pub fn point(&self, index: usize) -> &[S] {
        assert!(index < self.size, "Point index out of bounds");
        let start = index * self.dimension;
        &self.coordinates[start..start + self.dimension]
    }

    /// Iterates over all points in order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &[S]> + '_ {
        (0..self.size).map(move |index| self.point(index))
    }

    /// Returns the raw coordinate buffer. Point `i` occupies the range
    /// `i * dimension .. (i + 1) * dimension`.
    pub fn coordinates(&self) -> &[S] {
        &self.coordinates
    }

    #[inline]
    fn offset(&self, point: usize, coordinate: usize) -> usize {
        assert!(point < self.size, "Point index out of bounds");
        assert!(coordinate < self.dimension, "Coordinate index out of bounds");
        point * self.dimension + coordinate
    }
}

impl<S: Coordinate> PointSet for ArrayPointSet<S> {
    type Scalar = S;

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn coord(&self, point: usize, coordinate: usize) -> S {
        self.coordinates[self.offset(point, coordinate)]
    }
}

impl<S: Coordinate> PointSetMut for ArrayPointSet<S> {
    fn with_shape(dimension: usize, size: usize) -> Self {
        ArrayPointSet {
            dimension,
            size,
            coordinates: vec![S::zero(); dimension * size],
        }
    }

    #[inline]
    fn set_coord(&mut self, point: usize, coordinate: usize, value: S) {
        let offset = self.offset(point, coordinate);
        self.coordinates[offset] = value;
    }
}

#[cfg(feature = "serde")]
impl<'de, S: Coordinate + Deserialize<'de>> Deserialize<'de> for ArrayPointSet<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(crate = "serde", rename = "ArrayPointSet")]
        struct Unchecked<S> {
            dimension: usize,
            size: usize,
            coordinates: Vec<S>,
        }

        let Unchecked {
            dimension,
            size,
            coordinates,
        } = Unchecked::<S>::deserialize(deserializer)?;

        if dimension.checked_mul(size) != Some(coordinates.len()) {
            return Err(D::Error::custom(format_args!(
                "expected {} points of dimension {}, found {} coordinates",
                size,
                dimension,
                coordinates.len()
            )));
        }

        Ok(ArrayPointSet {
            dimension,
            size,
            coordinates,
        })
    }
}
