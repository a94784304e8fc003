use geo_traits::CoordTrait;
use num_traits::ToPrimitive;

/// A trait for types that can be stored in a [`KDTree`][crate::kdtree::KDTree].
///
/// Implementors describe a point with a fixed number of dimensions, a coordinate accessor
/// per dimension and a squared distance metric. Equality is only used by
/// [`nearest`][crate::kdtree::KDTreeIndex::nearest] to skip a stored point that equals the
/// query.
///
/// Coordinates must be finite. Queries over points with NaN or infinite coordinates are
/// not detected and return unspecified results; it is the caller's responsibility to
/// filter such points before building a tree.
///
/// ```
/// use kd_index::KDTreePoint;
///
/// #[derive(Debug, PartialEq)]
/// struct Star {
///     name: &'static str,
///     position: [f64; 3],
/// }
///
/// impl KDTreePoint for Star {
///     const DIMENSIONS: usize = 3;
///
///     fn coordinate(&self, dim: usize) -> f64 {
///         self.position[dim]
///     }
/// }
///
/// let sun = Star { name: "sun", position: [0., 0., 0.] };
/// let alpha = Star { name: "alpha", position: [1., 2., 2.] };
/// assert_eq!(sun.squared_distance(&alpha), 9.);
/// ```
pub trait KDTreePoint: PartialEq {
    /// The number of dimensions of every point of this type.
    const DIMENSIONS: usize;

    /// The coordinate of this point along `dim`, for `dim` in `0..Self::DIMENSIONS`.
    fn coordinate(&self, dim: usize) -> f64;

    /// The squared distance between this point and `other`.
    ///
    /// Must be symmetric, non-negative and zero only for points that are equal in every
    /// coordinate. The default is the squared Euclidean distance over all dimensions.
    #[inline]
    fn squared_distance(&self, other: &Self) -> f64 {
        (0..Self::DIMENSIONS)
            .map(|dim| {
                let d = self.coordinate(dim) - other.coordinate(dim);
                d * d
            })
            .sum()
    }
}

impl<N: ToPrimitive + Copy + PartialEq, const D: usize> KDTreePoint for [N; D] {
    const DIMENSIONS: usize = D;

    #[inline]
    fn coordinate(&self, dim: usize) -> f64 {
        self[dim].to_f64().unwrap_or(f64::NAN)
    }
}

/// A single 2D coordinate.
///
/// Wraps any [`CoordTrait`] implementation so that it can be indexed in a
/// [`KDTree`][crate::kdtree::KDTree].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord<N> {
    /// The x coordinate
    pub x: N,
    /// The y coordinate
    pub y: N,
}

impl<N: Copy> Coord<N> {
    /// Create a new coordinate.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Copy the x and y values out of any geo-traits coordinate.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self {
            x: coord.x(),
            y: coord.y(),
        }
    }
}

impl<N: Copy> CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

impl<N: ToPrimitive + Copy + PartialEq> KDTreePoint for Coord<N> {
    const DIMENSIONS: usize = 2;

    #[inline]
    fn coordinate(&self, dim: usize) -> f64 {
        let value = match dim {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        };
        value.to_f64().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn array_squared_distance() {
        let a = [0i32, 0, 0];
        let b = [1i32, 2, 2];
        assert_eq!(a.squared_distance(&b), 9.);
        assert_eq!(b.squared_distance(&a), 9.);
        assert_eq!(a.squared_distance(&a), 0.);
    }

    #[test]
    fn coord_from_geo_traits() {
        // geo-traits implements CoordTrait for (T, T)
        let coord = Coord::from_coord(&(3.0_f64, 4.0_f64));
        assert_eq!(coord, Coord::new(3., 4.));
        assert_eq!(coord.coordinate(0), 3.);
        assert_eq!(coord.coordinate(1), 4.);
        assert_eq!(coord.squared_distance(&Coord::new(0., 0.)), 25.);
    }
}
