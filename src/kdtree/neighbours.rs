//! Accumulators threaded through the branch-and-bound search.

use crate::kdtree::traversal::Collector;
use crate::r#type::KDTreePoint;

/// A fixed-capacity collection of the closest values seen so far, sorted by ascending
/// distance.
///
/// Holds at most [`goal_number`][Neighbours::goal_number] entries. Appending is done by
/// value: [`append`][Neighbours::append] consumes the collection and returns the updated one.
///
/// The relative order of entries with equal distances is implementation-defined.
///
/// ```
/// use kd_index::kdtree::Neighbours;
///
/// let neighbours = Neighbours::new(2)
///     .append("far", 9.)
///     .append("near", 1.)
///     .append("middle", 4.);
///
/// assert!(neighbours.is_full());
/// assert_eq!(neighbours.biggest_distance(), 4.);
/// assert_eq!(neighbours.into_values(), vec!["near", "middle"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbours<T> {
    nearest_values: Vec<(T, f64)>,
    goal_number: usize,
}

impl<T> Neighbours<T> {
    /// Create an empty collection holding at most `goal_number` values.
    pub fn new(goal_number: usize) -> Self {
        Self {
            nearest_values: Vec::new(),
            goal_number,
        }
    }

    /// The maximum number of values kept.
    pub fn goal_number(&self) -> usize {
        self.goal_number
    }

    /// The number of values currently kept.
    pub fn len(&self) -> usize {
        self.nearest_values.len()
    }

    /// Returns `true` if no value has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.nearest_values.is_empty()
    }

    /// Returns `true` once [`goal_number`][Neighbours::goal_number] values are kept.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.nearest_values.len() >= self.goal_number
    }

    /// The distance of the worst value kept, or infinity if nothing is kept.
    #[inline]
    pub fn biggest_distance(&self) -> f64 {
        self.nearest_values
            .last()
            .map_or(f64::INFINITY, |(_, distance)| *distance)
    }

    /// The distance a new value has to beat to be kept.
    ///
    /// Infinite until the collection is full: before that, any value is kept.
    #[inline]
    pub fn search_bound(&self) -> f64 {
        if self.is_full() {
            self.biggest_distance()
        } else {
            f64::INFINITY
        }
    }

    /// Insert `value` at its position by `distance`, dropping the worst value if the
    /// collection grows beyond its goal number.
    ///
    /// If the collection is full and `distance` is not smaller than
    /// [`biggest_distance`][Neighbours::biggest_distance], it is returned unchanged.
    #[must_use]
    pub fn append(mut self, value: T, distance: f64) -> Self {
        if self.is_full() && distance >= self.biggest_distance() {
            return self;
        }

        let index = self
            .nearest_values
            .iter()
            .position(|(_, existing)| *existing >= distance)
            .unwrap_or(self.nearest_values.len());
        self.nearest_values.insert(index, (value, distance));
        if self.nearest_values.len() > self.goal_number {
            self.nearest_values.pop();
        }
        self
    }

    /// The kept values with their distances, in ascending distance order.
    pub fn as_slice(&self) -> &[(T, f64)] {
        &self.nearest_values
    }

    /// Consume this collection, returning the values with their distances.
    pub fn into_inner(self) -> Vec<(T, f64)> {
        self.nearest_values
    }

    /// Consume this collection, returning the values in ascending distance order.
    pub fn into_values(self) -> Vec<T> {
        self.nearest_values
            .into_iter()
            .map(|(value, _)| value)
            .collect()
    }
}

impl<'a, E: KDTreePoint> Collector<'a, E> for Neighbours<&'a E> {
    #[inline]
    fn consider(self, value: &'a E, query: &E) -> Self {
        let distance = value.squared_distance(query);
        self.append(value, distance)
    }

    #[inline]
    fn bound(&self) -> f64 {
        self.search_bound()
    }
}

/// The single closest value seen so far that is strictly within a maximum distance.
///
/// Never accepts a value equal to the query point.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Closest<T> {
    value: Option<T>,
    distance: f64,
}

impl<T> Closest<T> {
    /// Only values closer than `max_distance` are accepted.
    pub(crate) fn within(max_distance: f64) -> Self {
        Self {
            value: None,
            distance: max_distance,
        }
    }

    pub(crate) fn into_inner(self) -> Option<(T, f64)> {
        let distance = self.distance;
        self.value.map(|value| (value, distance))
    }
}

impl<'a, E: KDTreePoint> Collector<'a, E> for Closest<&'a E> {
    #[inline]
    fn consider(self, value: &'a E, query: &E) -> Self {
        if value == query {
            return self;
        }
        let distance = value.squared_distance(query);
        if distance < self.distance {
            Self {
                value: Some(value),
                distance,
            }
        } else {
            self
        }
    }

    #[inline]
    fn bound(&self) -> f64 {
        self.distance
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_ascending_order() {
        let neighbours = Neighbours::new(10)
            .append('c', 3.)
            .append('a', 1.)
            .append('d', 4.)
            .append('b', 2.);

        assert_eq!(neighbours.len(), 4);
        assert!(!neighbours.is_full());
        assert_eq!(neighbours.biggest_distance(), 4.);
        assert_eq!(
            neighbours.as_slice(),
            &[('a', 1.), ('b', 2.), ('c', 3.), ('d', 4.)]
        );
    }

    #[test]
    fn drops_worst_when_over_goal() {
        let neighbours = Neighbours::new(2)
            .append('c', 3.)
            .append('b', 2.)
            .append('a', 1.);

        assert!(neighbours.is_full());
        assert_eq!(neighbours.len(), 2);
        assert_eq!(neighbours.into_values(), vec!['a', 'b']);
    }

    #[test]
    fn full_collection_ignores_worse_values() {
        let full = Neighbours::new(2).append('a', 1.).append('b', 2.);
        let unchanged = full.clone().append('c', 2.).append('d', 7.);
        assert_eq!(unchanged, full);
    }

    #[test]
    fn empty_collection() {
        let neighbours = Neighbours::<char>::new(3);
        assert!(neighbours.is_empty());
        assert!(!neighbours.is_full());
        assert_eq!(neighbours.biggest_distance(), f64::INFINITY);
        assert_eq!(neighbours.search_bound(), f64::INFINITY);
    }

    #[test]
    fn search_bound_is_infinite_until_full() {
        let neighbours = Neighbours::new(3).append('a', 1.).append('b', 2.);
        assert_eq!(neighbours.biggest_distance(), 2.);
        assert_eq!(neighbours.search_bound(), f64::INFINITY);

        let neighbours = neighbours.append('c', 5.);
        assert_eq!(neighbours.search_bound(), 5.);
    }

    #[test]
    fn zero_goal_keeps_nothing() {
        let neighbours = Neighbours::new(0).append('a', 1.);
        assert!(neighbours.is_empty());
        assert!(neighbours.is_full());
    }

    #[test]
    fn closest_skips_query_and_respects_bound() {
        let query = [1., 1.];
        let same = [1., 1.];
        let near = [2., 2.];
        let far = [4., 4.];

        let closest = Closest::<&[f64; 2]>::within(f64::INFINITY)
            .consider(&same, &query)
            .consider(&far, &query)
            .consider(&near, &query);
        assert_eq!(closest.into_inner(), Some((&near, 2.)));

        let closest = Closest::<&[f64; 2]>::within(2.).consider(&near, &query);
        assert_eq!(closest.into_inner(), None);
    }
}
