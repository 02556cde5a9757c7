//! Board coordinates and coordinate lists

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based board coordinates, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a move was played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovePoint {
    #[default]
    Pass,
    At(Point),
}

impl MovePoint {
    pub fn point(self) -> Option<Point> {
        match self {
            MovePoint::Pass => None,
            MovePoint::At(point) => Some(point),
        }
    }

    pub fn is_pass(self) -> bool {
        self == MovePoint::Pass
    }
}

impl From<Point> for MovePoint {
    fn from(point: Point) -> Self {
        MovePoint::At(point)
    }
}

/// Extra move data for games whose moves have several parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovePayload {
    /// The queen moves from the move point to `queen_to`, then shoots
    /// an arrow to `arrow_to`.
    Amazons { queen_to: Point, arrow_to: Point },
}

/// Sorted, duplicate-free list of board points
///
/// Two lists holding the same points always compare equal, no matter
/// in which order the points were collected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointList(Vec<Point>);

impl PointList {
    pub fn new(mut points: Vec<Point>) -> Self {
        points.sort_unstable();
        points.dedup();
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.0.binary_search(&point).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    /// `None` for an empty list, which is how property setters spell
    /// "remove the property".
    pub fn non_empty(self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl FromIterator<Point> for PointList {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointList {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_list_is_canonical() {
        let first = PointList::new(vec![Point::new(2, 2), Point::new(0, 0), Point::new(2, 2)]);
        let second: PointList = [Point::new(0, 0), Point::new(2, 2)].into_iter().collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first.contains(Point::new(2, 2)));
        assert!(!first.contains(Point::new(1, 1)));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(PointList::default().non_empty(), None);
        assert!(PointList::new(vec![Point::new(1, 1)]).non_empty().is_some());
    }

    #[test]
    fn test_move_point() {
        assert!(MovePoint::Pass.is_pass());
        assert_eq!(MovePoint::from(Point::new(3, 4)).point(), Some(Point::new(3, 4)));
    }
}
