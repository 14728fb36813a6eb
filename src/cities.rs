//! Distance oracle and the planar city set implementing it.
//!
//! The GA core only ever talks to a [`DistanceOracle`]: it asks how many
//! cities exist and how long a given visiting order is. [`Cities`] is the
//! concrete oracle for points in the plane, loadable from whitespace
//! separated `x y` files (`.tsv`).

use crate::error::{Result, TspError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Provides tour lengths to the GA without exposing coordinates.
pub trait DistanceOracle {
    /// Number of cities available for permutation.
    fn city_count(&self) -> usize;

    /// Total distance travelled when visiting cities in `ordering`.
    ///
    /// Whether the tour is closed or open is up to the implementation.
    fn total_path_distance(&self, ordering: &[usize]) -> f64;
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn city_count(&self) -> usize {
        (**self).city_count()
    }

    fn total_path_distance(&self, ordering: &[usize]) -> f64 {
        (**self).total_path_distance(ordering)
    }
}

/// A city location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A set of cities with closed-tour Euclidean distances.
///
/// # Examples
///
/// ```
/// use tsp_deme::{Cities, DistanceOracle, Point};
///
/// let cities = Cities::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(3.0, 4.0),
/// ]);
/// assert_eq!(cities.city_count(), 3);
/// assert!((cities.total_path_distance(&[0, 1, 2]) - 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cities {
    points: Vec<Point>,
}

impl Cities {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Parses cities from a reader, one `x y` pair per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Any other line
    /// must contain exactly two numbers separated by whitespace.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut points = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            points.push(parse_point(trimmed, idx + 1)?);
        }

        tracing::debug!(cities = points.len(), "parsed city list");
        Ok(Self { points })
    }

    /// Loads cities from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl DistanceOracle for Cities {
    fn city_count(&self) -> usize {
        self.points.len()
    }

    /// Closed tour: includes the leg from the last city back to the first.
    ///
    /// Returns `NaN` if `ordering` names a city index past the end of the
    /// set; fitness then reports it as a degenerate distance.
    fn total_path_distance(&self, ordering: &[usize]) -> f64 {
        let Some(&last) = ordering.last() else {
            return 0.0;
        };
        let Some(mut prev) = self.points.get(last) else {
            return f64::NAN;
        };

        let mut total = 0.0;
        for &idx in ordering {
            let Some(point) = self.points.get(idx) else {
                return f64::NAN;
            };
            total += prev.distance_to(point);
            prev = point;
        }
        total
    }
}

fn parse_point(line: &str, line_no: usize) -> Result<Point> {
    let mut fields = line.split_whitespace();
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(TspError::Parse {
            line: line_no,
            message: format!("expected two coordinates, got `{line}`"),
        });
    };

    let parse = |field: &str| {
        field.parse::<f64>().map_err(|e| TspError::Parse {
            line: line_no,
            message: format!("invalid coordinate `{field}`: {e}"),
        })
    };

    Ok(Point::new(parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn unit_square() -> Cities {
        Cities::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_closed_tour_distance() {
        let cities = unit_square();
        assert!((cities.total_path_distance(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);

        let crossing = 2.0 + 2.0 * 2f64.sqrt();
        assert!((cities.total_path_distance(&[0, 2, 1, 3]) - crossing).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_does_not_change_length() {
        let cities = unit_square();
        let a = cities.total_path_distance(&[0, 1, 2, 3]);
        let b = cities.total_path_distance(&[2, 3, 0, 1]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_short_orderings_have_zero_length() {
        let cities = unit_square();
        assert_eq!(cities.total_path_distance(&[]), 0.0);
        assert_eq!(cities.total_path_distance(&[2]), 0.0);
    }

    #[test]
    fn test_unknown_city_index_is_nan() {
        let cities = unit_square();
        assert!(cities.total_path_distance(&[0, 1, 2, 3, 4]).is_nan());
        assert!(cities.total_path_distance(&[7]).is_nan());
        assert!(cities.total_path_distance(&[4, 0, 1, 2]).is_nan());
    }

    #[test]
    fn test_parse_tsv() {
        let input = "# five cities\n0\t0\n3\t0\n\n3\t4\n-1.5 2.25\n";
        let cities = Cities::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(cities.city_count(), 4);
        assert_eq!(cities.points()[3], Point::new(-1.5, 2.25));
    }

    #[test]
    fn test_parse_rejects_missing_coordinate() {
        let err = Cities::from_reader(Cursor::new("0 0\n7\n")).unwrap_err();
        match err {
            TspError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_extra_field() {
        let err = Cities::from_reader(Cursor::new("1 2 3\n")).unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_non_number() {
        let err = Cities::from_reader(Cursor::new("1 two\n")).unwrap_err();
        assert!(err.to_string().contains("invalid coordinate `two`"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Cities::from_path("/definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }

    #[test]
    fn test_oracle_through_reference() {
        fn count<O: DistanceOracle>(oracle: O) -> usize {
            oracle.city_count()
        }

        let cities = unit_square();
        assert_eq!(count(&cities), 4);
        let dynamic: &dyn DistanceOracle = &cities;
        assert_eq!(count(dynamic), 4);
    }
}
