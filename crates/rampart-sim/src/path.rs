//! Path model: the immutable, ordered waypoint polyline enemies walk.
//!
//! Supplied per map by the map layer and never mutated during a session.

use glam::DVec2;
use thiserror::Error;

use rampart_core::types::Position;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("a path needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint {index} is not a finite, non-negative coordinate")]
    InvalidWaypoint { index: usize },
    #[error("path has zero total length")]
    ZeroLength,
}

/// Ordered waypoints plus precomputed cumulative distances.
#[derive(Debug, Clone)]
pub struct PathModel {
    waypoints: Vec<DVec2>,
    /// `cumulative[i]` is the walking distance from the first waypoint to
    /// waypoint `i`.
    cumulative: Vec<f64>,
}

impl PathModel {
    pub fn new(points: impl IntoIterator<Item = Position>) -> Result<Self, PathError> {
        let waypoints: Vec<DVec2> = points.into_iter().map(Position::to_vec).collect();
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints(waypoints.len()));
        }
        if let Some(index) = waypoints
            .iter()
            .position(|p| !p.is_finite() || p.x < 0.0 || p.y < 0.0)
        {
            return Err(PathError::InvalidWaypoint { index });
        }

        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in waypoints.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        if total <= 0.0 {
            return Err(PathError::ZeroLength);
        }

        Ok(Self {
            waypoints,
            cumulative,
        })
    }

    /// Total walking distance from the first to the last waypoint.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> DVec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> DVec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Segment index and offset within it for a distance along the path.
    /// Distances outside the path are clamped to its ends.
    pub fn locate(&self, distance: f64) -> (usize, f64) {
        let last_segment = self.waypoints.len() - 2;
        let d = distance.clamp(0.0, self.length());
        let segment = self
            .cumulative
            .partition_point(|&c| c <= d)
            .saturating_sub(1)
            .min(last_segment);
        (segment, d - self.cumulative[segment])
    }

    /// Point on the path at the given walking distance.
    pub fn position_at(&self, distance: f64) -> DVec2 {
        let (segment, offset) = self.locate(distance);
        let a = self.waypoints[segment];
        let b = self.waypoints[segment + 1];
        let segment_length = self.cumulative[segment + 1] - self.cumulative[segment];
        if segment_length <= 0.0 {
            return a;
        }
        a + (b - a) * (offset / segment_length)
    }

    /// Fraction of the path covered at the given distance, 0..=1.
    pub fn fraction_at(&self, distance: f64) -> f64 {
        (distance / self.length()).clamp(0.0, 1.0)
    }
}
