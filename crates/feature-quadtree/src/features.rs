//! Ready-made [`Feature`] implementations
//!
//! - [`FeatureFn`]: wraps any pure predicate over rectangles
//! - [`CircleOutline`]: refines along the outline of a circle
//! - [`PointCluster`]: refines around clusters of sample points

use crate::{Feature, QuadtreeError, Result, bounds};
use geo::{Coord, Point, Rect};

/// Feature backed by a predicate closure
///
/// Children receive clones of the predicate, so it should be cheap to clone
/// (plain closures and closures capturing an `Arc` both are).
#[derive(Clone, Copy)]
pub struct FeatureFn<P> {
    predicate: P,
}

impl<P> std::fmt::Debug for FeatureFn<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureFn").finish_non_exhaustive()
    }
}

/// Wrap a predicate as a [`Feature`]
pub fn from_fn<P>(predicate: P) -> FeatureFn<P>
where
    P: Fn(&Rect<f64>) -> bool + Clone,
{
    FeatureFn { predicate }
}

impl<P> Feature for FeatureFn<P>
where
    P: Fn(&Rect<f64>) -> bool + Clone,
{
    fn spans_feature(&self, rect: &Rect<f64>) -> bool {
        (self.predicate)(rect)
    }

    fn instance(&self, _rect: &Rect<f64>) -> Self {
        self.clone()
    }
}

/// Outline of a circle
///
/// A rectangle spans the feature when the circle's outline passes through it:
/// some point of the rectangle lies within `radius` of the center and some
/// corner lies at or beyond it. Rectangles entirely inside or entirely outside
/// the circle are not refined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOutline {
    pub center: Coord<f64>,
    pub radius: f64,
}

impl CircleOutline {
    pub fn new(center: Coord<f64>, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite()
        {
            return Err(QuadtreeError::InvalidConfig(format!(
                "circle needs a finite center and a positive radius, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }
}

impl Feature for CircleOutline {
    fn spans_feature(&self, rect: &Rect<f64>) -> bool {
        let min = rect.min();
        let max = rect.max();

        // Closest point of the rectangle to the center
        let nearest_x = self.center.x.clamp(min.x, max.x);
        let nearest_y = self.center.y.clamp(min.y, max.y);
        let nearest = (nearest_x - self.center.x).hypot(nearest_y - self.center.y);

        // Farthest corner from the center
        let far_x = (min.x - self.center.x).abs().max((max.x - self.center.x).abs());
        let far_y = (min.y - self.center.y).abs().max((max.y - self.center.y).abs());
        let farthest = far_x.hypot(far_y);

        nearest <= self.radius && self.radius <= farthest
    }

    fn instance(&self, _rect: &Rect<f64>) -> Self {
        *self
    }
}

/// Set of sample points, refined wherever enough of them gather
///
/// Each child only keeps the points inside its own rectangle, so deeper
/// nodes test progressively smaller sets.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCluster {
    points: Vec<Point<f64>>,
    min_points: usize,
}

impl PointCluster {
    /// Create a cluster feature spanning rectangles holding at least
    /// `min_points` of `points`
    pub fn new(points: Vec<Point<f64>>, min_points: usize) -> Result<Self> {
        if min_points == 0 {
            return Err(QuadtreeError::InvalidConfig(
                "min_points must be at least 1".to_string(),
            ));
        }
        Ok(Self { points, min_points })
    }

    /// Points covered by the node carrying this payload
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    fn points_in(&self, rect: &Rect<f64>) -> impl Iterator<Item = &Point<f64>> + '_ {
        let rect = *rect;
        self.points
            .iter()
            .filter(move |p| bounds::contains_point(&rect, p))
    }
}

impl Feature for PointCluster {
    fn spans_feature(&self, rect: &Rect<f64>) -> bool {
        self.points_in(rect).take(self.min_points).count() >= self.min_points
    }

    fn instance(&self, rect: &Rect<f64>) -> Self {
        Self {
            points: self.points_in(rect).copied().collect(),
            min_points: self.min_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::try_rect;

    #[test]
    fn test_from_fn() {
        let feature = from_fn(|r| r.width() > 2.0);
        let rect = try_rect(0.0, 0.0, 4.0, 4.0).unwrap();

        assert!(feature.spans_feature(&rect));
        assert!(!feature.spans_feature(&try_rect(0.0, 0.0, 1.0, 1.0).unwrap()));

        let child = feature.instance(&rect);
        assert!(child.spans_feature(&rect));
    }

    #[test]
    fn test_circle_outline_spans() {
        let circle = CircleOutline::new(Coord { x: 0.0, y: 0.0 }, 1.0).unwrap();

        // Crossing the outline
        assert!(circle.spans_feature(&try_rect(0.5, -0.5, 1.5, 0.5).unwrap()));
        // Fully inside
        assert!(!circle.spans_feature(&try_rect(-0.1, -0.1, 0.1, 0.1).unwrap()));
        // Fully outside
        assert!(!circle.spans_feature(&try_rect(2.0, 2.0, 3.0, 3.0).unwrap()));
        // Enclosing the whole circle
        assert!(circle.spans_feature(&try_rect(-2.0, -2.0, 2.0, 2.0).unwrap()));
    }

    #[test]
    fn test_circle_outline_rejects_bad_radius() {
        let center = Coord { x: 0.0, y: 0.0 };
        assert!(CircleOutline::new(center, 0.0).is_err());
        assert!(CircleOutline::new(center, -1.0).is_err());
        assert!(CircleOutline::new(center, f64::NAN).is_err());
    }

    #[test]
    fn test_point_cluster_threshold() {
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(1.5, 1.5),
            Point::new(7.0, 7.0),
        ];
        let cluster = PointCluster::new(points, 2).unwrap();

        assert!(cluster.spans_feature(&try_rect(0.0, 0.0, 4.0, 4.0).unwrap()));
        assert!(!cluster.spans_feature(&try_rect(4.0, 4.0, 8.0, 8.0).unwrap()));
        assert!(!cluster.spans_feature(&try_rect(4.0, 0.0, 8.0, 4.0).unwrap()));
    }

    #[test]
    fn test_point_cluster_instance_narrows_points() {
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(4.0, 4.0), // On the shared corner
            Point::new(7.0, 7.0),
        ];
        let cluster = PointCluster::new(points, 1).unwrap();

        let child = cluster.instance(&try_rect(0.0, 0.0, 4.0, 4.0).unwrap());
        assert_eq!(
            child.points(),
            &[Point::new(1.0, 1.0), Point::new(4.0, 4.0)]
        );
        assert_eq!(child.min_points(), 1);

        let other = cluster.instance(&try_rect(4.0, 4.0, 8.0, 8.0).unwrap());
        assert_eq!(other.points().len(), 2);
    }

    #[test]
    fn test_point_cluster_rejects_zero_threshold() {
        assert!(matches!(
            PointCluster::new(vec![], 0),
            Err(QuadtreeError::InvalidConfig(_))
        ));
    }
}
