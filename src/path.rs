use crate::bezier::{interpolate_bezier, BezierCurve};
use crate::clip::{clip_curve, ClipRegion};
use crate::projection::Projection;
use crate::types::{PlanarPoint, SphericalCoord};

/// Split one logical path of projected points into maximal runs of valid,
/// sufficiently-close points.
///
/// An invalid point closes the current run and is discarded. A valid point
/// farther than `max_distance` from its predecessor closes the run at the
/// predecessor and seeds the next run. Exact consecutive duplicates are
/// dropped so the bezier fit never sees a zero-length segment. Runs
/// shorter than two points cannot carry a curve and are discarded.
pub fn split_runs(points: &[Option<PlanarPoint>], max_distance: f64) -> Vec<Vec<PlanarPoint>> {
    let mut runs: Vec<Vec<PlanarPoint>> = Vec::new();
    let mut run: Vec<PlanarPoint> = Vec::new();

    for point in points {
        match point {
            None => {
                if run.len() >= 2 {
                    runs.push(std::mem::take(&mut run));
                } else {
                    run.clear();
                }
            }
            Some(p) => {
                if let Some(&prev) = run.last() {
                    if prev == *p {
                        continue;
                    }
                    if (*p - prev).norm() > max_distance {
                        if run.len() >= 2 {
                            runs.push(std::mem::take(&mut run));
                        } else {
                            run.clear();
                        }
                    }
                }
                run.push(*p);
            }
        }
    }

    if run.len() >= 2 {
        runs.push(run);
    }
    runs
}

/// Project, segment, interpolate and clip one logical path of planar
/// points.
pub fn curves_from_points(
    points: &[Option<PlanarPoint>],
    max_distance: f64,
    clip: &ClipRegion,
) -> Vec<BezierCurve> {
    split_runs(points, max_distance)
        .iter()
        .map(|run| interpolate_bezier(run))
        .flat_map(|curve| clip_curve(&curve, clip))
        .collect()
}

/// Full pipeline for a path given in spherical coordinates.
pub fn curves_from_coords(
    projection: &Projection,
    path: &[SphericalCoord],
    clip: &ClipRegion,
) -> Vec<BezierCurve> {
    let projected: Vec<Option<PlanarPoint>> =
        path.iter().map(|&c| projection.project(c)).collect();
    curves_from_points(&projected, projection.max_distance(), clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionKind;
    use crate::test_utils::square_canvas;

    fn pt(x: f64, y: f64) -> Option<PlanarPoint> {
        Some(PlanarPoint::new(x, y))
    }

    #[test]
    fn invalid_point_splits_a_path_into_two_runs() {
        let points = vec![
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            None,
            pt(3.0, 0.0),
            pt(4.0, 0.0),
        ];
        let runs = split_runs(&points, 100.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![PlanarPoint::new(0.0, 0.0), PlanarPoint::new(1.0, 0.0)]);
        assert_eq!(runs[1], vec![PlanarPoint::new(3.0, 0.0), PlanarPoint::new(4.0, 0.0)]);
    }

    #[test]
    fn over_threshold_jump_seeds_the_next_run() {
        let points = vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(100.0, 0.0), pt(101.0, 0.0)];
        let runs = split_runs(&points, 50.0);
        assert_eq!(runs.len(), 2);
        // the far point is kept as the start of the new run
        assert_eq!(runs[1][0], PlanarPoint::new(100.0, 0.0));
    }

    #[test]
    fn single_point_runs_are_discarded() {
        let points = vec![pt(0.0, 0.0), None, pt(3.0, 0.0)];
        assert!(split_runs(&points, 100.0).is_empty());
    }

    #[test]
    fn exact_duplicates_are_dropped_within_a_run() {
        let points = vec![pt(0.0, 0.0), pt(0.0, 0.0), pt(1.0, 0.0)];
        let runs = split_runs(&points, 100.0);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 2);
    }

    #[test]
    fn curves_from_points_preserves_anchor_order() {
        let points = vec![
            pt(-10.0, 0.0),
            pt(0.0, 5.0),
            None,
            pt(10.0, 0.0),
            pt(20.0, 5.0),
        ];
        let clip = ClipRegion::for_canvas(square_canvas(), 0.0);
        let curves = curves_from_points(&points, 100.0, &clip);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0][0].p, PlanarPoint::new(-10.0, 0.0));
        assert_eq!(curves[0][1].p, PlanarPoint::new(0.0, 5.0));
        assert_eq!(curves[1][0].p, PlanarPoint::new(10.0, 0.0));
        assert_eq!(curves[1][1].p, PlanarPoint::new(20.0, 5.0));
    }

    #[test]
    fn coords_pipeline_drops_the_antipode_silently() {
        let projection = Projection::new(
            ProjectionKind::AzimuthalEquidistant,
            square_canvas(),
            SphericalCoord::from_degrees(360.0, 360.0),
            SphericalCoord::from_degrees(0.0, 0.0),
        )
        .unwrap();
        let clip = ClipRegion::for_canvas(square_canvas(), 0.0);

        let path = vec![
            SphericalCoord::from_degrees(160.0, 0.0),
            SphericalCoord::from_degrees(170.0, 0.0),
            SphericalCoord::from_degrees(180.0, 0.0),
            SphericalCoord::from_degrees(190.0, 0.0),
            SphericalCoord::from_degrees(200.0, 0.0),
        ];
        let curves = curves_from_coords(&projection, &path, &clip);
        // the antipodal sample vanishes; its neighbors survive as two runs
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].len(), 2);
        assert_eq!(curves[1].len(), 2);
    }
}
