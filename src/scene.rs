use crate::bezier::{interpolate_bezier, BezierCurve};
use crate::clip::ClipRegion;
use crate::path::curves_from_coords;
use crate::projection::Projection;
use crate::types::{PlanarPoint, SphericalCoord, Star};

/// One drawable element. Groups nest through their element list, so the
/// scene is a tree with insertion order defining z-order.
#[derive(Debug)]
pub enum Element {
    Group(Group),
    Object {
        id: String,
        pos: PlanarPoint,
        mag: f64,
    },
    ProportionalObject {
        pos: PlanarPoint,
        radius: f64,
        label: String,
    },
    DirectedObject {
        pos: PlanarPoint,
        dir: PlanarPoint,
    },
    Rect {
        start: PlanarPoint,
        size: PlanarPoint,
    },
    Path(BezierCurve),
    Text {
        body: String,
        pos: PlanarPoint,
    },
}

#[derive(Debug)]
pub struct Group {
    pub class: String,
    pub id: String,
    pub elements: Vec<Element>,
}

impl Group {
    pub fn new(class: &str, id: &str) -> Self {
        Self {
            class: class.to_string(),
            id: id.to_string(),
            elements: Vec::new(),
        }
    }
}

pub struct Scene {
    root: Group,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Group::new("", "root"),
        }
    }

    pub fn add_group(&mut self, group: Group) {
        self.root.elements.push(Element::Group(group));
    }

    pub fn root(&self) -> &Group {
        &self.root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Meridian,
    Parallel,
}

/// A coordinate grid request, angles in degrees. `step` spaces the grid
/// lines, `density` spaces the samples along each line.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub name: String,
    pub plane: Plane,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub density: f64,
}

pub fn build_grid(projection: &Projection, clip: &ClipRegion, grid: &GridSpec) -> Group {
    let mut group = Group::new("grid", &grid.name);
    match grid.plane {
        Plane::Parallel => {
            let mut dec = grid.start;
            while dec <= grid.end {
                let mut path = Vec::new();
                let mut ra = 0.0;
                while ra < 360.1 {
                    path.push(SphericalCoord::from_degrees(ra, dec));
                    ra += grid.density;
                }
                for curve in curves_from_coords(projection, &path, clip) {
                    group.elements.push(Element::Path(curve));
                }
                dec += grid.step;
            }
        }
        Plane::Meridian => {
            let mut ra = 0.0;
            while ra <= 360.1 {
                let mut path = Vec::new();
                let mut dec = grid.start;
                while dec <= grid.end {
                    path.push(SphericalCoord::from_degrees(ra, dec));
                    dec += grid.density;
                }
                for curve in curves_from_coords(projection, &path, clip) {
                    group.elements.push(Element::Path(curve));
                }
                ra += grid.step;
            }
        }
    }
    group
}

/// Coordinate labels along one grid line. `base` fixes the crossing
/// coordinate, `start..=end` by `step` sweeps the labelled one, all in
/// degrees.
#[derive(Debug, Clone)]
pub struct TickSpec {
    pub name: String,
    pub plane: Plane,
    pub base: f64,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub as_hours: bool,
}

pub fn build_ticks(projection: &Projection, tick: &TickSpec) -> Group {
    let mut group = Group::new("tick", &tick.name);
    let mut v = tick.start;
    while v <= tick.end {
        let coord = match tick.plane {
            Plane::Parallel => SphericalCoord::from_degrees(v, tick.base),
            Plane::Meridian => SphericalCoord::from_degrees(tick.base, v),
        };
        if let Some(pos) = projection.project(coord) {
            group.elements.push(Element::Text {
                body: stringify_angle(v, tick.as_hours),
                pos,
            });
        }
        v += tick.step;
    }
    group
}

fn stringify_angle(deg: f64, as_hours: bool) -> String {
    if as_hours {
        format!("{:.0}h", deg / 15.0)
    } else {
        format!("{deg:.0}°")
    }
}

/// Assemble a track from externally supplied positions. Every
/// `tick_every`-th anchor of an unclipped fit over the valid points
/// carries a tick mark along the local perpendicular; zero disables
/// ticks.
pub fn build_track(
    projection: &Projection,
    clip: &ClipRegion,
    name: &str,
    coords: &[SphericalCoord],
    tick_every: usize,
) -> Group {
    let mut group = Group::new("track", name);

    for curve in curves_from_coords(projection, coords, clip) {
        group.elements.push(Element::Path(curve));
    }

    if tick_every > 0 {
        let valid: Vec<PlanarPoint> = coords
            .iter()
            .filter_map(|&c| projection.project(c))
            .collect();
        if valid.len() >= 2 {
            let fitted: BezierCurve = interpolate_bezier(&valid);
            for point in fitted.iter().step_by(tick_every) {
                group.elements.push(Element::DirectedObject {
                    pos: point.p,
                    dir: point.perpendicular,
                });
            }
        }
    }

    group
}

/// One magnitude-sized object per star that projects; singular positions
/// are skipped silently.
pub fn build_stars(name: &str, projection: &Projection, stars: &[Star]) -> Group {
    let mut group = Group::new("catalog", name);
    for star in stars {
        if let Some(pos) = projection.project(star.pos) {
            group.elements.push(Element::Object {
                id: star.id.clone(),
                pos,
                mag: star.mag,
            });
        }
    }
    group
}

/// A labelled disk of a given angular radius, sized through the local
/// projection scale. `None` when the position or the scale probe does not
/// project.
pub fn build_marker(
    projection: &Projection,
    pos: SphericalCoord,
    radius_deg: f64,
    label: &str,
) -> Option<Element> {
    let center = projection.project(pos)?;
    let scale = projection.scale_at_point(pos)?;
    Some(Element::ProportionalObject {
        pos: center,
        radius: radius_deg.to_radians() * scale,
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionKind;
    use crate::test_utils::{approx, square_canvas};

    fn projection() -> Projection {
        Projection::new(
            ProjectionKind::AzimuthalEquidistant,
            square_canvas(),
            SphericalCoord::from_degrees(90.0, 90.0),
            SphericalCoord::from_degrees(0.0, 0.0),
        )
        .unwrap()
    }

    fn clip() -> ClipRegion {
        ClipRegion::for_canvas(square_canvas(), 0.0)
    }

    #[test]
    fn grid_groups_carry_only_paths() {
        let grid = GridSpec {
            name: "equatorial".to_string(),
            plane: Plane::Parallel,
            start: -60.0,
            end: 60.0,
            step: 30.0,
            density: 5.0,
        };
        let group = build_grid(&projection(), &clip(), &grid);
        assert_eq!(group.class, "grid");
        assert_eq!(group.id, "equatorial");
        assert!(!group.elements.is_empty());
        assert!(group
            .elements
            .iter()
            .all(|e| matches!(e, Element::Path(_))));
    }

    #[test]
    fn meridian_grid_produces_lines_through_the_center_region() {
        let grid = GridSpec {
            name: "meridians".to_string(),
            plane: Plane::Meridian,
            start: -90.0,
            end: 90.0,
            step: 90.0,
            density: 5.0,
        };
        let group = build_grid(&projection(), &clip(), &grid);
        assert!(!group.elements.is_empty());
    }

    #[test]
    fn track_ticks_follow_the_requested_cadence() {
        let coords: Vec<SphericalCoord> = (-4..=4)
            .map(|i| SphericalCoord::from_degrees(i as f64 * 5.0, 0.0))
            .collect();
        let group = build_track(&projection(), &clip(), "comet", &coords, 2);

        let paths = group
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Path(_)))
            .count();
        let ticks = group
            .elements
            .iter()
            .filter(|e| matches!(e, Element::DirectedObject { .. }))
            .count();
        assert_eq!(paths, 1);
        // 9 anchors, every 2nd starting at the first
        assert_eq!(ticks, 5);
    }

    #[test]
    fn track_without_ticks_has_only_paths() {
        let coords = vec![
            SphericalCoord::from_degrees(-5.0, 0.0),
            SphericalCoord::from_degrees(5.0, 0.0),
        ];
        let group = build_track(&projection(), &clip(), "t", &coords, 0);
        assert!(group
            .elements
            .iter()
            .all(|e| matches!(e, Element::Path(_))));
    }

    #[test]
    fn stars_skip_singular_positions() {
        let stars = vec![
            Star {
                id: "near".to_string(),
                pos: SphericalCoord::from_degrees(10.0, 10.0),
                mag: 1.0,
            },
            Star {
                id: "antipode".to_string(),
                pos: SphericalCoord::from_degrees(180.0, 0.0),
                mag: 2.0,
            },
        ];
        let group = build_stars("test", &projection(), &stars);
        assert_eq!(group.class, "catalog");
        assert_eq!(group.elements.len(), 1);
    }

    #[test]
    fn marker_radius_follows_the_local_scale() {
        // at the center of a 90°-fov chart the scale is 50 units per
        // 90°, so a 9° radius covers 5 canvas units
        let marker = build_marker(
            &projection(),
            SphericalCoord::from_degrees(0.0, 0.0),
            9.0,
            "mars",
        )
        .unwrap();
        match marker {
            Element::ProportionalObject { radius, label, .. } => {
                assert!(approx(radius, 5.0, 1e-9));
                assert_eq!(label, "mars");
            }
            other => panic!("expected a proportional object, got {other:?}"),
        }
    }

    #[test]
    fn tick_labels_project_along_their_base_line() {
        let tick = TickSpec {
            name: "ra-labels".to_string(),
            plane: Plane::Parallel,
            base: 0.0,
            start: 0.0,
            end: 90.0,
            step: 15.0,
            as_hours: true,
        };
        let group = build_ticks(&projection(), &tick);
        assert_eq!(group.class, "tick");
        // 0h..6h inclusive, all on the near side of the sphere
        assert_eq!(group.elements.len(), 7);
        match &group.elements[1] {
            Element::Text { body, pos } => {
                assert_eq!(body, "1h");
                assert!(approx(pos.x, -50.0 * 15.0 / 90.0, 1e-9));
            }
            other => panic!("expected a text label, got {other:?}"),
        }
    }

    #[test]
    fn tick_labels_stringify_degrees_with_sign() {
        let tick = TickSpec {
            name: "dec-labels".to_string(),
            plane: Plane::Meridian,
            base: 0.0,
            start: -30.0,
            end: 30.0,
            step: 30.0,
            as_hours: false,
        };
        let group = build_ticks(&projection(), &tick);
        let labels: Vec<&str> = group
            .elements
            .iter()
            .map(|e| match e {
                Element::Text { body, .. } => body.as_str(),
                other => panic!("expected a text label, got {other:?}"),
            })
            .collect();
        assert_eq!(labels, vec!["-30°", "0°", "30°"]);
    }

    #[test]
    fn scene_preserves_group_submission_order() {
        let mut scene = Scene::new();
        scene.add_group(Group::new("grid", "first"));
        scene.add_group(Group::new("track", "second"));
        let ids: Vec<&str> = scene
            .root()
            .elements
            .iter()
            .map(|e| match e {
                Element::Group(g) => g.id.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
