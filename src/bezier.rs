use crate::types::PlanarPoint;

/// One anchor of a fitted curve. `cm`/`cp` are the incoming/outgoing
/// control points of the adjoining cubic segments; `perpendicular` is a
/// unit vector orthogonal to the local tangent, used for directional tick
/// marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPoint {
    pub p: PlanarPoint,
    pub cm: PlanarPoint,
    pub cp: PlanarPoint,
    pub perpendicular: PlanarPoint,
}

/// Segment i -> i+1 is the cubic (p[i], cp[i], cm[i+1], p[i+1]).
pub type BezierCurve = Vec<BezierPoint>;

// Fraction of the chord used for the control points of a two-point curve.
const CHORD_ENDING: f64 = 0.1;

fn perpendicular_of(dir: PlanarPoint) -> PlanarPoint {
    PlanarPoint::new(-dir.y, dir.x)
}

// Ending for a curve with no interior points: both controls collapse onto
// the chord, pushed a little toward the neighbor.
fn chord_ending(first: PlanarPoint, second: PlanarPoint) -> BezierPoint {
    let mirror = second - first;
    let n = mirror.norm();
    let perpendicular = if n == 0.0 {
        PlanarPoint::new(0.0, 1.0)
    } else {
        perpendicular_of(mirror) / n
    };
    BezierPoint {
        p: first,
        cm: first - mirror * CHORD_ENDING,
        cp: first + mirror * CHORD_ENDING,
        perpendicular,
    }
}

// Ending for a curve with interior points: the neighbor's near-side
// control point, reflected through the perpendicular bisector of the
// endpoint chord, becomes the endpoint's outward control. The mirrored
// tangent keeps the boundary segment a single smooth cubic.
fn mirrored_ending(
    first: PlanarPoint,
    second: PlanarPoint,
    second_control: PlanarPoint,
) -> BezierPoint {
    let chord = second - first;
    let n = chord.norm();
    if n == 0.0 {
        return chord_ending(first, second);
    }
    let de = chord / n;
    let mid = (first + second) / 2.0;

    let w = second_control - mid;
    let outward = second_control - de * (2.0 * w.dot(de));

    BezierPoint {
        p: first,
        cm: first * 2.0 - outward,
        cp: outward,
        perpendicular: perpendicular_of(de),
    }
}

/// Fit a tangent-continuous cubic bezier through `curve`. Anchors are exact
/// copies of the input points; interpolation only shapes the tangents.
///
/// The input must hold at least two points, with no zero-length segments
/// between consecutive points (the segmenter drops exact duplicates before
/// curves reach the fit).
pub fn interpolate_bezier(curve: &[PlanarPoint]) -> BezierCurve {
    assert!(
        curve.len() >= 2,
        "trying to bezierize a curve of length {}",
        curve.len()
    );

    let mut ret: BezierCurve = Vec::with_capacity(curve.len());

    if curve.len() == 2 {
        ret.push(chord_ending(curve[0], curve[1]));
        let mut e = chord_ending(curve[1], curve[0]);
        std::mem::swap(&mut e.cm, &mut e.cp);
        ret.push(e);
        return ret;
    }

    for i in 1..curve.len() - 1 {
        let a_m = curve[i - 1];
        let a = curve[i];
        let a_p = curve[i + 1];

        let am = (a_m + a) / 2.0;
        let ap = (a + a_p) / 2.0;

        let l_m = (a - a_m).norm() / 2.0;
        let l_p = (a_p - a).norm() / 2.0;

        let secant = a_p - a_m;
        let secant_len = secant.norm();
        if secant_len == 0.0 {
            // the path doubles back exactly; keep a kink rather than
            // dividing by zero
            let incoming = a - a_m;
            ret.push(BezierPoint {
                p: a,
                cm: a,
                cp: a,
                perpendicular: perpendicular_of(incoming) / incoming.norm(),
            });
            continue;
        }

        let d = (ap - am).norm();
        let de = secant / secant_len;

        // split the tangent length between the two segments in proportion
        // to their half-lengths, so curvature adapts to uneven sampling
        let b = d * l_m / (l_m + l_p);
        let u = d * l_p / (l_m + l_p);

        ret.push(BezierPoint {
            p: a,
            cm: a - de * b,
            cp: a + de * u,
            perpendicular: perpendicular_of(de),
        });
    }

    let head = mirrored_ending(curve[0], curve[1], ret[0].cm);
    ret.insert(0, head);

    let n = curve.len();
    let mut tail = mirrored_ending(curve[n - 1], curve[n - 2], ret[n - 2].cp);
    std::mem::swap(&mut tail.cm, &mut tail.cp);
    ret.push(tail);

    ret
}
