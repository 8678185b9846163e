use crate::bezier::{BezierCurve, BezierPoint};
use crate::types::PlanarPoint;

// Out-code bits, in clipping priority order.
const TOP: u8 = 0b0001;
const BOTTOM: u8 = 0b0010;
const RIGHT: u8 = 0b0100;
const LEFT: u8 = 0b1000;

/// Canvas rectangle expanded by the margin. Canvas coordinates are
/// centered, +y down, so "top" is the minimum-y edge.
#[derive(Debug, Clone, Copy)]
pub struct ClipRegion {
    pub min: PlanarPoint,
    pub max: PlanarPoint,
}

impl ClipRegion {
    pub fn for_canvas(canvas: PlanarPoint, margin: f64) -> Self {
        Self {
            min: PlanarPoint::new(-canvas.x / 2.0 - margin, -canvas.y / 2.0 - margin),
            max: PlanarPoint::new(canvas.x / 2.0 + margin, canvas.y / 2.0 + margin),
        }
    }

    pub fn contains(&self, p: PlanarPoint) -> bool {
        self.outcode(p) == 0
    }

    fn outcode(&self, p: PlanarPoint) -> u8 {
        let mut code = 0;
        if p.y < self.min.y {
            code |= TOP;
        }
        if p.y > self.max.y {
            code |= BOTTOM;
        }
        if p.x > self.max.x {
            code |= RIGHT;
        }
        if p.x < self.min.x {
            code |= LEFT;
        }
        code
    }

    // Clip the endpoint carrying `code` against its highest-priority
    // violated edge.
    fn clip_to_edge(&self, code: u8, a: PlanarPoint, b: PlanarPoint) -> PlanarPoint {
        if code & TOP != 0 {
            PlanarPoint::new(
                a.x + (b.x - a.x) * (self.min.y - a.y) / (b.y - a.y),
                self.min.y,
            )
        } else if code & BOTTOM != 0 {
            PlanarPoint::new(
                a.x + (b.x - a.x) * (self.max.y - a.y) / (b.y - a.y),
                self.max.y,
            )
        } else if code & RIGHT != 0 {
            PlanarPoint::new(
                self.max.x,
                a.y + (b.y - a.y) * (self.max.x - a.x) / (b.x - a.x),
            )
        } else {
            PlanarPoint::new(
                self.min.x,
                a.y + (b.y - a.y) * (self.min.x - a.x) / (b.x - a.x),
            )
        }
    }

    /// Cohen-Sutherland clip of a single segment. Returns the visible part,
    /// or `None` if the segment misses the region entirely.
    fn clip_segment(&self, mut a: PlanarPoint, mut b: PlanarPoint) -> Option<(PlanarPoint, PlanarPoint)> {
        let mut code_a = self.outcode(a);
        let mut code_b = self.outcode(b);

        loop {
            if code_a | code_b == 0 {
                return Some((a, b));
            }
            if code_a & code_b != 0 {
                return None;
            }
            if code_a != 0 {
                a = self.clip_to_edge(code_a, a, b);
                code_a = self.outcode(a);
            } else {
                b = self.clip_to_edge(code_b, b, a);
                code_b = self.outcode(b);
            }
        }
    }
}

// A clipped boundary anchor: controls collapse onto the substituted
// position, the perpendicular is kept from the endpoint it replaces.
fn boundary_point(p: PlanarPoint, original: &BezierPoint) -> BezierPoint {
    BezierPoint {
        p,
        cm: p,
        cp: p,
        perpendicular: original.perpendicular,
    }
}

/// Clip a fitted curve to the region, anchor pair by anchor pair. Fully
/// invisible stretches are dropped, and two visible fragments separated by
/// an invisible stretch are never reconnected. A curve already fully
/// inside comes back as a single unchanged fragment.
pub fn clip_curve(curve: &BezierCurve, region: &ClipRegion) -> Vec<BezierCurve> {
    let mut out: Vec<BezierCurve> = Vec::new();
    let mut current: Option<BezierCurve> = None;

    for pair in curve.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);

        let Some((pa, pb)) = region.clip_segment(a.p, b.p) else {
            if let Some(c) = current.take() {
                out.push(c);
            }
            continue;
        };

        let mut fragment = if pa != a.p {
            // visibility starts inside this segment
            if let Some(c) = current.take() {
                out.push(c);
            }
            vec![boundary_point(pa, a)]
        } else {
            current.take().unwrap_or_else(|| vec![*a])
        };

        if pb != b.p {
            fragment.push(boundary_point(pb, b));
            out.push(fragment);
        } else {
            fragment.push(*b);
            current = Some(fragment);
        }
    }

    if let Some(c) = current.take() {
        out.push(c);
    }
    out
}
