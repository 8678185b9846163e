use std::f64::consts::PI;

use phf::phf_map;

use crate::error::ChartError;
use crate::types::{PlanarPoint, SphericalCoord};

// Angular separations closer to PI than this are treated as antipodal.
const ANTIPODE_EPSILON: f64 = 1e-9;

// RA offset used by the finite-difference scale estimate (0.1 degrees).
const SCALE_PROBE_DELTA: f64 = 0.1 * PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    AzimuthalEquidistant,
    CylindricalEquidistant,
}

// The projection set is closed; new kinds are added here, not registered
// at runtime.
static PROJECTIONS: phf::Map<&'static str, ProjectionKind> = phf_map! {
    "azimuthalequidistant" => ProjectionKind::AzimuthalEquidistant,
    "cylindricalequidistant" => ProjectionKind::CylindricalEquidistant,
};

/// Leveling rotation, stored as the sine/cosine of the angle applied by
/// `project`. The identity until `rotate_to_level` is called.
#[derive(Debug, Clone, Copy)]
struct Level {
    sin: f64,
    cos: f64,
}

impl Level {
    fn identity() -> Self {
        Self { sin: 0.0, cos: 1.0 }
    }

    fn is_identity(&self) -> bool {
        self.sin == 0.0 && self.cos == 1.0
    }

    fn rotate(&self, p: PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(
            p.x * self.cos - p.y * self.sin,
            p.x * self.sin + p.y * self.cos,
        )
    }
}

/// Maps spherical directions to canvas points. Canvas coordinates are
/// centered with +y down; right ascension increases leftward. Field-of-view
/// axes are center-to-edge angles: a point offset by the configured fov
/// lands on the canvas half-extent of that axis.
pub struct Projection {
    kind: ProjectionKind,
    canvas: PlanarPoint,
    fov: SphericalCoord,
    center: SphericalCoord,
    level: Level,
}

impl Projection {
    /// Look up a projection kind by its configuration name
    /// (case-insensitive) and construct it.
    pub fn create(
        name: &str,
        canvas: PlanarPoint,
        fov: SphericalCoord,
        center: SphericalCoord,
    ) -> Result<Self, ChartError> {
        let kind = PROJECTIONS
            .get(name.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| ChartError::UnknownProjection(name.to_string()))?;
        Self::new(kind, canvas, fov, center)
    }

    /// A zero fov axis is derived from the other so the angular aspect
    /// ratio matches the canvas aspect ratio; both zero is fatal.
    pub fn new(
        kind: ProjectionKind,
        canvas: PlanarPoint,
        mut fov: SphericalCoord,
        center: SphericalCoord,
    ) -> Result<Self, ChartError> {
        if fov.ra == 0.0 {
            if fov.dec == 0.0 {
                return Err(ChartError::InvalidFieldOfView);
            }
            fov.ra = fov.dec * canvas.x / canvas.y;
        } else if fov.dec == 0.0 {
            fov.dec = fov.ra * canvas.y / canvas.x;
        }

        Ok(Self {
            kind,
            canvas,
            fov,
            center,
            level: Level::identity(),
        })
    }

    pub fn project(&self, pos: SphericalCoord) -> Option<PlanarPoint> {
        match self.kind {
            ProjectionKind::AzimuthalEquidistant => self.project_azimuthal(pos),
            ProjectionKind::CylindricalEquidistant => Some(self.project_cylindrical(pos)),
        }
    }

    fn project_azimuthal(&self, pos: SphericalCoord) -> Option<PlanarPoint> {
        let d_ra = pos.ra - self.center.ra;

        // Spherical law of cosines for the separation from the center
        let cos_c = (self.center.dec.sin() * pos.dec.sin()
            + self.center.dec.cos() * pos.dec.cos() * d_ra.cos())
        .clamp(-1.0, 1.0);
        let c = cos_c.acos();

        // The antipode of the center is a genuine mapping singularity
        if PI - c < ANTIPODE_EPSILON {
            return None;
        }

        let k = if c == 0.0 { 1.0 } else { c / c.sin() };
        let x = k * pos.dec.cos() * d_ra.sin();
        let y = k
            * (self.center.dec.cos() * pos.dec.sin()
                - self.center.dec.sin() * pos.dec.cos() * d_ra.cos());

        Some(self.level.rotate(self.to_canvas(x, y)))
    }

    fn project_cylindrical(&self, pos: SphericalCoord) -> PlanarPoint {
        let (ra, dec) = if self.level.is_identity() {
            (pos.ra, pos.dec)
        } else {
            // Leveling rotates the sphere about the center direction
            let v = rodrigues(unit3(pos), unit3(self.center), self.level.sin, self.level.cos);
            (v[1].atan2(v[0]), v[2].clamp(-1.0, 1.0).asin())
        };

        // Normalize the ra difference into (-PI, PI] to avoid seam artifacts
        let d_ra = wrap_pm_pi(ra - self.center.ra);
        let d_dec = dec - self.center.dec;

        self.to_canvas(d_ra, d_dec)
    }

    // negate x, because right ascension increases leftward;
    // negate y, because canvas y grows downward
    fn to_canvas(&self, x: f64, y: f64) -> PlanarPoint {
        PlanarPoint::new(
            -x * (self.canvas.x / 2.0) / self.fov.ra,
            -y * (self.canvas.y / 2.0) / self.fov.dec,
        )
    }

    /// Local angular scale at `pos` in canvas units per radian of right
    /// ascension, estimated by finite differences. Approximate, but good
    /// enough to size angularly-specified objects at chart scale.
    pub fn scale_at_point(&self, pos: SphericalCoord) -> Option<f64> {
        let probe = SphericalCoord::new(pos.ra + SCALE_PROBE_DELTA, pos.dec);
        let p1 = self.project(pos)?;
        let p2 = self.project(probe)?;
        Some((p1.x - p2.x) / SCALE_PROBE_DELTA)
    }

    /// Store the rotation that renders the chord between `begin` and `end`
    /// horizontal. Set once, before the projection is used; repeated calls
    /// measure the chord under the previous rotation and are not
    /// meaningful.
    pub fn rotate_to_level(
        &mut self,
        begin: SphericalCoord,
        end: SphericalCoord,
    ) -> Result<(), ChartError> {
        let a = self
            .project(begin)
            .ok_or(ChartError::UnprojectableLevelReference)?;
        let b = self
            .project(end)
            .ok_or(ChartError::UnprojectableLevelReference)?;

        let chord = b - a;
        let len = chord.norm();
        if len == 0.0 {
            return Err(ChartError::DegenerateLevelReference);
        }

        // Rotation by the negated chord angle levels the chord
        self.level = Level {
            sin: -chord.y / len,
            cos: chord.x / len,
        };
        Ok(())
    }

    /// Canvas-unit threshold above which consecutive projected points are
    /// treated as a path discontinuity.
    pub fn max_distance(&self) -> f64 {
        self.canvas.x / 2.0
    }
}

fn unit3(c: SphericalCoord) -> [f64; 3] {
    [
        c.dec.cos() * c.ra.cos(),
        c.dec.cos() * c.ra.sin(),
        c.dec.sin(),
    ]
}

// v' = v cos(t) + (axis x v) sin(t) + axis (axis . v) (1 - cos(t))
fn rodrigues(v: [f64; 3], axis: [f64; 3], sin: f64, cos: f64) -> [f64; 3] {
    let cross = [
        axis[1] * v[2] - axis[2] * v[1],
        axis[2] * v[0] - axis[0] * v[2],
        axis[0] * v[1] - axis[1] * v[0],
    ];
    let dot = axis[0] * v[0] + axis[1] * v[1] + axis[2] * v[2];
    let rest = dot * (1.0 - cos);
    [
        v[0] * cos + cross[0] * sin + axis[0] * rest,
        v[1] * cos + cross[1] * sin + axis[1] * rest,
        v[2] * cos + cross[2] * sin + axis[2] * rest,
    ]
}

fn wrap_pm_pi(a: f64) -> f64 {
    let r = a.rem_euclid(2.0 * PI);
    if r > PI {
        r - 2.0 * PI
    } else {
        r
    }
}
