use std::ops::{Add, Div, Mul, Neg, Sub};

/// Direction on the celestial sphere, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    pub ra: f64,
    pub dec: f64,
}

impl SphericalCoord {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra: ra_deg.to_radians(),
            dec: dec_deg.to_radians(),
        }
    }
}

/// Canvas-space point. Coordinates are centered: (0, 0) is the chart
/// center, +y is down. A point that could not be projected is represented
/// as `Option<PlanarPoint>::None`, never as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, rhs: PlanarPoint) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl Add for PlanarPoint {
    type Output = PlanarPoint;
    fn add(self, rhs: PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PlanarPoint {
    type Output = PlanarPoint;
    fn sub(self, rhs: PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PlanarPoint {
    type Output = PlanarPoint;
    fn mul(self, s: f64) -> PlanarPoint {
        PlanarPoint::new(self.x * s, self.y * s)
    }
}

impl Div<f64> for PlanarPoint {
    type Output = PlanarPoint;
    fn div(self, s: f64) -> PlanarPoint {
        PlanarPoint::new(self.x / s, self.y / s)
    }
}

impl Neg for PlanarPoint {
    type Output = PlanarPoint;
    fn neg(self) -> PlanarPoint {
        PlanarPoint::new(-self.x, -self.y)
    }
}

/// One catalogue entry as supplied by the star-list producer.
#[derive(Debug, Clone)]
pub struct Star {
    pub id: String,
    pub pos: SphericalCoord,
    pub mag: f64,
}

// Small helpers used by multiple modules
pub fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    s.parse::<T>().unwrap_or(default)
}

pub fn hours_to_degrees(hours: f64) -> f64 {
    hours * 15.0
}

pub fn sexagesimal_hms_to_hours(h: f64, m: f64, s: f64) -> f64 {
    h + (m * 60.0 + s) / 3600.0
}

pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
    let ad = d.abs();
    sign * (ad + (m * 60.0 + s) / 3600.0)
}

pub fn parse_hms(s: &str) -> Option<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parse_or(parts[0], 0.0),
        parse_or(parts[1], 0.0),
        parse_or(parts[2], 0.0),
    ))
}

pub fn parse_dms(s: &str) -> Option<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parse_or(parts[0], 0.0),
        parse_or(parts[1], 0.0),
        parse_or(parts[2], 0.0),
    ))
}
