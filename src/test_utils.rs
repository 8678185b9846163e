use crate::types::PlanarPoint;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

pub fn approx_pt(a: PlanarPoint, b: PlanarPoint, eps: f64) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps)
}

pub fn square_canvas() -> PlanarPoint {
    PlanarPoint::new(100.0, 100.0)
}
