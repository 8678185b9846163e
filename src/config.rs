use crate::types::{PlanarPoint, SphericalCoord};

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub center: SphericalCoord,
    /// Angular field of view, radians; a zero axis is derived from the
    /// canvas aspect ratio at projection construction.
    pub fov: SphericalCoord,
    /// Projection kind by configuration name.
    pub projection: String,
    /// Canvas dimensions in millimetres.
    pub canvas: PlanarPoint,
    pub margin: f64,
    pub step_ra_deg: f64,
    pub step_dec_deg: f64,
    pub grid_density_deg: f64,
    /// Two directions whose connecting chord should render horizontal.
    pub level: Option<(SphericalCoord, SphericalCoord)>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            center: SphericalCoord::from_degrees(0.0, 0.0),
            fov: SphericalCoord::from_degrees(90.0, 0.0),
            projection: "azimuthalequidistant".to_string(),
            canvas: PlanarPoint::new(240.0, 320.0),
            margin: 10.0,
            step_ra_deg: 15.0,
            step_dec_deg: 10.0,
            grid_density_deg: 2.0,
            level: None,
        }
    }
}
