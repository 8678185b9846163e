use thiserror::Error;

/// Fatal configuration errors. Any of these aborts the render before
/// output is produced; recoverable conditions (projection singularities)
/// never surface here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("need at least one non-zero field-of-view dimension")]
    InvalidFieldOfView,

    #[error("unknown projection '{0}'. Use: azimuthalequidistant | cylindricalequidistant")]
    UnknownProjection(String),

    #[error("leveling reference point does not project onto the canvas")]
    UnprojectableLevelReference,

    #[error("leveling reference points project to the same canvas position")]
    DegenerateLevelReference,
}
