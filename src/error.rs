use thiserror::Error;

/// Top-level error type for the geoexact kernel.
#[derive(Debug, Error)]
pub enum GeoexactError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Number(#[from] NumberError),
}

/// Errors related to geometric construction.
///
/// Absence of an intersection is never an error; intersection queries
/// report it through their result enums instead.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("coincident points cannot define a {0}")]
    CoincidentPoints(&'static str),

    #[error("collinear points cannot define a {0}")]
    CollinearPoints(&'static str),

    #[error("coplanar points cannot define a {0}")]
    CoplanarPoints(&'static str),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to numeric computations.
#[derive(Debug, Error)]
pub enum NumberError {
    #[error("square root of negative radicand {0}")]
    NegativeRadicand(String),
}

/// Convenience type alias for results using [`GeoexactError`].
pub type Result<T> = std::result::Result<T, GeoexactError>;
