use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("cannot compute a bounding box for an empty entity set")]
    InvalidGeometry,
    #[error("unknown reaction role: {0}")]
    UnknownRole(String),
    #[error("reaction references unknown entity: {0}")]
    UnknownEntity(String),
    #[error("duplicate entity id: {0}")]
    DuplicateEntity(String),
    #[error("invalid diagram config: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
