use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("endpoint index {0} is out of range, expected 0..8")]
    EndpointIndexOutOfRange(i32),
    #[error("edge index {0} is out of range, expected 0..12")]
    EdgeIndexOutOfRange(i32),
}
