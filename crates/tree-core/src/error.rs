use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("card artwork {width}x{height} exceeds {max} px")]
    ArtworkTooLarge { width: u32, height: u32, max: u32 },
    #[error("artwork buffer is {actual} bytes, expected {expected}")]
    ArtworkSize { expected: usize, actual: usize },
}
