use thiserror::Error;

use crate::assembling::error::AssemblingError;
use crate::decoding::error::DecodingError;
use crate::loading::error::LoadingError;
use crate::pattern_parsing::error::PatternError;
use crate::segmenting::error::SegmentingError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Loading(#[from] LoadingError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error(transparent)]
    Segmenting(#[from] SegmentingError),

    #[error(transparent)]
    Patterns(#[from] PatternError),

    #[error(transparent)]
    Assembling(#[from] AssemblingError),
}
