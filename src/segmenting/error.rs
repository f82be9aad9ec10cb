use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Track {track}, tick {tick}: {error}")]
pub struct SegmentingError {
    pub track: usize,
    pub tick: u64,
    pub error: ErrorType,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorType {
    #[error("time signature {numerator}/2^{denominator_exponent} does not describe a measure.")]
    InvalidTimeSignature {
        numerator: u8,
        denominator_exponent: u8,
    },

    #[error(
        "{numerator}/{denominator} at {ticks_per_quarter} ticks per quarter note is not a whole number of ticks per measure."
    )]
    NonIntegralMeasure {
        numerator: u8,
        denominator: u64,
        ticks_per_quarter: u16,
    },

    #[error("zero ticks per quarter note.")]
    ZeroResolution,
}
