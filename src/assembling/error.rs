use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblingError {
    #[error(
        "Instrument `{instrument}` (track {track}), repeat {repeat}: measure {index} does not exist, the track has {measure_count} measures."
    )]
    PatternReferenceOutOfRange {
        instrument: String,
        track: usize,
        repeat: usize,
        index: usize,
        measure_count: usize,
    },
}
