use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    #[error("SMPTE timecode division ({division}) is not supported, only ticks per quarter note.")]
    UnsupportedTiming { division: i16 },

    #[error("The file declares zero ticks per quarter note.")]
    ZeroDivision,

    #[error(
        "Track {track}: note {pitch} on channel {channel} starting at tick {onset} is never released."
    )]
    UnresolvedNoteOff {
        track: usize,
        channel: u8,
        pitch: u8,
        onset: u64,
    },
}
