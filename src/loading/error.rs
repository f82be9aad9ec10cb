use std::path::PathBuf;

use thiserror::Error;

use crate::decoding::error::DecodingError;

#[derive(Debug, Error)]
pub enum LoadingError {
    #[error("No MIDI file (*.mid) found in {}.", directory.display())]
    NoMidiFile { directory: PathBuf },

    #[error("Could not read {}: {reason}", path.display())]
    InputNotFound { path: PathBuf, reason: String },

    #[error("Could not parse {} as a MIDI file: {reason}", path.display())]
    MidiRead { path: PathBuf, reason: String },

    #[error("{}: {source}", path.display())]
    Timing {
        path: PathBuf,
        source: DecodingError,
    },
}
