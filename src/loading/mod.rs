pub mod error;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use rimd::SMF;

use self::error::LoadingError;
use crate::decoding::{self, data::Timeline};
use crate::pattern_parsing::{self, data::PatternTable, data::TableKind};
use crate::Error;

lazy_static! {
    static ref MIDI_FILE_NAME: Regex =
        Regex::new(r"(?i)\.midi?$").expect("Failed to compile MIDI file name regex");
}

/// Everything one run reads from its input directory.
#[derive(Debug)]
pub struct Inputs {
    pub midi_path: PathBuf,
    pub timeline: Timeline,
    pub drums: PatternTable,
    pub instruments: PatternTable,
}

/// The first `.mid`/`.midi` file in `directory`, in file name order.
pub fn find_midi_file(directory: &Path) -> Result<PathBuf, LoadingError> {
    let entries = fs::read_dir(directory).map_err(|err| LoadingError::InputNotFound {
        path: directory.to_owned(),
        reason: err.to_string(),
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| MIDI_FILE_NAME.is_match(name))
        })
        .collect();

    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| LoadingError::NoMidiFile {
            directory: directory.to_owned(),
        })
}

pub fn read_timeline(path: &Path) -> Result<Timeline, LoadingError> {
    let bytes = fs::read(path).map_err(|err| LoadingError::InputNotFound {
        path: path.to_owned(),
        reason: err.to_string(),
    })?;

    let smf = SMF::from_reader(&mut Cursor::new(bytes)).map_err(|err| LoadingError::MidiRead {
        path: path.to_owned(),
        reason: err.to_string(),
    })?;

    decoding::decode(&smf).map_err(|source| LoadingError::Timing {
        path: path.to_owned(),
        source,
    })
}

pub fn read_table(directory: &Path, kind: TableKind) -> Result<PatternTable, Error> {
    let path = directory.join(kind.file_name());

    let json = fs::read_to_string(&path).map_err(|err| LoadingError::InputNotFound {
        path: path.clone(),
        reason: err.to_string(),
    })?;

    Ok(pattern_parsing::parse_table(&json, kind)?)
}

/// Reads the MIDI file and both pattern tables from `directory`.
pub fn load(directory: &Path) -> Result<Inputs, Error> {
    let midi_path = find_midi_file(directory)?;
    let timeline = read_timeline(&midi_path)?;
    let drums = read_table(directory, TableKind::Drums)?;
    let instruments = read_table(directory, TableKind::Instruments)?;

    Ok(Inputs {
        midi_path,
        timeline,
        drums,
        instruments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midi_names_match_case_insensitively() {
        for name in &["song.mid", "SONG.MID", "take 2.midi", "a.b.Mid"] {
            assert!(MIDI_FILE_NAME.is_match(name), "{}", name);
        }

        for name in &["song.mid.json", "drum-patterns.json", "mid", "song.midx"] {
            assert!(!MIDI_FILE_NAME.is_match(name), "{}", name);
        }
    }

    #[test]
    fn missing_directory_is_input_not_found() {
        let result = find_midi_file(Path::new("/definitely/not/a/real/directory"));
        assert!(matches!(result, Err(LoadingError::InputNotFound { .. })));
    }
}
