//! Lays out a MIDI performance and its pattern tables as 3D note boxes.
//!
//! Each track is cut into measures, its notes are binned by onset, and the
//! measures named by the track's pattern repeats become boxes: pitch on y,
//! time on z, one column of repeats per instrument along x.

pub mod assembling;
pub mod binning;
pub mod colors;
pub mod decoding;
pub mod error;
pub mod layout_generation;
pub mod loading;
pub mod notes;
pub mod pattern_parsing;
pub mod resolving;
pub mod segmenting;

#[cfg(test)]
mod test_helpers;

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::assembling::data::InstrumentNotes;
use crate::binning::data::BinnedTrack;
use crate::decoding::data::{Timeline, Track, UnresolvedNotes};
use crate::layout_generation::data::{LayoutOptions, Scene};
use crate::pattern_parsing::data::{PatternTable, Repeat, TableKind};
use crate::resolving::{Lookup, Precedence};
use crate::segmenting::data::Advance;

pub use crate::error::Error;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Options {
    pub advance: Advance,
    /// Segment every track with the time signatures of track 0 as well.
    pub conductor_signatures: bool,
    pub unresolved_notes: UnresolvedNotes,
    pub precedence: Precedence,
    pub layout: LayoutOptions,
}

/// Something odd in the input that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    AmbiguousInstrument { name: String, chosen: TableKind },
    OrphanedNotes { track: usize, count: usize, first_onset: u64 },
    ZeroLengthNotes { track: usize, count: usize },
    StrayNoteOffs { track: usize, count: usize },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Warning::AmbiguousInstrument { name, chosen } => write!(
                f,
                "`{}` is in both pattern tables, using {}.",
                name,
                chosen.file_name()
            ),
            Warning::OrphanedNotes {
                track,
                count,
                first_onset,
            } => write!(
                f,
                "Track {}: {} notes start after the last measure (first at tick {}) and were left out.",
                track, count, first_onset
            ),
            Warning::ZeroLengthNotes { track, count } => write!(
                f,
                "Track {}: {} notes are never released and were kept with zero length.",
                track, count
            ),
            Warning::StrayNoteOffs { track, count } => write!(
                f,
                "Track {}: {} note-offs had no note to release.",
                track, count
            ),
        }
    }
}

/// A track that no pattern table entry asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTrack {
    pub track: usize,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub instruments: Vec<InstrumentNotes>,
    pub scene: Scene,
    pub skipped: Vec<SkippedTrack>,
    pub warnings: Vec<Warning>,
}

/// Segments `track`, pairs its notes and bins them into its measures.
pub fn bin_track(
    timeline: &Timeline,
    track: &Track,
    options: &Options,
    warnings: &mut Vec<Warning>,
) -> Result<BinnedTrack, Error> {
    let conductor = if options.conductor_signatures {
        timeline.tracks.first()
    } else {
        None
    };

    let measures = segmenting::segment_track(
        track,
        conductor,
        timeline.ticks_per_quarter,
        options.advance,
    )?;

    let paired = decoding::pair_notes(track);

    if !paired.stray_offs.is_empty() {
        warnings.push(Warning::StrayNoteOffs {
            track: track.index,
            count: paired.stray_offs.len(),
        });
    }

    if !paired.unresolved.is_empty() && options.unresolved_notes == UnresolvedNotes::ZeroLength {
        warnings.push(Warning::ZeroLengthNotes {
            track: track.index,
            count: paired.unresolved.len(),
        });
    }

    let notes = paired.settle(track.index, options.unresolved_notes)?;
    let binned = binning::bin(&notes, &measures);

    if let Some(first) = binned.orphans.first() {
        warnings.push(Warning::OrphanedNotes {
            track: track.index,
            count: binned.orphans.len(),
            first_onset: first.onset,
        });
    }

    Ok(binned)
}

fn needs_measures(repeats: &[Repeat]) -> bool {
    repeats.iter().any(|repeat| match repeat {
        Repeat::Measures(indices) => !indices.is_empty(),
        Repeat::Timing(_) => false,
    })
}

/// Matches every track against the pattern tables and lays out the result.
pub fn visualize(
    timeline: &Timeline,
    drums: &PatternTable,
    instruments: &PatternTable,
    options: &Options,
) -> Result<Output, Error> {
    let lookup = Lookup::new(drums, instruments, options.precedence);

    let mut assembled = Vec::new();
    let mut skipped = Vec::new();
    let mut warnings = Vec::new();

    for track in &timeline.tracks {
        let name = match resolving::instrument_name(track) {
            Some(name) => name,
            None => {
                skipped.push(SkippedTrack {
                    track: track.index,
                    name: None,
                });
                continue;
            }
        };

        let resolution = lookup.resolve(&name);

        let table = match resolution.table() {
            Some(table) => table,
            None => {
                skipped.push(SkippedTrack {
                    track: track.index,
                    name: Some(name),
                });
                continue;
            }
        };

        if lookup.is_ambiguous(&name) {
            warnings.push(Warning::AmbiguousInstrument {
                name: name.clone(),
                chosen: table,
            });
        }

        let repeats = resolution.repeats();
        let binned = if needs_measures(repeats) {
            bin_track(timeline, track, options, &mut warnings)?
        } else {
            BinnedTrack::default()
        };

        assembled.push(assembling::assemble(
            &name,
            track.index,
            table,
            repeats,
            &binned,
        )?);
    }

    let scene = layout_generation::lay_out(&assembled, &options.layout);

    Ok(Output {
        instruments: assembled,
        scene,
        skipped,
        warnings,
    })
}

/// Loads a MIDI file and its two pattern tables from `directory` and lays
/// them out.
pub fn visualize_directory(directory: &Path, options: &Options) -> Result<Output, Error> {
    let inputs = loading::load(directory)?;
    visualize(&inputs.timeline, &inputs.drums, &inputs.instruments, options)
}
