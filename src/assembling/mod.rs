pub mod data;
pub mod error;

use self::data::*;
use self::error::AssemblingError;
use crate::binning::data::{BinnedMeasure, BinnedTrack};
use crate::pattern_parsing::data::{Repeat, TableKind, TimingSpan};

/// Builds the repeat → measure → note tree for one matched track.
pub fn assemble(
    name: &str,
    track: usize,
    table: TableKind,
    repeats: &[Repeat],
    binned: &BinnedTrack,
) -> Result<InstrumentNotes, AssemblingError> {
    let repeats = repeats
        .iter()
        .enumerate()
        .map(|(repeat_index, repeat)| -> Result<RepeatNotes, AssemblingError> {
            let measures = match repeat {
                Repeat::Measures(indices) => {
                    measure_repeat(name, track, repeat_index, indices, binned)?
                }
                Repeat::Timing(spans) => vec![timing_repeat(name, repeat_index, spans)],
            };

            Ok(RepeatNotes {
                index: repeat_index,
                measures,
            })
        })
        .collect::<Result<Vec<RepeatNotes>, AssemblingError>>()?;

    Ok(InstrumentNotes {
        name: name.to_owned(),
        track,
        table,
        repeats,
    })
}

fn measure_repeat(
    name: &str,
    track: usize,
    repeat_index: usize,
    indices: &[usize],
    binned: &BinnedTrack,
) -> Result<Vec<MeasureNotes>, AssemblingError> {
    let mut slot_start = 0;
    let mut measures = Vec::with_capacity(indices.len());

    for &index in indices {
        let measure = binned
            .measure(index)
            .ok_or_else(|| AssemblingError::PatternReferenceOutOfRange {
                instrument: name.to_owned(),
                track,
                repeat: repeat_index,
                index,
                measure_count: binned.measures.len(),
            })?;

        measures.push(MeasureNotes {
            measure_index: Some(index),
            notes: measure_notes(name, repeat_index, measure, slot_start),
        });

        slot_start += measure.span.length();
    }

    Ok(measures)
}

fn measure_notes(
    name: &str,
    repeat_index: usize,
    measure: &BinnedMeasure,
    slot_start: u64,
) -> Vec<NoteDescriptor> {
    let first_onset = match measure.first_onset() {
        Some(onset) => onset,
        None => return Vec::new(),
    };

    measure
        .notes
        .iter()
        .map(|note| NoteDescriptor {
            instrument: name.to_owned(),
            repeat_index,
            measure_index: Some(measure.index),
            pitch: Some(note.pitch),
            local_offset: note.onset - first_onset,
            slot_start,
            duration: note.duration(),
        })
        .collect()
}

fn timing_repeat(name: &str, repeat_index: usize, spans: &[TimingSpan]) -> MeasureNotes {
    MeasureNotes {
        measure_index: None,
        notes: spans
            .iter()
            .map(|span| NoteDescriptor {
                instrument: name.to_owned(),
                repeat_index,
                measure_index: None,
                pitch: None,
                local_offset: span.start,
                slot_start: 0,
                duration: span.end.saturating_sub(span.start),
            })
            .collect(),
    }
}
