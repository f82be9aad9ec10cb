pub mod data;

use self::data::*;
use crate::decoding::data::Note;
use crate::segmenting::data::Measure;

/// Places each note in the measure containing its onset.
///
/// `measures` must be ordered and non-overlapping. A note sounding across a
/// bar line stays in the measure it started in.
pub fn bin(notes: &[Note], measures: &[Measure]) -> BinnedTrack {
    let mut binned = BinnedTrack {
        measures: measures
            .iter()
            .enumerate()
            .map(|(index, &span)| BinnedMeasure {
                index,
                span,
                notes: Vec::new(),
            })
            .collect(),
        orphans: Vec::new(),
    };

    for &note in notes {
        let after = measures.partition_point(|measure| measure.start <= note.onset);

        match after.checked_sub(1) {
            Some(index) if measures[index].contains(note.onset) => {
                binned.measures[index].notes.push(note)
            }
            _ => binned.orphans.push(note),
        }
    }

    for measure in &mut binned.measures {
        measure.notes.sort_by_key(|note| (note.onset, note.pitch));
    }

    binned
}
