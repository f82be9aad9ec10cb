use crate::pattern_parsing::data::TableKind;

/// A note as handed to whatever draws it. Offsets and durations are ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDescriptor {
    pub instrument: String,
    pub repeat_index: usize,
    /// `None` for notes of a timing pattern, which has no measures.
    pub measure_index: Option<usize>,
    /// `None` for notes of a timing pattern, which has no pitches.
    pub pitch: Option<u8>,
    /// Ticks since the first note of the same measure.
    pub local_offset: u64,
    /// Where the note's measure starts on the repeat's time axis, with the
    /// repeat's measures laid end to end. Always 0 for timing patterns.
    pub slot_start: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureNotes {
    pub measure_index: Option<usize>,
    pub notes: Vec<NoteDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatNotes {
    pub index: usize,
    pub measures: Vec<MeasureNotes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentNotes {
    pub name: String,
    pub track: usize,
    pub table: TableKind,
    pub repeats: Vec<RepeatNotes>,
}

impl InstrumentNotes {
    pub fn notes(&self) -> impl Iterator<Item = &NoteDescriptor> {
        self.repeats
            .iter()
            .flat_map(|repeat| repeat.measures.iter())
            .flat_map(|measure| measure.notes.iter())
    }
}
