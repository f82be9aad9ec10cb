use crate::decoding::data::Note;
use crate::segmenting::data::Measure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinnedMeasure {
    pub index: usize,
    pub span: Measure,
    pub notes: Vec<Note>,
}

impl BinnedMeasure {
    pub fn first_onset(&self) -> Option<u64> {
        self.notes.first().map(|note| note.onset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinnedTrack {
    pub measures: Vec<BinnedMeasure>,
    /// Notes whose onset falls outside every measure.
    pub orphans: Vec<Note>,
}

impl BinnedTrack {
    pub fn measure(&self, index: usize) -> Option<&BinnedMeasure> {
        self.measures.get(index)
    }
}
