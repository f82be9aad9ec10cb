use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which of the two pattern documents an entry came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Drums,
    Instruments,
}

impl TableKind {
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Drums => "drum-patterns.json",
            TableKind::Instruments => "other-patterns.json",
        }
    }
}

/// A note of a canonical pattern layout, in ticks from the pattern start.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingSpan {
    #[serde(rename = "Item1")]
    pub start: u64,
    #[serde(rename = "Item2")]
    pub end: u64,
}

/// One occurrence of an instrument's pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repeat {
    /// Indices of the track's measures realising this occurrence, in order.
    Measures(Vec<usize>),
    /// Note spans laid out directly, without consulting the MIDI measures.
    Timing(Vec<TimingSpan>),
}

/// The record shape written by the pattern analysis export.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternRecord {
    #[serde(rename = "TrackName", default)]
    pub track_name: Option<String>,
    #[serde(rename = "TrackNumber", default)]
    pub track_number: Option<i64>,
    #[serde(rename = "BaseTimingPattern", default)]
    pub base_timing_pattern: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    pub kind: TableKind,
    pub entries: BTreeMap<String, Vec<Repeat>>,
}

impl PatternTable {
    pub fn empty(kind: TableKind) -> Self {
        PatternTable {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, instrument: &str) -> Option<&[Repeat]> {
        self.entries.get(instrument).map(Vec::as_slice)
    }
}
