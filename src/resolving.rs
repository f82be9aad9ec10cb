use crate::decoding::data::{EventKind, Track};
use crate::pattern_parsing::data::{PatternTable, Repeat, TableKind};

/// Which table wins when an instrument name appears in both.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Precedence {
    DrumsFirst,
    InstrumentsFirst,
}

impl Default for Precedence {
    fn default() -> Self {
        Precedence::DrumsFirst
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Drums(&'a [Repeat]),
    Instruments(&'a [Repeat]),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn table(&self) -> Option<TableKind> {
        match self {
            Resolution::Drums(_) => Some(TableKind::Drums),
            Resolution::Instruments(_) => Some(TableKind::Instruments),
            Resolution::NotFound => None,
        }
    }

    pub fn repeats(&self) -> &'a [Repeat] {
        match *self {
            Resolution::Drums(repeats) | Resolution::Instruments(repeats) => repeats,
            Resolution::NotFound => &[],
        }
    }
}

/// Both pattern tables behind a single name lookup.
#[derive(Debug, Copy, Clone)]
pub struct Lookup<'a> {
    drums: &'a PatternTable,
    instruments: &'a PatternTable,
    precedence: Precedence,
}

impl<'a> Lookup<'a> {
    pub fn new(
        drums: &'a PatternTable,
        instruments: &'a PatternTable,
        precedence: Precedence,
    ) -> Self {
        Lookup {
            drums,
            instruments,
            precedence,
        }
    }

    pub fn resolve(&self, name: &str) -> Resolution<'a> {
        let drums = self.drums.get(name).map(Resolution::Drums);
        let instruments = self.instruments.get(name).map(Resolution::Instruments);

        let found = match self.precedence {
            Precedence::DrumsFirst => drums.or(instruments),
            Precedence::InstrumentsFirst => instruments.or(drums),
        };

        found.unwrap_or(Resolution::NotFound)
    }

    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.drums.get(name).is_some() && self.instruments.get(name).is_some()
    }
}

/// Name under which a track is looked up in the pattern tables.
///
/// The first text event wins, prefixed with the track index (`"2 Bass"`).
/// Without one, the zero-based channel of the first channel event is used
/// (`"9"`). A track with neither has no name.
pub fn instrument_name(track: &Track) -> Option<String> {
    let text = track.events.iter().find_map(|event| match event.kind {
        EventKind::Text(ref text) => Some(text.trim()),
        _ => None,
    });

    match text {
        Some(text) => Some(format!("{} {}", track.index, text)),
        None => track
            .events
            .iter()
            .find_map(|event| event.kind.channel())
            .map(|channel| channel.to_string()),
    }
}
