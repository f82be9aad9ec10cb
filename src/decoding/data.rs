/// A time signature as carried by the MIDI meta event: the denominator is
/// stored as a power-of-two exponent, so `2` means a quarter note.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator_exponent: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator_exponent: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    TimeSignature(TimeSignature),
    Tempo { micros_per_quarter: u32 },
    Text(String),
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8 },
    Other { channel: Option<u8> },
}

impl EventKind {
    pub fn channel(&self) -> Option<u8> {
        match *self {
            EventKind::NoteOn { channel, .. } | EventKind::NoteOff { channel, .. } => Some(channel),
            EventKind::Other { channel } => channel,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub tick: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub index: usize,
    pub events: Vec<TimedEvent>,
}

impl Track {
    pub fn time_signatures(&self) -> impl Iterator<Item = (u64, TimeSignature)> + '_ {
        self.events.iter().filter_map(|event| match event.kind {
            EventKind::TimeSignature(signature) => Some((event.tick, signature)),
            _ => None,
        })
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|event| event.tick)
    }
}

/// A whole MIDI file with every delta time resolved to an absolute tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub ticks_per_quarter: u16,
    pub tracks: Vec<Track>,
}

impl Timeline {
    /// Tempo of the first tempo event in the file, 120 BPM if there is none.
    pub fn initial_bpm(&self) -> f64 {
        const MICROSECONDS_PER_MIN: f64 = 60_000_000.0;

        self.tracks
            .iter()
            .flat_map(|track| track.events.iter())
            .filter_map(|event| match event.kind {
                EventKind::Tempo { micros_per_quarter } => Some((event.tick, micros_per_quarter)),
                _ => None,
            })
            .min_by_key(|&(tick, _)| tick)
            .map(|(_, micros)| MICROSECONDS_PER_MIN / f64::from(micros.max(1)))
            .unwrap_or(120.0)
    }
}

/// A sounded note, its note-off already attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Note {
    pub pitch: u8,
    pub velocity: u8,
    pub channel: u8,
    pub onset: u64,
    pub offset: u64,
}

impl Note {
    pub fn duration(&self) -> u64 {
        self.offset - self.onset
    }
}

/// A note-on that was never released before the end of its track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnresolvedNote {
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
    pub onset: u64,
}

/// A note-off that had no note-on to close.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StrayNoteOff {
    pub channel: u8,
    pub pitch: u8,
    pub tick: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedNotes {
    pub notes: Vec<Note>,
    pub unresolved: Vec<UnresolvedNote>,
    pub stray_offs: Vec<StrayNoteOff>,
}

/// What to do with a note-on that is never released.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnresolvedNotes {
    Reject,
    /// Keep the note with its offset equal to its onset.
    ZeroLength,
}

impl Default for UnresolvedNotes {
    fn default() -> Self {
        UnresolvedNotes::Reject
    }
}
