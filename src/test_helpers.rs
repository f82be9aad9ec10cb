use rimd::{Event, MetaEvent, MidiMessage, SMFFormat, TrackEvent, SMF};

use crate::decoding::data::*;

pub fn smf(division: i16, tracks: Vec<Vec<(u64, Event)>>) -> SMF {
    SMF {
        format: SMFFormat::MultiTrack,
        division,
        tracks: tracks
            .into_iter()
            .map(|events| rimd::Track {
                copyright: None,
                name: None,
                events: events
                    .into_iter()
                    .map(|(vtime, event)| TrackEvent { vtime, event })
                    .collect(),
            })
            .collect(),
    }
}

pub fn time_signature(numerator: u8, denominator_exponent: u8) -> Event {
    Event::Meta(MetaEvent::time_signature(numerator, denominator_exponent, 24, 8))
}

pub fn tempo(micros_per_quarter: u32) -> Event {
    Event::Meta(MetaEvent::tempo_setting(micros_per_quarter))
}

pub fn text(text: &str) -> Event {
    Event::Meta(MetaEvent::text_event(text.to_owned()))
}

pub fn note_on(pitch: u8, velocity: u8, channel: u8) -> Event {
    Event::Midi(MidiMessage::note_on(pitch, velocity, channel))
}

pub fn note_off(pitch: u8, channel: u8) -> Event {
    Event::Midi(MidiMessage::note_off(pitch, 0, channel))
}

pub fn track_of(index: usize, events: Vec<TimedEvent>) -> Track {
    Track { index, events }
}

pub fn on(tick: u64, pitch: u8, velocity: u8) -> TimedEvent {
    TimedEvent {
        tick,
        kind: EventKind::NoteOn {
            channel: 0,
            pitch,
            velocity,
        },
    }
}

pub fn off(tick: u64, pitch: u8) -> TimedEvent {
    TimedEvent {
        tick,
        kind: EventKind::NoteOff { channel: 0, pitch },
    }
}

pub fn signature(tick: u64, numerator: u8, denominator_exponent: u8) -> TimedEvent {
    TimedEvent {
        tick,
        kind: EventKind::TimeSignature(TimeSignature {
            numerator,
            denominator_exponent,
        }),
    }
}

pub fn marker(tick: u64) -> TimedEvent {
    TimedEvent {
        tick,
        kind: EventKind::Other { channel: None },
    }
}

pub fn named(tick: u64, name: &str) -> TimedEvent {
    TimedEvent {
        tick,
        kind: EventKind::Text(name.to_owned()),
    }
}

pub fn note(pitch: u8, onset: u64, offset: u64) -> Note {
    Note {
        pitch,
        velocity: 100,
        channel: 0,
        onset,
        offset,
    }
}
