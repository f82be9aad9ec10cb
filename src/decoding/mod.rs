pub mod data;
pub mod error;

use std::collections::{BTreeMap, VecDeque};

use rimd::{Event, MetaCommand, MetaEvent, MidiMessage, Status, SMF};

use self::data::*;
use self::error::DecodingError;

/// Resolves every track of `smf` to absolute ticks.
pub fn decode(smf: &SMF) -> Result<Timeline, DecodingError> {
    let ticks_per_quarter = match smf.division {
        division if division < 0 => return Err(DecodingError::UnsupportedTiming { division }),
        0 => return Err(DecodingError::ZeroDivision),
        division => division as u16,
    };

    let tracks = smf
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| decode_track(index, track))
        .collect();

    Ok(Timeline {
        ticks_per_quarter,
        tracks,
    })
}

fn decode_track(index: usize, track: &rimd::Track) -> Track {
    let mut tick = 0;

    let events = track
        .events
        .iter()
        .map(|event| {
            tick += event.vtime;
            TimedEvent {
                tick,
                kind: decode_event(&event.event),
            }
        })
        .collect();

    Track { index, events }
}

fn decode_event(event: &Event) -> EventKind {
    match *event {
        Event::Midi(ref message) => decode_message(message),
        Event::Meta(ref meta) => decode_meta(meta),
    }
}

fn decode_message(message: &MidiMessage) -> EventKind {
    let byte = |index: usize| message.data.get(index).copied().unwrap_or(0);
    let channel = message.channel();

    match (message.status(), channel) {
        (Status::NoteOn, Some(channel)) if byte(2) > 0 => EventKind::NoteOn {
            channel,
            pitch: byte(1),
            velocity: byte(2),
        },
        (Status::NoteOn, Some(channel)) | (Status::NoteOff, Some(channel)) => EventKind::NoteOff {
            channel,
            pitch: byte(1),
        },
        _ => EventKind::Other { channel },
    }
}

fn decode_meta(meta: &MetaEvent) -> EventKind {
    match meta.command {
        MetaCommand::TimeSignature if meta.data.len() >= 2 => {
            EventKind::TimeSignature(TimeSignature {
                numerator: meta.data[0],
                denominator_exponent: meta.data[1],
            })
        }
        MetaCommand::TempoSetting if meta.data.len() >= 3 => EventKind::Tempo {
            micros_per_quarter: meta.data[..3]
                .iter()
                .fold(0, |tempo, &byte| (tempo << 8) | u32::from(byte)),
        },
        MetaCommand::TextEvent | MetaCommand::SequenceOrTrackName | MetaCommand::InstrumentName => {
            EventKind::Text(String::from_utf8_lossy(&meta.data).into_owned())
        }
        _ => EventKind::Other { channel: None },
    }
}

/// Attaches every note-off to the note-on it releases.
///
/// Repeated note-ons of one key on one channel are released first in, first
/// out. Notes come back ordered by onset, then pitch.
pub fn pair_notes(track: &Track) -> PairedNotes {
    let mut sounding: BTreeMap<(u8, u8), VecDeque<(u64, u8)>> = BTreeMap::new();
    let mut paired = PairedNotes::default();

    for event in &track.events {
        match event.kind {
            EventKind::NoteOn {
                channel,
                pitch,
                velocity,
            } => {
                sounding
                    .entry((channel, pitch))
                    .or_insert_with(VecDeque::new)
                    .push_back((event.tick, velocity));
            }
            EventKind::NoteOff { channel, pitch } => {
                let opened = sounding
                    .get_mut(&(channel, pitch))
                    .and_then(VecDeque::pop_front);

                match opened {
                    Some((onset, velocity)) => paired.notes.push(Note {
                        pitch,
                        velocity,
                        channel,
                        onset,
                        offset: event.tick,
                    }),
                    None => paired.stray_offs.push(StrayNoteOff {
                        channel,
                        pitch,
                        tick: event.tick,
                    }),
                }
            }
            _ => (),
        }
    }

    for ((channel, pitch), opened) in sounding {
        for (onset, velocity) in opened {
            paired.unresolved.push(UnresolvedNote {
                channel,
                pitch,
                velocity,
                onset,
            });
        }
    }

    paired.notes.sort_by_key(|note| (note.onset, note.pitch));
    paired.unresolved.sort_by_key(|note| (note.onset, note.pitch));

    paired
}

impl PairedNotes {
    /// Applies `policy` to the unreleased notes and returns the final note set.
    pub fn settle(self, track: usize, policy: UnresolvedNotes) -> Result<Vec<Note>, DecodingError> {
        let PairedNotes {
            mut notes,
            unresolved,
            ..
        } = self;

        match (policy, unresolved.first()) {
            (_, None) => Ok(notes),
            (UnresolvedNotes::Reject, Some(first)) => Err(DecodingError::UnresolvedNoteOff {
                track,
                channel: first.channel,
                pitch: first.pitch,
                onset: first.onset,
            }),
            (UnresolvedNotes::ZeroLength, Some(_)) => {
                notes.extend(unresolved.iter().map(|note| Note {
                    pitch: note.pitch,
                    velocity: note.velocity,
                    channel: note.channel,
                    onset: note.onset,
                    offset: note.onset,
                }));
                notes.sort_by_key(|note| (note.onset, note.pitch));
                Ok(notes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn absolute_ticks_accumulate_deltas() {
        let smf = smf(
            480,
            vec![vec![
                (0, time_signature(3, 2)),
                (0, note_on(60, 100, 0)),
                (480, note_off(60, 0)),
                (960, note_on(62, 90, 0)),
            ]],
        );

        let timeline = decode(&smf).unwrap();
        let ticks: Vec<u64> = timeline.tracks[0].events.iter().map(|event| event.tick).collect();

        assert_eq!(timeline.ticks_per_quarter, 480);
        assert_eq!(ticks, vec![0, 0, 480, 1440]);
        assert_eq!(
            timeline.tracks[0].events[0].kind,
            EventKind::TimeSignature(TimeSignature {
                numerator: 3,
                denominator_exponent: 2,
            })
        );
    }

    #[test]
    fn zero_velocity_note_on_is_a_note_off() {
        let smf = smf(96, vec![vec![(0, note_on(64, 80, 2)), (48, note_on(64, 0, 2))]]);
        let timeline = decode(&smf).unwrap();

        assert_eq!(
            timeline.tracks[0].events[1].kind,
            EventKind::NoteOff {
                channel: 2,
                pitch: 64
            }
        );

        let paired = pair_notes(&timeline.tracks[0]);
        assert_eq!(
            paired.notes,
            vec![Note {
                pitch: 64,
                velocity: 80,
                channel: 2,
                onset: 0,
                offset: 48,
            }]
        );
        assert!(paired.unresolved.is_empty());
    }

    #[test]
    fn smpte_division_is_rejected() {
        let result = decode(&smf(-7_000, vec![]));
        assert_eq!(result, Err(DecodingError::UnsupportedTiming { division: -7_000 }));
        assert_eq!(decode(&smf(0, vec![])), Err(DecodingError::ZeroDivision));
    }

    #[test]
    fn text_events_and_tempo_are_kept() {
        let smf = smf(
            480,
            vec![vec![(0, text("Bass")), (0, tempo(400_000)), (0, note_on(40, 1, 1))]],
        );
        let timeline = decode(&smf).unwrap();

        assert_eq!(timeline.tracks[0].events[0].kind, EventKind::Text("Bass".to_owned()));
        assert_eq!(timeline.initial_bpm(), 150.0);
    }

    #[test]
    fn repeated_keys_release_first_in_first_out() {
        let track = track_of(
            0,
            vec![
                on(0, 60, 100),
                on(10, 60, 50),
                off(20, 60),
                off(30, 60),
            ],
        );

        let paired = pair_notes(&track);
        let spans: Vec<(u64, u64, u8)> = paired
            .notes
            .iter()
            .map(|note| (note.onset, note.offset, note.velocity))
            .collect();

        assert_eq!(spans, vec![(0, 20, 100), (10, 30, 50)]);
    }

    #[test]
    fn stray_note_offs_are_collected() {
        let track = track_of(0, vec![off(5, 61), on(10, 61, 70), off(20, 61)]);
        let paired = pair_notes(&track);

        assert_eq!(paired.notes.len(), 1);
        assert_eq!(
            paired.stray_offs,
            vec![StrayNoteOff {
                channel: 0,
                pitch: 61,
                tick: 5
            }]
        );
    }

    #[test]
    fn unresolved_notes_follow_policy() {
        let track = track_of(3, vec![on(0, 36, 100), off(100, 36), on(200, 38, 90)]);

        let rejected = pair_notes(&track).settle(3, UnresolvedNotes::Reject);
        assert_eq!(
            rejected,
            Err(DecodingError::UnresolvedNoteOff {
                track: 3,
                channel: 0,
                pitch: 38,
                onset: 200
            })
        );

        let kept = pair_notes(&track)
            .settle(3, UnresolvedNotes::ZeroLength)
            .unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].onset, 200);
        assert_eq!(kept[1].duration(), 0);
    }
}
