use std::fs;
use std::path::Path;

use mktemp::Temp;
use pretty_assertions::assert_eq;
use rimd::{Event, MetaEvent, MidiMessage, SMFFormat, SMFWriter, Track, TrackEvent, SMF};

use notebox::loading::error::LoadingError;
use notebox::pattern_parsing::data::TableKind;
use notebox::{visualize_directory, Error, Options};

const DRUM_PATTERNS: &str = include_str!("song/drum-patterns.json");
const OTHER_PATTERNS: &str = include_str!("song/other-patterns.json");

fn track(events: Vec<(u64, Event)>) -> Track {
    Track {
        copyright: None,
        name: None,
        events: events
            .into_iter()
            .map(|(vtime, event)| TrackEvent { vtime, event })
            .collect(),
    }
}

fn text(name: &str) -> Event {
    Event::Meta(MetaEvent::text_event(name.to_owned()))
}

fn on(pitch: u8, channel: u8) -> Event {
    Event::Midi(MidiMessage::note_on(pitch, 100, channel))
}

fn off(pitch: u8, channel: u8) -> Event {
    Event::Midi(MidiMessage::note_off(pitch, 0, channel))
}

/// Three tracks at 480 ticks per quarter note in 4/4: a conductor, a kit
/// spanning two measures and a bass line.
fn song() -> Vec<u8> {
    let smf = SMF {
        format: SMFFormat::MultiTrack,
        division: 480,
        tracks: vec![
            track(vec![
                (0, Event::Meta(MetaEvent::time_signature(4, 2, 24, 8))),
                (0, Event::Meta(MetaEvent::tempo_setting(500_000))),
            ]),
            track(vec![
                (0, text("Kit")),
                (0, on(36, 9)),
                (240, off(36, 9)),
                (240, on(38, 9)),
                (240, off(38, 9)),
                (1200, on(36, 9)),
                (240, off(36, 9)),
            ]),
            track(vec![(0, text("Bass")), (0, on(40, 1)), (960, off(40, 1))]),
        ],
    };

    let mut bytes = Vec::new();
    SMFWriter::from_smf(smf).write_all(&mut bytes).unwrap();
    bytes
}

fn song_directory(drums: Option<&str>, others: Option<&str>) -> Temp {
    let directory = Temp::new_dir().unwrap();
    let path: &Path = directory.as_ref();

    fs::write(path.join("song.mid"), song()).unwrap();

    if let Some(drums) = drums {
        fs::write(path.join("drum-patterns.json"), drums).unwrap();
    }

    if let Some(others) = others {
        fs::write(path.join("other-patterns.json"), others).unwrap();
    }

    directory
}

#[test]
fn test_song_is_laid_out() {
    let directory = song_directory(Some(DRUM_PATTERNS), Some(OTHER_PATTERNS));
    let output = visualize_directory(directory.as_ref(), &Options::default()).unwrap();

    let names: Vec<&str> = output.instruments.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["1 Kit", "2 Bass"]);

    let kit = &output.instruments[0];
    assert_eq!(kit.table, TableKind::Drums);
    assert_eq!(kit.repeats.len(), 2);

    let offsets: Vec<(Option<usize>, Option<u8>, u64, u64)> = kit
        .notes()
        .map(|note| (note.measure_index, note.pitch, note.slot_start, note.local_offset))
        .collect();
    assert_eq!(
        offsets,
        vec![
            (Some(0), Some(36), 0, 0),
            (Some(0), Some(38), 0, 480),
            (Some(1), Some(36), 1920, 0),
            (Some(1), Some(36), 0, 0),
        ]
    );

    let bass = &output.instruments[1];
    assert_eq!(bass.table, TableKind::Instruments);
    let spans: Vec<(Option<u8>, u64, u64)> = bass
        .notes()
        .map(|note| (note.pitch, note.local_offset, note.duration))
        .collect();
    assert_eq!(spans, vec![(None, 0, 960), (None, 960, 960)]);

    assert_eq!(output.scene.world_boxes().count(), 6);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].track, 0);
    assert!(output.warnings.is_empty());
}

#[test]
fn test_scene_serializes_to_json() {
    let directory = song_directory(Some(DRUM_PATTERNS), Some(OTHER_PATTERNS));
    let output = visualize_directory(directory.as_ref(), &Options::default()).unwrap();

    let json: serde_json::Value = serde_json::to_value(&output.scene).unwrap();
    let instruments = json["instruments"].as_array().unwrap();

    assert_eq!(instruments.len(), 2);
    assert_eq!(instruments[0]["name"], "1 Kit");
    assert_eq!(instruments[0]["table"], "drums");
    assert_eq!(instruments[1]["table"], "instruments");
}

#[test]
fn test_missing_midi_file() {
    let directory = Temp::new_dir().unwrap();
    let result = visualize_directory(directory.as_ref(), &Options::default());

    assert!(matches!(
        result,
        Err(Error::Loading(LoadingError::NoMidiFile { .. }))
    ));
}

#[test]
fn test_missing_pattern_table() {
    let directory = song_directory(Some(DRUM_PATTERNS), None);
    let result = visualize_directory(directory.as_ref(), &Options::default());

    match result {
        Err(Error::Loading(LoadingError::InputNotFound { path, .. })) => {
            assert!(path.ends_with("other-patterns.json"))
        }
        other => panic!("expected a missing input, got {:?}", other),
    }
}

#[test]
fn test_malformed_pattern_table() {
    let directory = song_directory(Some("{ \"1 Kit\": [[0, "), Some(OTHER_PATTERNS));
    let result = visualize_directory(directory.as_ref(), &Options::default());

    match result {
        Err(Error::Patterns(error)) => {
            assert_eq!(error.file, "drum-patterns.json");
            assert_eq!(error.path, "$");
        }
        other => panic!("expected a pattern error, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_measure() {
    let directory = song_directory(Some(r#"{ "1 Kit": [[0, 7]] }"#), Some("[]"));
    let result = visualize_directory(directory.as_ref(), &Options::default());

    assert!(matches!(result, Err(Error::Assembling(_))));
}

#[test]
fn test_unmatched_song_is_empty() {
    let directory = song_directory(Some(r#"{ "7 Organ": [[0]] }"#), Some("[]"));
    let output = visualize_directory(directory.as_ref(), &Options::default()).unwrap();

    assert!(output.instruments.is_empty());
    assert_eq!(output.skipped.len(), 3);
    assert_eq!(
        serde_json::to_value(&output.scene).unwrap(),
        serde_json::json!({ "instruments": [] })
    );
}

#[cfg(feature = "cli")]
#[test]
fn test_boxes_command_writes_an_empty_scene_when_nothing_matches() {
    use std::process::Command;

    let directory = song_directory(Some(r#"{ "7 Organ": [[0]] }"#), Some("[]"));
    let path: &Path = directory.as_ref();

    let output = Command::new(env!("CARGO_BIN_EXE_notebox"))
        .arg("boxes")
        .arg(path)
        .output()
        .unwrap();

    assert!(output.status.success());

    let scene: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(scene, serde_json::json!({ "instruments": [] }));
}
