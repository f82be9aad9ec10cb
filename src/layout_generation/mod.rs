pub mod data;

use self::data::*;
use crate::assembling::data::{InstrumentNotes, NoteDescriptor, RepeatNotes};

/// Turns the note tree into boxes.
///
/// Pitch rises along y and repeats sit side by side along x. Time runs along
/// z from the first note of each measure, offset by the measure's slot on
/// the repeat. Each instrument starts one repeat spacing past the widest box
/// placed so far, so instruments never overlap.
pub fn lay_out(instruments: &[InstrumentNotes], options: &LayoutOptions) -> Scene {
    let (instruments, _) = instruments.iter().fold(
        (Vec::with_capacity(instruments.len()), None),
        |(mut groups, extent): (Vec<InstrumentGroup>, Option<f32>), instrument| {
            let origin_x = extent.map_or(0.0, |extent| extent + options.repeat_spacing);
            let group = instrument_group(instrument, origin_x, options);

            let extent = match (extent, group.extent()) {
                (Some(previous), Some(placed)) => Some(previous.max(placed)),
                (previous, placed) => placed.or(previous),
            };

            groups.push(group);
            (groups, extent)
        },
    );

    Scene { instruments }
}

fn instrument_group(
    instrument: &InstrumentNotes,
    origin_x: f32,
    options: &LayoutOptions,
) -> InstrumentGroup {
    InstrumentGroup {
        name: instrument.name.clone(),
        track: instrument.track,
        table: instrument.table,
        origin: [origin_x, 0.0, 0.0],
        repeats: instrument
            .repeats
            .iter()
            .map(|repeat| repeat_group(repeat, options))
            .collect(),
    }
}

fn repeat_group(repeat: &RepeatNotes, options: &LayoutOptions) -> RepeatGroup {
    RepeatGroup {
        index: repeat.index,
        origin: [repeat.index as f32 * options.repeat_spacing, 0.0, 0.0],
        boxes: repeat
            .measures
            .iter()
            .flat_map(|measure| measure.notes.iter())
            .map(|note| note_box(note, options))
            .collect(),
    }
}

fn note_box(note: &NoteDescriptor, options: &LayoutOptions) -> NoteBox {
    let length = note.duration as f32 * options.time_scale;
    let start = (note.slot_start + note.local_offset) as f32 * options.time_scale;
    let height = note.pitch.map_or(0.0, |pitch| f32::from(pitch) * options.pitch_scale);

    NoteBox {
        center: [0.0, height, start + length / 2.0],
        size: [options.note_width, options.note_height, length],
        pitch: note.pitch,
        measure_index: note.measure_index,
    }
}
