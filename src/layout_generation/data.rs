use serde::Serialize;

use crate::pattern_parsing::data::TableKind;

/// Scale and spacing of the generated boxes, in scene units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Units per tick along the time (z) axis.
    pub time_scale: f32,
    /// Units per semitone along the pitch (y) axis.
    pub pitch_scale: f32,
    /// Distance between repeats, and the gap between instruments, along x.
    pub repeat_spacing: f32,
    pub note_width: f32,
    pub note_height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            time_scale: 0.01,
            pitch_scale: 0.1,
            repeat_spacing: 20.0,
            note_width: 0.2,
            note_height: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteBox {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub pitch: Option<u8>,
    pub measure_index: Option<usize>,
}

/// Boxes of one repeat; box centres are relative to `origin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatGroup {
    pub index: usize,
    pub origin: [f32; 3],
    pub boxes: Vec<NoteBox>,
}

/// Repeats of one instrument; repeat origins are relative to `origin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentGroup {
    pub name: String,
    pub track: usize,
    pub table: TableKind,
    pub origin: [f32; 3],
    pub repeats: Vec<RepeatGroup>,
}

impl InstrumentGroup {
    /// Largest world x reached by any box, if there are boxes at all.
    pub fn extent(&self) -> Option<f32> {
        self.repeats
            .iter()
            .flat_map(|repeat| {
                repeat.boxes.iter().map(move |note_box| {
                    self.origin[0] + repeat.origin[0] + note_box.center[0] + note_box.size[0] / 2.0
                })
            })
            .fold(None, |extent: Option<f32>, x| Some(extent.map_or(x, |extent| extent.max(x))))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub instruments: Vec<InstrumentGroup>,
}

impl Scene {
    /// Every box with its centre moved into world space.
    pub fn world_boxes(&self) -> impl Iterator<Item = NoteBox> + '_ {
        self.instruments.iter().flat_map(|instrument| {
            instrument.repeats.iter().flat_map(move |repeat| {
                repeat.boxes.iter().map(move |note_box| NoteBox {
                    center: [
                        instrument.origin[0] + repeat.origin[0] + note_box.center[0],
                        instrument.origin[1] + repeat.origin[1] + note_box.center[1],
                        instrument.origin[2] + repeat.origin[2] + note_box.center[2],
                    ],
                    ..note_box.clone()
                })
            })
        })
    }
}
