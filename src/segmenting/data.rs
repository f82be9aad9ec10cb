/// One bar of a track: the half-open tick interval `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Measure {
    pub start: u64,
    pub end: u64,
}

impl Measure {
    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    pub fn contains(&self, tick: u64) -> bool {
        self.start <= tick && tick < self.end
    }
}

/// How the segmenter advances past events that lie beyond the open measure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Close every measure the event has moved past.
    AllElapsed,
    /// Close at most one measure per event, as older exports of the
    /// pattern data did. Long rests leave the track short of measures.
    OneStepPerEvent,
}

impl Default for Advance {
    fn default() -> Self {
        Advance::AllElapsed
    }
}
