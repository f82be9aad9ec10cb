pub mod data;
pub mod error;

use self::data::*;
use self::error::{ErrorType, SegmentingError};
use crate::decoding::data::{EventKind, TimeSignature, Track};

/// Measure length in ticks for `signature`.
///
/// Rejects signatures whose measure is not a whole number of ticks at this
/// resolution, such as 3/8 with an odd number of ticks per quarter note.
pub fn ticks_per_measure(
    signature: TimeSignature,
    ticks_per_quarter: u16,
) -> Result<u64, ErrorType> {
    let TimeSignature {
        numerator,
        denominator_exponent,
    } = signature;

    if ticks_per_quarter == 0 {
        return Err(ErrorType::ZeroResolution);
    }

    if numerator == 0 || denominator_exponent > 31 {
        return Err(ErrorType::InvalidTimeSignature {
            numerator,
            denominator_exponent,
        });
    }

    let denominator = 1u64 << denominator_exponent;
    let whole_notes = u64::from(numerator) * 4 * u64::from(ticks_per_quarter);

    if whole_notes % denominator != 0 {
        return Err(ErrorType::NonIntegralMeasure {
            numerator,
            denominator,
            ticks_per_quarter,
        });
    }

    Ok(whole_notes / denominator)
}

/// Cuts a sequence of `(tick, time signature change)` pairs into measures.
///
/// Measures start at tick 0 in 4/4 until a signature says otherwise. A
/// signature change applies to the measure still open at its tick and to
/// every measure after it. With [`Advance::AllElapsed`] the result covers
/// every tick up to and including the last event.
pub fn segment<I>(
    track: usize,
    events: I,
    ticks_per_quarter: u16,
    advance: Advance,
) -> Result<Vec<Measure>, SegmentingError>
where
    I: IntoIterator<Item = (u64, Option<TimeSignature>)>,
{
    let length_at = |signature: TimeSignature, tick: u64| {
        ticks_per_measure(signature, ticks_per_quarter).map_err(|error| SegmentingError {
            track,
            tick,
            error,
        })
    };

    let mut measures = Vec::new();
    let mut start = 0;
    let mut length = length_at(TimeSignature::default(), 0)?;

    match advance {
        Advance::AllElapsed => {
            let mut seen_any = false;

            for (tick, signature) in events {
                seen_any = true;

                while tick >= start + length {
                    measures.push(Measure {
                        start,
                        end: start + length,
                    });
                    start += length;
                }

                if let Some(signature) = signature {
                    length = length_at(signature, tick)?;

                    // A shorter meter can leave the event past the open measure.
                    while tick >= start + length {
                        measures.push(Measure {
                            start,
                            end: start + length,
                        });
                        start += length;
                    }
                }
            }

            if seen_any {
                measures.push(Measure {
                    start,
                    end: start + length,
                });
            }
        }

        Advance::OneStepPerEvent => {
            let mut index = 0;

            for (tick, signature) in events {
                if let Some(signature) = signature {
                    length = length_at(signature, tick)?;
                }

                if tick / length > index {
                    measures.push(Measure {
                        start,
                        end: start + length,
                    });
                    start += length;
                    index += 1;
                }
            }
        }
    }

    Ok(measures)
}

/// Segments one decoded track.
///
/// When `conductor` is given, its time signatures are merged into the
/// track's own events first.
pub fn segment_track(
    track: &Track,
    conductor: Option<&Track>,
    ticks_per_quarter: u16,
    advance: Advance,
) -> Result<Vec<Measure>, SegmentingError> {
    let mut events: Vec<(u64, Option<TimeSignature>)> = Vec::new();

    if let Some(conductor) = conductor.filter(|conductor| conductor.index != track.index) {
        events.extend(
            conductor
                .time_signatures()
                .map(|(tick, signature)| (tick, Some(signature))),
        );
    }

    events.extend(track.events.iter().map(|event| match event.kind {
        EventKind::TimeSignature(signature) => (event.tick, Some(signature)),
        _ => (event.tick, None),
    }));

    events.sort_by_key(|&(tick, _)| tick);

    segment(track.index, events, ticks_per_quarter, advance)
}
