pub mod data;
pub mod error;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use self::data::*;
use self::error::PatternError;

/// Parses one pattern document.
///
/// The layout is read from the shape of the JSON itself:
///
/// - an object maps instrument names to lists of repeats;
/// - an array holds pattern records, grouped by their track name.
///
/// Inside a list, a repeat is an array of measure indices, an array of
/// `[start, end]` pairs (or `{"Item1", "Item2"}` objects), or a pattern record.
pub fn parse_table(json: &str, kind: TableKind) -> Result<PatternTable, PatternError> {
    let parser = TableParser {
        file: kind.file_name(),
    };

    let value: Value =
        serde_json::from_str(json).map_err(|err| parser.error("$".to_owned(), err.to_string()))?;

    let entries = match value {
        Value::Object(map) => parser.instruments(map)?,
        Value::Array(records) => parser.records(records)?,
        other => {
            return Err(parser.error(
                "$".to_owned(),
                format!("expected an object or an array, found {}", describe(&other)),
            ))
        }
    };

    Ok(PatternTable { kind, entries })
}

struct TableParser<'a> {
    file: &'a str,
}

impl<'a> TableParser<'a> {
    fn error(&self, path: String, reason: String) -> PatternError {
        PatternError {
            file: self.file.to_owned(),
            path,
            reason,
        }
    }

    fn instruments(
        &self,
        map: Map<String, Value>,
    ) -> Result<BTreeMap<String, Vec<Repeat>>, PatternError> {
        let mut entries = BTreeMap::new();

        for (name, value) in map {
            let path = format!("$[{:?}]", name);

            let repeats = match value {
                Value::Array(repeats) => repeats
                    .iter()
                    .enumerate()
                    .map(|(index, repeat)| self.repeat(repeat, format!("{}[{}]", path, index)))
                    .collect::<Result<Vec<Repeat>, PatternError>>()?,
                other => {
                    return Err(self.error(
                        path,
                        format!("expected a list of repeats, found {}", describe(&other)),
                    ))
                }
            };

            entries.insert(name, repeats);
        }

        Ok(entries)
    }

    fn records(&self, records: Vec<Value>) -> Result<BTreeMap<String, Vec<Repeat>>, PatternError> {
        let mut entries: BTreeMap<String, Vec<Repeat>> = BTreeMap::new();

        for (index, value) in records.into_iter().enumerate() {
            let path = format!("$[{}]", index);
            let record = self.record(value, &path)?;

            let name = match (record.track_name.as_ref(), record.track_number) {
                (Some(name), _) => name.clone(),
                (None, Some(number)) => number.to_string(),
                (None, None) => {
                    return Err(self.error(
                        path,
                        "record has neither a TrackName nor a TrackNumber".to_owned(),
                    ))
                }
            };

            let repeat = self.record_repeat(&record, &path)?;
            entries.entry(name).or_insert_with(Vec::new).push(repeat);
        }

        Ok(entries)
    }

    fn record(&self, value: Value, path: &str) -> Result<PatternRecord, PatternError> {
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|err| self.error(path.to_owned(), err.to_string())),
            other => Err(self.error(
                path.to_owned(),
                format!("expected a pattern record, found {}", describe(&other)),
            )),
        }
    }

    fn record_repeat(&self, record: &PatternRecord, path: &str) -> Result<Repeat, PatternError> {
        let path = format!("{}.BaseTimingPattern", path);

        match record.base_timing_pattern {
            None | Some(Value::Null) => Ok(Repeat::Timing(Vec::new())),
            Some(Value::Array(ref spans)) => spans
                .iter()
                .enumerate()
                .map(|(index, span)| self.span(span, format!("{}[{}]", path, index)))
                .collect::<Result<Vec<TimingSpan>, PatternError>>()
                .map(Repeat::Timing),
            Some(ref other) => Err(self.error(
                path,
                format!("expected a list of timing pairs, found {}", describe(other)),
            )),
        }
    }

    fn repeat(&self, value: &Value, path: String) -> Result<Repeat, PatternError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(_) => {
                let record = self.record(value.clone(), &path)?;
                return self.record_repeat(&record, &path);
            }
            other => {
                return Err(self.error(
                    path,
                    format!("expected a repeat, found {}", describe(other)),
                ))
            }
        };

        match items.first() {
            None => Ok(Repeat::Measures(Vec::new())),

            Some(Value::Number(_)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.measure_index(item, format!("{}[{}]", path, index)))
                .collect::<Result<Vec<usize>, PatternError>>()
                .map(Repeat::Measures),

            Some(Value::Array(_)) | Some(Value::Object(_)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.span(item, format!("{}[{}]", path, index)))
                .collect::<Result<Vec<TimingSpan>, PatternError>>()
                .map(Repeat::Timing),

            Some(other) => Err(self.error(
                format!("{}[0]", path),
                format!(
                    "expected a measure index or a timing pair, found {}",
                    describe(other)
                ),
            )),
        }
    }

    fn measure_index(&self, value: &Value, path: String) -> Result<usize, PatternError> {
        let index = value.as_u64().ok_or_else(|| {
            self.error(
                path.clone(),
                format!("expected a measure index, found {}", describe(value)),
            )
        })?;

        usize::try_from(index).map_err(|_| {
            self.error(
                path,
                format!("measure index {} is too large for this platform", index),
            )
        })
    }

    fn span(&self, value: &Value, path: String) -> Result<TimingSpan, PatternError> {
        let span = match value {
            Value::Array(pair) => match pair.as_slice() {
                [start, end] => match (start.as_u64(), end.as_u64()) {
                    (Some(start), Some(end)) => TimingSpan { start, end },
                    _ => {
                        return Err(self.error(
                            path,
                            "timing pair must hold two non-negative integers".to_owned(),
                        ))
                    }
                },
                _ => {
                    return Err(self.error(
                        path,
                        format!("timing pair must have two entries, found {}", pair.len()),
                    ))
                }
            },
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|err| self.error(path.clone(), err.to_string()))?,
            other => {
                return Err(self.error(
                    path,
                    format!(
                        "expected a timing pair, found {} (a repeat cannot mix shapes)",
                        describe(other)
                    ),
                ))
            }
        };

        if span.end < span.start {
            return Err(self.error(
                path,
                format!("span ends at {} before it starts at {}", span.end, span.start),
            ));
        }

        Ok(span)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(number) if number.is_u64() => "an integer",
        Value::Number(_) => "a negative or fractional number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
