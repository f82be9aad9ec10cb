use std::path::{Path, PathBuf};

use ansi_term::Style;
use color_eyre::eyre::Result;
use structopt::StructOpt;

use notebox::colors::{BLUE, CYAN, RED, WHITE, YELLOW};
use notebox::decoding::data::UnresolvedNotes;
use notebox::loading::{self, Inputs};
use notebox::notes::pitch_name;
use notebox::resolving::{self, Precedence};
use notebox::segmenting::data::Advance;
use notebox::{Options, Output};

#[derive(Debug, StructOpt)]
struct Flags {
    #[structopt(
        long = "legacy-advance",
        help = "Close at most one measure per MIDI event, like older pattern exports."
    )]
    legacy_advance: bool,

    #[structopt(
        long = "conductor-signatures",
        help = "Apply the time signatures of track 0 to every track."
    )]
    conductor_signatures: bool,

    #[structopt(
        long = "lenient-notes",
        help = "Keep never-released notes with zero length instead of failing."
    )]
    lenient_notes: bool,

    #[structopt(
        long = "prefer-instruments",
        help = "Use other-patterns.json when a name is in both pattern tables."
    )]
    prefer_instruments: bool,
}

impl Flags {
    fn options(&self) -> Options {
        Options {
            advance: if self.legacy_advance {
                Advance::OneStepPerEvent
            } else {
                Advance::AllElapsed
            },
            conductor_signatures: self.conductor_signatures,
            unresolved_notes: if self.lenient_notes {
                UnresolvedNotes::ZeroLength
            } else {
                UnresolvedNotes::Reject
            },
            precedence: if self.prefer_instruments {
                Precedence::InstrumentsFirst
            } else {
                Precedence::DrumsFirst
            },
            ..Options::default()
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "notebox",
    about = "Lay out a MIDI performance and its pattern tables as 3D note boxes."
)]
enum NoteboxCommand {
    #[structopt(
        name = "summary",
        about = "Print the instrument, repeat, measure and note tree."
    )]
    Summary {
        #[structopt(
            help = "Directory holding one .mid file, drum-patterns.json and other-patterns.json."
        )]
        directory: PathBuf,

        #[structopt(flatten)]
        flags: Flags,
    },

    #[structopt(
        name = "measures",
        about = "Print the measures and note counts derived for every track."
    )]
    Measures {
        #[structopt(help = "Directory holding the MIDI file.")]
        directory: PathBuf,

        #[structopt(flatten)]
        flags: Flags,
    },

    #[structopt(name = "boxes", about = "Export the laid-out note boxes as JSON.")]
    Boxes {
        #[structopt(
            help = "Directory holding one .mid file, drum-patterns.json and other-patterns.json."
        )]
        directory: PathBuf,

        #[structopt(
            short = "o",
            long = "output",
            help = "Output file, or stdout if not specified."
        )]
        output: Option<PathBuf>,

        #[structopt(flatten)]
        flags: Flags,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = NoteboxCommand::from_args();

    if let Err(err) = run_command(command) {
        eprintln!("{}", err);
        log(RED, "error:", "Command failed.");
        std::process::exit(1)
    }

    Ok(())
}

fn log(color: Style, prefix: &str, message: &str) {
    eprintln!("{} {}", color.paint(prefix), WHITE.paint(message));
}

fn run_command(command: NoteboxCommand) -> Result<()> {
    match command {
        NoteboxCommand::Summary { directory, flags } => {
            let output = load_and_visualize(&directory, &flags.options())?;
            print_summary(&output);
            Ok(())
        }

        NoteboxCommand::Measures { directory, flags } => {
            let options = flags.options();
            let midi_path = loading::find_midi_file(&directory)?;

            log(CYAN, "Loading", &midi_path.display().to_string());
            let timeline = loading::read_timeline(&midi_path)?;

            let mut warnings = Vec::new();

            for track in &timeline.tracks {
                let name = resolving::instrument_name(track)
                    .unwrap_or_else(|| "<unnamed>".to_owned());
                let binned = notebox::bin_track(&timeline, track, &options, &mut warnings)?;

                println!("track {} `{}`: {} measures", track.index, name, binned.measures.len());
                for measure in &binned.measures {
                    println!(
                        "  {:>4}  [{}, {})  {} notes",
                        measure.index,
                        measure.span.start,
                        measure.span.end,
                        measure.notes.len()
                    );
                }
            }

            for warning in &warnings {
                log(YELLOW, "warning:", &warning.to_string());
            }

            Ok(())
        }

        NoteboxCommand::Boxes {
            directory,
            output,
            flags,
        } => {
            let visualized = load_and_visualize(&directory, &flags.options())?;
            let json = serde_json::to_string_pretty(&visualized.scene)?;

            log(
                CYAN,
                "Writing",
                &format!("{} note boxes ...", visualized.scene.world_boxes().count()),
            );
            write_text(&json, output)
        }
    }
}

fn load_and_visualize(directory: &Path, options: &Options) -> Result<Output> {
    let Inputs {
        midi_path,
        timeline,
        drums,
        instruments,
    } = loading::load(directory)?;

    log(
        CYAN,
        "Loaded",
        &format!(
            "{} ({} tracks, {} ticks per quarter note, {:.0} BPM)",
            midi_path.display(),
            timeline.tracks.len(),
            timeline.ticks_per_quarter,
            timeline.initial_bpm()
        ),
    );

    let output = notebox::visualize(&timeline, &drums, &instruments, options)?;

    for skipped in &output.skipped {
        let name = skipped.name.as_deref().unwrap_or("<unnamed>");
        log(
            BLUE,
            "Skipping",
            &format!("track {} `{}`, not in either pattern table.", skipped.track, name),
        );
    }

    for warning in &output.warnings {
        log(YELLOW, "warning:", &warning.to_string());
    }

    if output.instruments.is_empty() {
        log(YELLOW, "warning:", "No track matched an entry of the pattern tables.");
    }

    Ok(output)
}

fn print_summary(output: &Output) {
    for instrument in &output.instruments {
        println!(
            "{} (track {}, {})",
            instrument.name,
            instrument.track,
            instrument.table.file_name()
        );

        for repeat in &instrument.repeats {
            println!("  repeat {}", repeat.index);

            for measure in &repeat.measures {
                match measure.measure_index {
                    Some(index) => println!("    measure {}", index),
                    None => println!("    timing pattern"),
                }

                for note in &measure.notes {
                    let pitch = note.pitch.map_or_else(|| "-".to_owned(), pitch_name);
                    println!(
                        "      {:<4} +{:<6} len {:<6} slot {}",
                        pitch, note.local_offset, note.duration, note.slot_start
                    );
                }
            }
        }
    }
}

fn write_text<P>(content: &str, output: Option<P>) -> Result<()>
where
    P: AsRef<Path>,
{
    use std::fs::File;
    use std::io::Write;

    if let Some(filename) = output {
        File::create(filename.as_ref())?.write_all(content.as_bytes())?;
    } else {
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
    }

    Ok(())
}
