//! chromasonic: convert an image into a MIDI file from the command line.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chromasonic::config::{default_settings_path, load_settings, Settings};
use chromasonic::music::{Scale, Strategy};
use chromasonic::pipeline::{Conversion, ConversionReport};

#[derive(Debug, Parser)]
#[command(name = "chromasonic", version, about = "Turn the colors of an image into music")]
struct Cli {
    /// Settings file (defaults to ~/.chromasonic/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert an image into a MIDI file (and a WAV preview)
    Convert {
        image: PathBuf,
        /// Generation strategy: linear, arpeggio, chords, melodic, rhythmic
        #[arg(long)]
        mode: Option<String>,
        /// Scale: chromatic, major, minor, pentatonic, blues
        #[arg(long)]
        scale: Option<String>,
        /// Tempo in beats per minute
        #[arg(long)]
        tempo: Option<f64>,
        /// MIDI note of the lowest pitch slot
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=127))]
        base_note: Option<u8>,
        /// Sample every Nth pixel on every Nth row
        #[arg(long)]
        resolution: Option<usize>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Skip WAV rendering
        #[arg(long)]
        no_render: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show image dimensions and how many samples a conversion would take
    Info {
        image: PathBuf,
        #[arg(long)]
        resolution: Option<usize>,
    },
    /// List strategies and scales
    Modes,
}

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        if let Ok(directive) = "chromasonic=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load(config: Option<&Path>) -> chromasonic::Result<Settings> {
    match config {
        Some(path) => load_settings(path),
        None => load_settings(&default_settings_path()),
    }
}

fn print_report(report: &ConversionReport) {
    println!("image:    {}", report.image.display());
    println!("midi:     {}", report.midi_file.display());
    if let Some(wav) = &report.wav_file {
        println!("audio:    {}", wav.display());
    }
    println!("mode:     {} ({} scale)", report.strategy, report.scale);
    println!("samples:  {}", report.sample_count);
    println!("notes:    {}", report.note_count);
    println!(
        "duration: {:.2} beats, {:.2}s at {} BPM",
        report.duration_beats, report.duration_seconds, report.tempo
    );
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load(cli.config.as_deref())?;

    match cli.command {
        Command::Convert {
            image,
            mode,
            scale,
            tempo,
            base_note,
            resolution,
            out_dir,
            no_render,
            json,
        } => {
            let generation = &mut settings.generation;
            if let Some(mode) = mode {
                generation.strategy = Strategy::from_name(&mode);
            }
            if let Some(scale) = scale {
                generation.scale = Scale::from_name(&scale);
            }
            if let Some(tempo) = tempo {
                generation.tempo = tempo;
            }
            if let Some(base_note) = base_note {
                generation.base_note = base_note;
            }
            if let Some(resolution) = resolution {
                settings.resolution = resolution;
            }
            if let Some(out_dir) = out_dir {
                settings.output_dir = out_dir;
            }
            if no_render {
                settings.render.enabled = false;
            }

            let report = Conversion::new(settings).run(&image)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Info { image, resolution } => {
            if let Some(resolution) = resolution {
                settings.resolution = resolution;
            }
            let info = Conversion::new(settings).inspect(&image)?;
            println!(
                "{}: {}x{} ({})",
                image.display(),
                info.width,
                info.height,
                info.color_type
            );
            println!(
                "resolution {} -> {} samples",
                info.resolution, info.total_samples
            );
        }
        Command::Modes => {
            println!("strategies:");
            for strategy in Strategy::ALL {
                println!("  {:<10} {}", strategy.name(), strategy.description());
            }
            println!("scales:");
            for scale in Scale::ALL {
                println!("  {:<10} {} notes", scale.name(), scale.len());
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
