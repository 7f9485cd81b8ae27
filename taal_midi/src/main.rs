//! Command-line front end: browse the taal catalog and render taals to MIDI.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::error;

use taal_catalog::CUSTOM_SYSTEM;
use taal_midi::{
    BolMap, DrumKit, DurationMode, EncoderConfig, Laya, PatternCatalog, SmfEncoder, Taal, TaalCatalog,
    Tempo,
};

#[derive(Parser)]
#[command(name = "taal_midi", version, about = "Render taal rhythmic cycles as MIDI files")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Taal catalog JSON file; the built-in taals are used when omitted
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every taal in the catalog
    List,

    /// Show one taal and the keys its bols play
    Show { name: String },

    /// Render a taal to a MIDI file
    Generate(GenerateArgs),

    /// Add a custom taal to the catalog file
    Add {
        name: String,

        /// Comma-separated bols, e.g. Dha,Dhin,Na
        #[arg(long, value_delimiter = ',', required = true)]
        bols: Vec<String>,

        /// Beat count (defaults to the number of bols)
        #[arg(long)]
        beats: Option<u32>,

        #[arg(long, default_value = CUSTOM_SYSTEM)]
        system: String,
    },

    /// Remove a taal from the catalog file
    Remove { name: String },
}

#[derive(Args)]
struct GenerateArgs {
    /// Taal name, e.g. Teentaal
    name: String,

    /// Tempo in beats per minute
    #[arg(long, conflicts_with = "laya")]
    bpm: Option<u32>,

    /// Named tempo: Vilambit (60), Madhya (90) or Drut (120)
    #[arg(long)]
    laya: Option<Laya>,

    /// Output file [default: output/taal_track.mid]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoder settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    duration_mode: Option<DurationArg>,

    /// Passes through the taal
    #[arg(long)]
    cycles: Option<u32>,

    /// Note velocity 0-127
    #[arg(long)]
    velocity: Option<u8>,

    /// Drum kit for the program change (Standard, Room, Jazz, ...)
    #[arg(long)]
    kit: Option<DrumKit>,

    /// Send no program change
    #[arg(long, conflicts_with = "kit")]
    no_program: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DurationArg {
    CycleBeats,
    TempoScaled,
}

impl From<DurationArg> for DurationMode {
    fn from(arg: DurationArg) -> Self {
        match arg {
            DurationArg::CycleBeats  => DurationMode::CycleBeats,
            DurationArg::TempoScaled => DurationMode::TempoScaled,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("logger setup failed: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { catalog: catalog_path, command, .. } = cli;

    match command {
        Command::List => {
            let catalog = open_catalog(catalog_path.as_deref())?;
            println!("Available taals:");
            for taal in catalog.list() {
                println!("  [{}] {}", taal.system, taal);
            }
        }

        Command::Show { name } => {
            let catalog = open_catalog(catalog_path.as_deref())?;
            let taal = catalog
                .get(&name)
                .with_context(|| format!("taal not found: {name}"))?;
            let bols = BolMap::standard();
            println!("{}", taal);
            println!("  system: {}", taal.system);
            let keys: Vec<String> =
                taal.bols.iter().map(|b| format!("{}={}", b, bols.note_for(b))).collect();
            println!("  keys:   {}", keys.join(" "));
        }

        Command::Generate(args) => generate(catalog_path.as_deref(), args)?,

        Command::Add { name, bols, beats, system } => {
            let path = catalog_path.context("`add` needs --catalog FILE to save into")?;
            let mut catalog = if path.exists() {
                TaalCatalog::load_json(&path)?
            } else {
                TaalCatalog::new()
            };
            let mut taal = Taal::from_bols(&name, bols).in_system(&system);
            if let Some(beats) = beats {
                taal.beats = beats;
            }
            println!("Adding {}", taal);
            catalog.insert(taal)?;
            catalog.save_json(&path)?;
        }

        Command::Remove { name } => {
            let path = catalog_path.context("`remove` needs --catalog FILE to save into")?;
            let mut catalog = TaalCatalog::load_json(&path)?;
            let taal = catalog.remove(&name)?;
            println!("Removed {}", taal);
            catalog.save_json(&path)?;
        }
    }
    Ok(())
}

fn generate(catalog_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;

    let mut config = match &args.config {
        Some(path) => EncoderConfig::load(path)?,
        None => EncoderConfig::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(mode) = args.duration_mode {
        config.duration_mode = mode.into();
    }
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    if let Some(velocity) = args.velocity {
        config.velocity = velocity;
    }
    if let Some(kit) = args.kit {
        config.program = Some(kit.program());
    }
    if args.no_program {
        config.program = None;
    }

    let tempo = match (args.bpm, args.laya) {
        (Some(bpm), _)     => Tempo::new(bpm),
        (None, Some(laya)) => laya.into(),
        (None, None)       => Laya::Vilambit.into(),
    };

    let output = config.output.clone();
    let encoder = SmfEncoder::from_config(config)?;
    encoder
        .encode_named(&catalog, &args.name, tempo, &output)
        .with_context(|| format!("rendering '{}' at {}", args.name, tempo))?;

    println!("MIDI file generated: {}", output.display());
    Ok(())
}

fn open_catalog(path: Option<&Path>) -> Result<TaalCatalog> {
    match path {
        Some(path) => Ok(TaalCatalog::load_json(path)?),
        None => Ok(TaalCatalog::with_defaults()),
    }
}
