mod report;

use crate::report::Report;
use anyhow::{anyhow, Context};
use blackbox::{
    timed, BoardView, EntryPoint, Game, GameConfig, HexPoint, Seed, TextBoard,
    ATOM_COUNT,
};
use config::{Config, File};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// Play a game of BlackBox from the command line. Rays and guesses are given
/// up front, and the resulting board is printed (or written to files).
#[derive(Debug, StructOpt)]
#[structopt(name = "blackbox")]
struct Opt {
    /// Path to a config file that defines the game. Supported formats: JSON,
    /// TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for atom placement. Overrides the config file. Any text is
    /// allowed
    #[structopt(short, long)]
    seed: Option<Seed>,

    /// Grid radius. Overrides the config file
    #[structopt(short, long)]
    radius: Option<u16>,

    /// Fire a ray from an entry point, given as `x,y,z@degrees`. Can be
    /// given multiple times; rays are fired in order
    #[structopt(long, number_of_values = 1, allow_hyphen_values = true)]
    fire: Vec<EntryPoint>,

    /// Fire a ray from every entry point that hasn't been used yet, after
    /// any `--fire` rays
    #[structopt(long)]
    all_rays: bool,

    /// Guess an atom position, given as `x,y,z`. Giving exactly 6 guesses
    /// ends the game and prints the score
    #[structopt(long, number_of_values = 1, allow_hyphen_values = true)]
    guess: Vec<HexPoint>,

    /// Reveal the hidden atoms on the board
    #[structopt(long)]
    reveal: bool,

    /// If given, the report will be saved to this directory instead of
    /// printed. The files that appear are defined by `--output-formats`
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to save the report in. Supported formats:
    ///
    /// text - The board and ray list, as printed to the terminal
    ///
    /// json - Full report, including every ray's path
    ///
    /// cfg - The config used for the game, in TOML format. Use this to
    ///   replay the same game later
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    Text,
    Json,
    Cfg,
}

impl OutputFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Text => "report.txt",
            Self::Json => "report.json",
            Self::Cfg => "config.toml",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<GameConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Fire a single ray. Bad rays are skipped with a warning rather than
/// aborting the whole session.
fn fire(game: &mut Game, entry: EntryPoint, view: &mut impl BoardView) {
    if let Err(err) = game.fire(entry, view) {
        warn!("Skipping ray from {}: {:#}", entry, err);
    }
}

/// Generate an output form of the report and write it to the directory
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    report: &Report,
) -> anyhow::Result<()> {
    let bytes = match output_format {
        OutputFormat::Text => report.to_string().into_bytes(),
        OutputFormat::Json => serde_json::to_vec_pretty(report)
            .context("error serializing report")?,
        OutputFormat::Cfg => toml::to_string_pretty(report.config)
            .context("error serializing config")?
            .into_bytes(),
    };

    let output_file_path = output_dir.join(output_format.file_name());
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&output_file_path)
        .with_context(|| {
            format!("error opening output file {:?}", &output_file_path)
        })?;
    file.write_all(&bytes).with_context(|| {
        format!("error writing to file {:?}", &output_file_path)
    })?;
    info!("Wrote {} output to {:?}", output_format, output_file_path);
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = opt.seed {
        config.seed = seed;
    }
    if let Some(radius) = opt.radius {
        config.radius = radius;
    }

    let mut game = Game::new(config)?;
    let mut board = TextBoard::new(game.grid());

    for &entry in &opt.fire {
        fire(&mut game, entry, &mut board);
    }
    if opt.all_rays {
        let remaining: Vec<EntryPoint> =
            game.available_entry_points().collect();
        timed!("Firing all remaining rays", log::Level::Info, {
            for entry in remaining {
                // Earlier rays in this loop can use up later entry points
                if !game.is_used(entry) {
                    fire(&mut game, entry, &mut board);
                }
            }
        });
    }

    for &guess in &opt.guess {
        game.toggle_guess(guess)
            .with_context(|| format!("error guessing atom at {}", guess))?;
    }
    if game.guesses().len() == ATOM_COUNT {
        game.finish(&mut board)?;
    } else if !opt.guess.is_empty() {
        info!(
            "{} of {} atoms guessed; the game is scored once all are placed",
            game.guesses().len(),
            ATOM_COUNT
        );
    }
    if opt.reveal {
        game.reveal_atoms(&mut board);
    }

    let report = Report::new(&game, &board, opt.reveal || game.is_over());
    match opt.output {
        Some(output_dir) => {
            if opt.output_formats.is_empty() {
                anyhow::bail!(
                    "output dir was specified, but no output formats were given"
                )
            }
            fs::create_dir_all(&output_dir)?;
            for output_format in opt.output_formats {
                gen_output(&output_dir, output_format, &report)?;
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
