use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use admit_score::applicant::{load_applicant, save_scorecard};
use admit_score::output::{self, OutputFormat};
use admit_score::scoring::{self, Scorecard, ScoringScheme};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one applicant and print the breakdown
    Score {
        /// Applicant record (YAML, or JSON with a .json extension)
        applicant: PathBuf,

        /// Output format (defaults to the config's `format`, then table)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Also write the scorecard as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score several applicants and list them in admission order
    Rank {
        /// Applicant records
        #[arg(required = true)]
        applicants: Vec<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Validate the scoring scheme and, optionally, an applicant record
    Check { applicant: Option<PathBuf> },
    /// Write a config file containing the built-in scoring scheme
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "admit-score")]
#[command(about = "Admission scoring and ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/admit-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    admit_score::logging::init_logger(cli.verbose);

    if let Commands::Init { force } = cli.command {
        let path = match cli.config {
            Some(p) => Ok(p),
            None => admit_score::config::get_config_path(),
        };
        let path = match path {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        match admit_score::config::write_default_config(&path, force) {
            Ok(written) => println!("Wrote default scoring scheme to {}", written.display()),
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match admit_score::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring scheme at startup
    let scheme = config.effective_scheme();
    if let Err(errors) = scoring::validate_scheme(&scheme) {
        eprintln!("Scoring scheme errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    debug!(
        bands = scheme.experience.bands.len(),
        education_fields = scheme.education.fields.len(),
        quantity_fields = scheme.quantity.fields.len(),
        "scoring scheme ready"
    );

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Score {
            applicant,
            format,
            output: output_path,
        } => {
            let card = score_file(&scheme, &applicant);

            if let Some(path) = output_path {
                if let Err(e) = save_scorecard(&path, &card) {
                    eprintln!("Failed to save scorecard: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
                info!(path = %path.display(), "scorecard saved");
            }

            match format.or(config.format).unwrap_or_default() {
                OutputFormat::Table => {
                    println!("{}", output::format_scorecard(&card, &scheme, use_colors))
                }
                OutputFormat::Tsv => println!("{}", output::format_tsv(std::slice::from_ref(&card))),
                OutputFormat::Json => print_json(output::format_json(&card)),
            }
        }
        Commands::Rank { applicants, format } => {
            let cards: Vec<Scorecard> = applicants
                .iter()
                .map(|path| score_file(&scheme, path))
                .collect();
            let ranked = scoring::rank_scorecards(cards);

            match format.or(config.format).unwrap_or_default() {
                OutputFormat::Table => println!("{}", output::format_ranking(&ranked, use_colors)),
                OutputFormat::Tsv => println!("{}", output::format_tsv(&ranked)),
                OutputFormat::Json => print_json(
                    serde_json::to_string_pretty(&ranked).map_err(anyhow::Error::from),
                ),
            }
        }
        Commands::Check { applicant } => {
            if let Some(path) = applicant {
                let card = score_file(&scheme, &path);
                println!("{}: ok (total {})", path.display(), output::format_score(card.total));
            }
            println!("Scoring scheme: ok");
        }
        Commands::Init { .. } => unreachable!("handled before config is loaded"),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and score one applicant file, exiting with EXIT_INPUT on failure.
fn score_file(scheme: &ScoringScheme, path: &Path) -> Scorecard {
    let applicant = match load_applicant(path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Applicant error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    match scoring::build_scorecard(scheme, &applicant) {
        Ok(card) => card,
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn print_json(json: anyhow::Result<String>) {
    match json {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
