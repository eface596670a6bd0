use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use misspell::cli::output::{self, OutputFormat};
use misspell::{decode_input, Config, MisspellResult, Misspeller, Mode, RuleSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "misspell")]
#[command(version, about = "Slightly misspells a string or file", long_about = None)]
struct Cli {
    /// Input file, `-` for stdin, or the text itself with --string
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (printed to stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Treat INPUT as the text to misspell instead of a file path
    #[arg(short, long)]
    string: bool,

    /// Settings file
    #[arg(short, long, value_name = "FILE", env = "MISSPELL_CONFIG")]
    config: Option<PathBuf>,

    /// Phonological rule file (overrides the one named in the settings)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Apply only phonological misspelling
    #[arg(short, long, conflicts_with = "typo")]
    phono: bool,

    /// Apply only typographical misspelling
    #[arg(short, long)]
    typo: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Settings file management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a commented default settings file
    Init {
        /// Where to write it (defaults to ./.misspell.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.phono {
            Mode::Phonological
        } else if self.typo {
            Mode::Typographical
        } else {
            Mode::All
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "misspell", &mut io::stdout());
        return Ok(());
    }

    // Handle subcommands
    if let Some(command) = &cli.command {
        return handle_command(command, cli.config.as_deref());
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input specified. Use --help for usage information.");
    };

    let config = Config::load(cli.config.as_deref());
    let mode = cli.mode();
    let rules = if mode.phonological() {
        let rules_path = cli.rules.as_deref().or(config.rules.as_deref());
        RuleSet::load(rules_path)
    } else {
        RuleSet::default()
    };
    let misspeller = Misspeller::new(&config, rules, mode);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let text = read_input(input, cli.string)?;
    let line_count = text.split('\n').count();

    let misspelled = if cli.output.is_some() && !cli.quiet {
        let pb = ProgressBar::new(line_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} lines")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let out = misspeller
            .misspell_text_with_progress(&text, &mut rng, |n| pb.set_position(n as u64));
        pb.finish_and_clear();
        out
    } else {
        misspeller.misspell_text(&text, &mut rng)
    };

    let result = MisspellResult {
        mode: misspeller.mode(),
        line_count,
        input: text,
        output: misspelled,
    };
    let rendered = output::render(&result, cli.format)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            if !cli.quiet {
                output::print_summary(&result, path, !cli.no_color);
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str, literal: bool) -> Result<String> {
    if literal {
        return Ok(input.to_string());
    }

    let bytes = if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read standard input")?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    Ok(decode_input(bytes)?)
}

fn handle_command(command: &Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Config { action } => match action {
            ConfigCommands::Init { path, force } => {
                let path = path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(misspell::config::LOCAL_CONFIG_FILE));
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists. Pass --force to overwrite it.",
                        path.display()
                    );
                }
                Config::write_default(&path)?;
                println!("Wrote default settings to {}", path.display());
            }
            ConfigCommands::Show => {
                let config = Config::load(config_path);
                print!("{}", config.to_toml()?);
            }
        },
    }
    Ok(())
}
