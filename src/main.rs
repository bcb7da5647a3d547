//! Command-line interface for the wordwise dictionary.
//!
//! Looks up definitions through a public dictionary API, shows a word of the
//! day and remembers the last few searches.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, debug, error, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use wordwise::{Options, PickPolicy, View, Wordwise, error::Result, render};

#[derive(Parser, Debug)]
#[command(author, version, about = "WordWise dictionary CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a custom database file for local state (optional)
    #[arg(long, global = true, env = "WORDWISE_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Base URL of the dictionary API
    #[arg(long, global = true, env = "WORDWISE_API_BASE", default_value = wordwise::lookup::DEFAULT_API_BASE)]
    api_base: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "WORDWISE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Pick the word of the day from the calendar date instead of at random
    #[arg(long, global = true, default_value_t = false)]
    daily: bool,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive session (the default)
    Interactive,
    /// Define a word
    Define {
        /// The word to define
        word: String,
    },
    /// Show the word of the day
    Wotd,
    /// List recent searches
    Recent,
    /// Forget recent searches
    ClearHistory,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            db_path: self.db_path.clone(),
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            policy: if self.daily {
                PickPolicy::Daily
            } else {
                PickPolicy::Random
            },
        }
    }
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Spinner shown while a request is outstanding.
fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut ww = match Wordwise::open(&cli.options()) {
        Ok(ww) => ww,
        Err(e) => {
            error!("Failed to start: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&mut ww).await?,
        Commands::Define { word } => {
            if !handle_define(&mut ww, &word).await {
                std::process::exit(1);
            }
        }
        Commands::Wotd => {
            if !handle_wotd(&mut ww).await {
                std::process::exit(1);
            }
        }
        Commands::Recent => print!("{}", render::recent(ww.state.recent())),
        Commands::ClearHistory => match ww.state.clear_recent() {
            Ok(()) => println!("{}", "Recent searches cleared.".green()),
            Err(e) => {
                error!("Failed to clear recent searches: {}", e);
                eprintln!("{}", format!("Error clearing recent searches: {}", e).red());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Looks up `word`, renders the outcome and returns whether it succeeded.
async fn handle_define(ww: &mut Wordwise, word: &str) -> bool {
    let pb = spinner(format!("Looking up '{}'...", word.trim()));
    let outcome = ww.search(word).await;
    pb.finish_and_clear();

    match outcome {
        Ok(result) => {
            println!("{}", render::found(result.term()));
            print!("{}", render::result(&result));
            true
        }
        Err(e) => {
            debug!("Lookup failed: {:?}", e);
            eprintln!("{}", render::error(&e));
            false
        }
    }
}

async fn handle_wotd(ww: &mut Wordwise) -> bool {
    let pb = spinner("Fetching the word of the day...".to_string());
    let state = ww.refresh_word_of_day().await;
    pb.finish_and_clear();

    print!("{}", render::word_of_day(state));
    match &state.result {
        Some(result) => {
            print!("{}", render::result(result));
            true
        }
        None => false,
    }
}

fn show_landing(ww: &Wordwise) {
    print!("{}", render::view_header(View::Landing));
    print!("{}", render::word_of_day(ww.state.word_of_day()));
    print!("{}", render::recent(ww.state.recent()));
}

fn prompt(view: View) {
    let label = match view {
        View::Landing => "home",
        View::Search => "search",
    };
    print!("{} ", format!("{}>", label).bold());
    std::io::stdout().flush().ok();
}

/// A line typed in the search view.
#[derive(Debug, PartialEq, Eq)]
enum SearchInput<'a> {
    Back,
    Clear,
    Recent,
    Unknown(&'a str),
    Term(&'a str),
}

impl<'a> SearchInput<'a> {
    /// `:`-prefixed input is a command and never reaches the provider.
    fn parse(input: &'a str) -> Self {
        match input {
            ":back" => SearchInput::Back,
            ":clear" => SearchInput::Clear,
            ":recent" => SearchInput::Recent,
            command if command.starts_with(':') => SearchInput::Unknown(command),
            term => SearchInput::Term(term),
        }
    }
}

/// Two-view session: landing (word of the day, recent searches) and search.
async fn run_interactive(ww: &mut Wordwise) -> Result<()> {
    info!("Starting interactive session");
    let pb = spinner("Fetching the word of the day...".to_string());
    ww.refresh_word_of_day().await;
    pb.finish_and_clear();
    show_landing(ww);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(ww.state.view());
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if matches!(input, ":quit" | ":q") {
            break;
        }

        match ww.state.view() {
            View::Landing => match input {
                "start" | "s" => {
                    ww.state.start();
                    print!("{}", render::view_header(View::Search));
                }
                "wotd" => {
                    let pb = spinner("Fetching the word of the day...".to_string());
                    let state = ww.refresh_word_of_day().await;
                    pb.finish_and_clear();
                    print!("{}", render::word_of_day(state));
                }
                "" => {}
                _ => println!("{}", "Type 'start' to begin searching.".dimmed()),
            },
            View::Search => match SearchInput::parse(input) {
                SearchInput::Back => {
                    ww.state.back();
                    show_landing(ww);
                }
                SearchInput::Clear => {
                    ww.state.clear();
                    println!("{}", "Form cleared".blue());
                }
                SearchInput::Recent => print!("{}", render::recent(ww.state.recent())),
                SearchInput::Unknown(command) => println!(
                    "{}",
                    format!(
                        "Unknown command '{}'. Use ':back', ':clear', ':recent' or ':quit'.",
                        command
                    )
                    .yellow()
                ),
                SearchInput::Term(term) => {
                    handle_define(ww, term).await;
                }
            },
        }
    }

    println!();
    Ok(())
}
