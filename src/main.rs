//! advsearch CLI
//!
//! Build, validate, copy or run X/Twitter advanced-search queries from the
//! command line, or open the floating builder panel.

use std::path::{Path, PathBuf};

use advsearch::{
    build, validate, AdvSearchError, AppConfig, Outcome, SearchExecutor, SearchFormState,
    ValidationResult,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use console::style;
use url::Url;

/// advsearch - Advanced search builder for X/Twitter
///
/// Composes exact phrases, OR-words, exclusions, author, date range and
/// media filters into the site's advanced-search syntax.
#[derive(Parser)]
#[command(name = "advsearch")]
#[command(author = "advsearch Contributors")]
#[command(version)]
#[command(about = "Advanced search builder for X/Twitter", long_about = None)]
struct Cli {
    /// Config file (default: advsearch.json next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the fields and print the query
    Build {
        #[command(flatten)]
        fields: FieldArgs,

        /// Print a JSON object instead of the bare query
        #[arg(long)]
        json: bool,
    },

    /// Report per-field validation results
    Validate {
        #[command(flatten)]
        fields: FieldArgs,

        /// Print the verdicts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the query and copy it to the clipboard
    Copy {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Build the query and open the search results page
    Search {
        #[command(flatten)]
        fields: FieldArgs,

        /// Site root to search on (overrides the config file)
        #[arg(long)]
        base_url: Option<Url>,
    },

    /// Open the floating builder panel
    Panel,
}

/// Search form fields
#[derive(Args, Debug)]
struct FieldArgs {
    /// Read the form from a JSON file; flags below override its fields
    #[arg(long)]
    state: Option<PathBuf>,

    /// Exact phrase
    #[arg(long)]
    phrase: Option<String>,

    /// Any of these words, separated by OR (e.g. "apple OR google")
    #[arg(long = "any")]
    any_words: Option<String>,

    /// Word to exclude
    #[arg(long, allow_hyphen_values = true)]
    exclude: Option<String>,

    /// Author account, without @
    #[arg(long = "from")]
    from_user: Option<String>,

    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,

    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    until: Option<NaiveDate>,

    /// Only posts with links
    #[arg(long)]
    links: bool,

    /// Only posts with media
    #[arg(long)]
    media: bool,
}

impl FieldArgs {
    fn into_state(self) -> advsearch::Result<SearchFormState> {
        let mut state = match &self.state {
            Some(path) => read_state(path)?,
            None => SearchFormState::default(),
        };

        if let Some(phrase) = self.phrase {
            state.exact_phrase = phrase;
        }
        if let Some(words) = self.any_words {
            state.any_words = words;
        }
        if let Some(word) = self.exclude {
            state.exclude_word = word;
        }
        if let Some(user) = self.from_user {
            state.from_user = user;
        }
        if self.since.is_some() {
            state.since_date = self.since;
        }
        if self.until.is_some() {
            state.until_date = self.until;
        }
        state.filter_links |= self.links;
        state.filter_media |= self.media;

        Ok(state)
    }
}

fn read_state(path: &Path) -> advsearch::Result<SearchFormState> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() {
    let cli = Cli::parse();

    let result = AppConfig::load(cli.config.as_deref()).and_then(|(mut config, source)| {
        if let Some(level) = cli.log_level {
            config.log_level = level;
        }
        if let Err(e) = advsearch::logging::init(&config.log_level) {
            eprintln!("{} {}", style("Warning:").yellow().bold(), e);
        }
        tracing::info!(version = advsearch::VERSION, "advsearch starting up");
        source.log();
        run(cli.command, config)
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands, mut config: AppConfig) -> advsearch::Result<()> {
    match command {
        Commands::Build { fields, json } => cmd_build(fields.into_state()?, json),

        Commands::Validate { fields, json } => cmd_validate(&fields.into_state()?, json),

        Commands::Copy { fields } => cmd_copy(fields.into_state()?, &config),

        Commands::Search { fields, base_url } => {
            if let Some(url) = base_url {
                config.base_url = url.into();
            }
            cmd_search(fields.into_state()?, &config)
        }

        Commands::Panel => advsearch::gui::run(config),
    }
}

/// Build command implementation
fn cmd_build(state: SearchFormState, json: bool) -> advsearch::Result<()> {
    let verdicts = validate(&state);
    let query = build(&state);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "query": query,
                "valid": verdicts.is_valid(),
                "verdicts": verdicts,
            })
        );
    } else if verdicts.is_valid() && !query.is_empty() {
        println!("{}", query);
    } else {
        print_verdicts(&verdicts);
    }

    verdicts.into_result()?;
    if query.is_empty() {
        return Err(AdvSearchError::EmptyCriteria);
    }
    Ok(())
}

/// Validate command implementation
fn cmd_validate(state: &SearchFormState, json: bool) -> advsearch::Result<()> {
    let verdicts = validate(state);
    if json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        print_verdicts(&verdicts);
    }
    verdicts.into_result()
}

/// Copy command implementation
fn cmd_copy(state: SearchFormState, config: &AppConfig) -> advsearch::Result<()> {
    let query = advsearch::build_checked(&state)?;
    let mut executor = SearchExecutor::one_shot(config)?;
    if cfg!(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )) {
        println!(
            "{} Holding the clipboard until something else takes it (Ctrl+C to stop)",
            style("→").cyan().bold()
        );
    }
    let outcome = executor.copy(&query)?;
    print_outcome(&outcome);
    Ok(())
}

/// Search command implementation
fn cmd_search(state: SearchFormState, config: &AppConfig) -> advsearch::Result<()> {
    let query = advsearch::build_checked(&state)?;
    println!(
        "{} Searching for {}",
        style("→").cyan().bold(),
        style(&query).yellow()
    );
    let mut executor = SearchExecutor::one_shot(config)?;
    let outcome = executor.search(&query)?;
    print_outcome(&outcome);
    Ok(())
}

fn print_verdicts(verdicts: &ValidationResult) {
    for field in advsearch::Field::all() {
        match verdicts.reason(*field) {
            Some(reason) => println!(
                "  {} {:<10} {}",
                style("✗").red().bold(),
                field.as_str(),
                style(reason).red()
            ),
            None => println!("  {} {}", style("✓").green().bold(), field),
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    let mark = if outcome.manual_text.is_some() {
        style("!").yellow().bold()
    } else {
        style("✓").green().bold()
    };
    println!("{} {}", mark, outcome.message);
    if let Some(text) = &outcome.manual_text {
        println!();
        println!("  {}", text);
    }
}
