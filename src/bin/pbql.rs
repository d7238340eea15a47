//! pbql — the pbQL command line
//!
//! # Usage
//!
//! ```bash
//! # Run a query against a fresh address book
//! pbql 'Создай контакт Вася;Покажи имя для контактов, где есть Вася;'
//!
//! # Read the query from a file or stdin
//! pbql --file queries.pbql
//! cat queries.pbql | pbql -
//!
//! # Keep one address book across many queries
//! pbql repl
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pbql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pbql")]
#[command(version)]
#[command(about = "📇 pbQL — phone-book query language", long_about = None)]
#[command(after_help = "EXAMPLES:
    pbql 'Создай контакт Вася;Добавь телефон 9161234567 для контакта Вася;'
    pbql --file book.pbql --format json
    pbql check 'Покажи имя и почты для контактов, где есть @;'
    pbql repl")]
struct Cli {
    /// The pbQL query to run (`-` reads stdin)
    query: Option<String>,

    /// Read the query from a file
    #[arg(long, conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Output format (defaults to the config file setting)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a TOML config file
    #[arg(long, env = "PBQL_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print each statement without running it
    Check {
        /// The pbQL query to check
        query: String,
    },
    /// Interactive session with a persistent address book
    Repl,
    /// Show the keyword reference
    Grammar,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config, cli.verbose);
    if !config.color {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(config.format);

    match &cli.command {
        Some(Commands::Check { query }) => check_query(query),
        Some(Commands::Repl) => run_repl(&config, format),
        Some(Commands::Grammar) => show_grammar(),
        None => {
            let Some(query) = read_query(&cli)? else {
                println!("{}", "📇 pbQL — phone-book query language".cyan().bold());
                println!();
                println!("Usage: pbql <QUERY> [OPTIONS]");
                println!();
                println!("Try: pbql --help");
                return Ok(());
            };

            let mut store = ContactStore::new();
            match pbql::run(&mut store, &query) {
                Ok(lines) => print_lines(&lines, format),
                Err(e) => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &Config, verbose: bool) {
    let default = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_query(cli: &Cli) -> Result<Option<String>> {
    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .map_err(PbqlError::from)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Some(text));
    }

    match cli.query.as_deref() {
        Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(PbqlError::from)
                .context("failed to read stdin")?;
            Ok(Some(text))
        }
        Some(query) => Ok(Some(query.to_string())),
        None => Ok(None),
    }
}

fn print_lines(lines: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Lines => {
            for line in lines {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(lines).unwrap_or_default());
        }
    }
}

fn check_query(query: &str) {
    for statement in statements(query) {
        match statement.and_then(|s| s.parse().map(|cmd| (s.index, cmd))) {
            Ok((index, cmd)) => {
                println!(
                    "{} {:>3}  {}",
                    "✓".green(),
                    (index + 1).to_string().dimmed(),
                    format!("{};", cmd).white()
                );
            }
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e.to_string().red());
                std::process::exit(1);
            }
        }
    }
}

fn run_repl(config: &Config, format: OutputFormat) {
    use rustyline::DefaultEditor;
    use rustyline::error::ReadlineError;

    println!("{}", "📇 pbQL REPL — Interactive Mode".cyan().bold());
    println!("{}", "The address book lives until you exit. Type .help for commands.".dimmed());
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{} {}", "Failed to initialize REPL:".red(), e);
            return;
        }
    };

    let history_path = config.history_path();
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    let mut store = ContactStore::new();

    loop {
        let prompt = "pbql> ".cyan().bold().to_string();
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ".exit" | ".quit" => {
                        println!("{}", "Goodbye! 👋".green());
                        break;
                    }
                    ".help" => {
                        show_repl_help();
                        continue;
                    }
                    ".contacts" => {
                        show_contacts(&store, format);
                        continue;
                    }
                    ".reset" => {
                        store = ContactStore::new();
                        println!("{}", "Address book cleared.".dimmed());
                        continue;
                    }
                    _ => {}
                }

                match pbql::run(&mut store, line) {
                    Ok(lines) => print_lines(&lines, format),
                    Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye! 👋".green());
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red(), err);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
}

fn show_repl_help() {
    println!("{}", "pbQL REPL Commands:".cyan().bold());
    println!("  {}      - Exit the REPL", ".exit".yellow());
    println!("  {}      - Show this help", ".help".yellow());
    println!("  {}  - List every contact", ".contacts".yellow());
    println!("  {}     - Start a new, empty address book", ".reset".yellow());
    println!();
    println!("{}", "Every statement ends with ';':".cyan().bold());
    println!("  Создай контакт Вася;");
    println!("  Добавь телефон 9161234567 и почту vasya@mail.ru для контакта Вася;");
    println!("  Покажи имя и телефоны для контактов, где есть Вас;");
    println!();
}

fn show_contacts(store: &ContactStore, format: OutputFormat) {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(store).unwrap_or_default());
        return;
    }

    if store.is_empty() {
        println!("{}", "(no contacts)".dimmed());
        return;
    }

    for contact in store.iter() {
        println!("{}", contact.name.white().bold());
        for phone in &contact.phones {
            println!("  {} {}", "☎".dimmed(), format_phone(phone));
        }
        for email in &contact.emails {
            println!("  {} {}", "@".dimmed(), email);
        }
    }
    println!();
    println!("{} contact(s)", store.len().to_string().cyan());
}

fn show_grammar() {
    println!("{}", "📇 pbQL Keyword Reference".cyan().bold());
    println!();

    let keywords = [
        ("Создай", "Verb", "Create a contact"),
        ("Удали", "Verb", "Delete contacts or their details"),
        ("Добавь", "Verb", "Add phones and emails"),
        ("Покажи", "Verb", "Show matching contacts"),
        ("контакт", "Object", "A single contact by name"),
        ("контакты,", "Object", "Every contact matching a substring"),
        ("телефон", "Clause", "Followed by 10 digits"),
        ("почту", "Clause", "Followed by an email"),
        ("имя", "Field", "Contact name"),
        ("телефоны", "Field", "Phones as +7 (XXX) XXX-XX-XX"),
        ("почты", "Field", "Emails"),
        ("и", "Connector", "Joins clauses and fields"),
        ("для", "Connector", "Ends a clause or field list"),
        ("где есть", "Filter", "Substring match on name, phones, emails"),
        (";", "Separator", "Ends every statement"),
    ];

    println!(
        "{:12} {:10} {}",
        "Keyword".white().bold(),
        "Kind".white().bold(),
        "Meaning".white().bold()
    );
    println!("{}", "─".repeat(64).dimmed());

    for (keyword, kind, meaning) in keywords {
        println!(
            "{:12} {:10} {}",
            keyword.cyan().bold(),
            kind.yellow(),
            meaning.white()
        );
    }
}
