use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use complaint_triage_core::{
    sample_records, ClassifiedBatch, ClassifiedRecord, Classifier, Result, RuleTable,
    TriageError, RULES_FILE,
};

mod args;
mod input;
use args::{Cli, Commands, OutputFormat, RulesAction, Shell};

const RULES_ENV: &str = "COMPLAINT_TRIAGE_RULES";
const DEMO_FILTER_CATEGORY: &str = "Technical Issue";
const DEMO_QUERY_CATEGORY: &str = "Billing Inquiry";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let rules_path = resolve_rules_path(cli.rules);

    let result = match cli.command {
        Some(Commands::Classify {
            input,
            format,
            output,
            category,
        }) => with_rules(rules_path.as_deref(), |table| {
            handle_classify(table, input.as_deref(), format, output, category.as_deref())
        }),
        Some(Commands::Text { text, output }) => with_rules(rules_path.as_deref(), |table| {
            handle_text(table, &text.join(" "), output)
        }),
        Some(Commands::Demo { output }) => {
            with_rules(rules_path.as_deref(), |table| handle_demo(table, output))
        }
        Some(Commands::Rules { action }) => handle_rules(action, rules_path.as_deref()),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    // Fails only if a global subscriber is already set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "complaint-triage", &mut io::stdout());
}

fn home_rules_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".complaint-triage").join(RULES_FILE))
}

/// Priority: --rules > $COMPLAINT_TRIAGE_RULES > ~/.complaint-triage/rules.toml > builtin
fn resolve_rules_path(cli_rules: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = cli_rules {
        return Some(path);
    }

    if let Ok(path) = std::env::var(RULES_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    home_rules_path().filter(|p| p.exists())
}

/// Load the rule table once and hand it to `f` by reference
fn with_rules<T>(path: Option<&Path>, f: impl FnOnce(&RuleTable) -> Result<T>) -> Result<T> {
    match path {
        Some(path) => {
            let table = RuleTable::load_from_file(path)?;
            info!(path = %path.display(), categories = table.len(), "loaded rule file");
            f(&table)
        }
        None => f(RuleTable::shared_builtin()?),
    }
}

fn handle_classify(
    table: &RuleTable,
    input: Option<&Path>,
    format: args::InputFormat,
    output: OutputFormat,
    category: Option<&str>,
) -> Result<()> {
    let records = match input {
        Some(path) => input::read_records(BufReader::new(File::open(path)?), format)?,
        None => input::read_records(io::stdin().lock(), format)?,
    };
    info!(records = records.len(), "read complaint records");

    let classifier = Classifier::new(table)?;
    let batch = classifier.classify_batch(&records);

    let selected: Vec<&ClassifiedRecord> = match category {
        Some(name) => {
            if table.get(name).is_none() {
                warn!(category = name, "category is not defined in the rule table");
            }
            batch.in_category(name)
        }
        None => batch.records().iter().collect(),
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
        OutputFormat::Table => {
            println!();
            print_records(&selected);
            println!();
        }
    }

    Ok(())
}

fn handle_text(table: &RuleTable, text: &str, output: OutputFormat) -> Result<()> {
    let classifier = Classifier::new(table)?;
    let categories = classifier.classify(Some(text));

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string(&categories)?),
        OutputFormat::Table => {
            if categories.is_empty() {
                println!("{}", "(no category)".dimmed());
            }
            for category in &categories {
                println!("{}", category.cyan());
            }
        }
    }

    Ok(())
}

fn handle_demo(table: &RuleTable, output: OutputFormat) -> Result<()> {
    let classifier = Classifier::new(table)?;
    let batch = classifier.classify_batch(&sample_records());

    match output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "records": batch.records(),
                "filtered": {
                    "category": DEMO_FILTER_CATEGORY,
                    "records": batch.in_category(DEMO_FILTER_CATEGORY),
                },
                "counts": batch.category_counts(),
                "query": {
                    "category": DEMO_QUERY_CATEGORY,
                    "records": batch.in_category(DEMO_QUERY_CATEGORY),
                },
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => print_demo(&batch),
    }

    Ok(())
}

fn print_demo(batch: &ClassifiedBatch) {
    let all: Vec<&ClassifiedRecord> = batch.records().iter().collect();

    println!();
    println!("{}", "Classified Complaints:".cyan().bold());
    println!();
    print_records(&all);

    println!();
    println!(
        "{}",
        format!("{} Complaints:", DEMO_FILTER_CATEGORY).cyan().bold()
    );
    println!();
    print_records(&batch.in_category(DEMO_FILTER_CATEGORY));

    println!();
    println!("{}", "Category Counts:".cyan().bold());
    println!();
    for count in batch.category_counts() {
        println!("  {:<20} {}", count.category, count.count.to_string().bold());
    }
    println!(
        "  {:<20} {}",
        "(uncategorized)".dimmed(),
        batch.uncategorized().len().to_string().bold()
    );

    println!();
    println!(
        "{}",
        format!("{} Complaints:", DEMO_QUERY_CATEGORY).cyan().bold()
    );
    println!();
    print_records(&batch.in_category(DEMO_QUERY_CATEGORY));
    println!();
}

fn print_records(records: &[&ClassifiedRecord]) {
    if records.is_empty() {
        println!("  {}", "No records.".dimmed());
        return;
    }

    for record in records {
        let text = match &record.text {
            Some(text) => truncate(text, 60),
            None => "(null)".dimmed().to_string(),
        };
        let categories = if record.categories.is_empty() {
            "-".dimmed().to_string()
        } else {
            record
                .categories
                .iter()
                .map(|c| c.yellow().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!("{:>4}  {}", record.id.to_string().bold(), text);
        println!("      {} {}", "→".dimmed(), categories);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

fn handle_rules(action: RulesAction, rules_path: Option<&Path>) -> Result<()> {
    match action {
        RulesAction::List => with_rules(rules_path, |table| {
            println!();
            for rule in table.categories() {
                println!("{}", rule.name.cyan().bold());
                println!("  {}", rule.keywords.join(", "));
            }
            println!();
            Ok(())
        })?,
        RulesAction::Path => match rules_path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", "(builtin)".dimmed()),
        },
        RulesAction::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => home_rules_path().ok_or(TriageError::HomeNotFound)?,
            };
            if path.exists() && !force {
                return Err(TriageError::RulesFileExists { path });
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, RuleTable::default_template())?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        RulesAction::Check { path } => {
            let table = RuleTable::load_from_file(&path)?;
            Classifier::new(&table)?;
            let keywords: usize = table.categories().iter().map(|c| c.keywords.len()).sum();
            println!(
                "{} {} ({} categories, {} keywords)",
                "OK:".green(),
                path.display(),
                table.len(),
                keywords
            );
        }
    }

    Ok(())
}
