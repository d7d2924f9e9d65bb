use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;

use envmint::detector::{detect_env_files, environment_files, find_example_file};
use envmint::formatter::{self, FormatOptions};
use envmint::git_check;
use envmint::sync::{format_sync_result, sync_env_file, SyncOptions};
use envmint::validator::{EnvValidator, ValidationResult};

const DEFAULT_SOURCE: &str = ".env.example";
const DEFAULT_TARGET: &str = ".env.local";

#[derive(Parser)]
#[command(name = "envmint")]
#[command(about = "Verify, compare and validate .env files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate .env files against .env.example (default command)
    Validate {
        /// Environment mode (development, production, test, etc.)
        #[arg(short, long)]
        mode: Option<String>,

        /// Check git integration and .gitignore
        #[arg(short, long)]
        git: bool,

        /// Show detailed output
        #[arg(short, long)]
        verbose: bool,

        /// Output format (table, json, summary)
        #[arg(short, long, default_value = "summary")]
        output: String,
    },
    /// Sync a target env file with .env.example
    Sync {
        /// Target file to sync
        target: Option<String>,

        /// Target file to sync (overrides the positional argument)
        #[arg(short = 't', long = "target", value_name = "FILE")]
        target_flag: Option<String>,
    },
    /// List all .env files in the current directory
    List,
}

fn main() {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Validate {
        mode: None,
        git: false,
        verbose: false,
        output: "summary".to_string(),
    });

    let exit_code = match command {
        Commands::Validate {
            mode,
            git,
            verbose,
            output,
        } => run_validate(mode.as_deref(), git, verbose, &output),
        Commands::Sync {
            target,
            target_flag,
        } => {
            let target = target_flag
                .or(target)
                .unwrap_or_else(|| DEFAULT_TARGET.to_string());
            run_sync(&target)
        }
        Commands::List => run_list(),
    };

    std::process::exit(exit_code);
}

fn run_validate(mode: Option<&str>, git: bool, verbose: bool, output: &str) -> i32 {
    println!("🔍 Scanning for .env files...\n");

    let directory = Path::new(".");
    let env_files = detect_env_files(directory);

    if env_files.is_empty() {
        println!("❌ No .env files found in the current directory");
        return 0;
    }

    println!("📁 Found {} .env file(s):", env_files.len());
    for file in &env_files {
        println!("   • {} ({} variables)", file.name, file.variables.len());
    }
    println!();

    let example_file = find_example_file(&env_files);
    if example_file.is_none() {
        println!("⚠️  No .env.example file found. Validation will be limited.\n");
    }

    let candidates: Vec<_> = match mode {
        Some(mode) => environment_files(&env_files, mode),
        None => env_files.iter().collect(),
    };

    let validator = EnvValidator::new();
    let results: Vec<ValidationResult> = candidates
        .iter()
        // Template files are the baseline, not candidates.
        .filter(|file| file.name != ".env.example" && !file.name.ends_with(".example"))
        .map(|file| validator.validate(file, example_file))
        .collect();

    if git {
        let git_status = git_check::check_gitignore(directory);
        if !git_status.is_properly_ignored {
            println!("{}", git_check::format_git_warnings(&git_status.warnings));
        }
    }

    match output {
        "json" => match formatter::format_json(&results) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{}", format!("❌ Failed to serialize results: {err}").red());
                return 1;
            }
        },
        "table" => println!("{}", formatter::format_table(&results)),
        _ => println!(
            "{}",
            formatter::format_results(&results, &FormatOptions { verbose })
        ),
    }

    if results.iter().any(|result| !result.is_valid) {
        1
    } else {
        0
    }
}

fn run_sync(target: &str) -> i32 {
    let source = Path::new(DEFAULT_SOURCE);

    if !source.exists() {
        println!("{}", format!("❌ Source file not found: {DEFAULT_SOURCE}").red());
        println!(
            "{}",
            "💡 Create a .env.example file first with your template variables.".yellow()
        );
        return 1;
    }

    println!(
        "{}",
        format!("🔄 Syncing {DEFAULT_SOURCE} → {target}...\n").blue()
    );

    match sync_env_file(&SyncOptions::new(source, target)) {
        Ok(result) => {
            println!("{}", format_sync_result(&result));
            println!("{}", "\n✅ Sync completed successfully!".green());
            println!("{}", "   • Existing values were preserved".dimmed());
            println!(
                "{}",
                "   • Empty values were filled with TODO_ placeholders".dimmed()
            );
            println!("{}", "   • Review and update the values as needed".dimmed());
            0
        }
        Err(err) => {
            eprintln!("{}", format!("❌ Error during sync: {err}").red());
            1
        }
    }
}

fn run_list() -> i32 {
    let env_files = detect_env_files(Path::new("."));

    if env_files.is_empty() {
        println!(
            "{}",
            "No .env files found in the current directory".yellow()
        );
        return 0;
    }

    println!("{}", format!("Found {} .env file(s):\n", env_files.len()).blue());

    for file in &env_files {
        let status = if file.is_empty {
            "Empty".red().to_string()
        } else {
            format!("{} variables", file.variables.len()).green().to_string()
        };
        println!("  {} - {}", file.name.bold(), status);
        println!("    {}", file.path.display().to_string().dimmed());
    }

    0
}
