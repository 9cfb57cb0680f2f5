use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::Path;

use mdlite_lib::config::{self as mdlite_config, Config};
use mdlite_lib::exit_codes::exit;
use mdlite_lib::{Linter, OffsetEncoding, extract_style_ranges_with, to_annotated_ranges};

mod file_processor;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = ["auto", "always", "never"])]
    color: String,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Markdown files and print warnings
    Check(CheckArgs),
    /// Print the style ranges of a Markdown file as JSON
    Styles {
        /// File to analyze (use '-' for stdin)
        file: String,
        /// Print tagged decoration ranges instead of the grouped ranges
        #[arg(long)]
        annotated: bool,
        /// Offset unit, overriding the configuration: utf16 or utf8
        #[arg(long)]
        encoding: Option<OffsetEncoding>,
    },
    /// Show information about a rule or list all rules
    Rule {
        /// Rule name (optional)
        rule: Option<String>,
    },
    /// Initialize a new configuration file
    Init,
    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Files or directories to lint (use '-' for stdin)
    #[arg(required = false)]
    paths: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(short, long)]
    disable: Option<String>,

    /// Enable only specific rules (comma-separated)
    #[arg(short, long)]
    enable: Option<String>,

    /// Print diagnostics, but nothing else
    #[arg(short, long)]
    quiet: bool,
}

fn split_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(mdlite_config::normalize_key)
        .filter(|rule| !rule.is_empty())
        .collect()
}

/// Load the configuration the CLI flags select, exiting on configuration errors
fn load_config_with_cli_error_handling(cli: &Cli) -> Config {
    if cli.no_config {
        return Config::default();
    }

    let start_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    match Config::load_or_discover(cli.config.as_deref().map(Path::new), &start_dir) {
        Ok((config, path)) => {
            if let Some(path) = path {
                log::debug!("Using configuration {}", path.display());
            }
            config
        }
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn run_check(args: &CheckArgs, mut config: Config) {
    // CLI --enable replaces the configured list; --disable extends it
    if let Some(enable) = &args.enable {
        config.global.enable = split_rule_list(enable);
    }
    if let Some(disable) = &args.disable {
        config.global.disable.extend(split_rule_list(disable));
    }

    let linter = Linter::new(&config);
    if linter.rules().is_empty() {
        eprintln!("{}: No rules enabled", "Error".red().bold());
        exit::tool_error();
    }

    let files = if args.paths.iter().any(|p| p == file_processor::STDIN_PATH) {
        vec![file_processor::STDIN_PATH.to_string()]
    } else {
        match file_processor::find_markdown_files(&args.paths) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("{}: {e:#}", "Error".red().bold());
                exit::tool_error();
            }
        }
    };

    let mut total_warnings = 0;
    let mut files_with_issues = 0;
    let mut had_error = false;

    for (path, result) in file_processor::lint_files(&files, &linter) {
        match result {
            Ok(warnings) => {
                if !warnings.is_empty() {
                    files_with_issues += 1;
                }
                total_warnings += warnings.len();
                for warning in &warnings {
                    println!("{}", file_processor::format_warning(&path, warning));
                }
            }
            Err(e) => {
                eprintln!("{}: {e:#}", "Error".red().bold());
                had_error = true;
            }
        }
    }

    if !args.quiet {
        if total_warnings == 0 {
            println!("{} No issues found in {} file(s)", "Success:".green().bold(), files.len());
        } else {
            println!(
                "\n{} Found {} issue(s) in {} file(s) ({} file(s) checked)",
                "Issues:".yellow().bold(),
                total_warnings,
                files_with_issues,
                files.len()
            );
        }
    }

    if had_error {
        exit::tool_error();
    }
    if total_warnings > 0 {
        exit::violations_found();
    }
}

fn run_styles(file: &str, annotated: bool, encoding: OffsetEncoding) -> anyhow::Result<()> {
    let content = file_processor::read_input(file)?;
    let ranges = extract_style_ranges_with(&content, encoding);
    let json = if annotated {
        serde_json::to_string_pretty(&to_annotated_ranges(&ranges))?
    } else {
        serde_json::to_string_pretty(&ranges)?
    };
    println!("{json}");
    Ok(())
}

fn handle_rule_command(rule_query: Option<&str>, config: &Config) {
    let all_rules = mdlite_lib::rules::all_rules(config);

    let Some(rule_query) = rule_query else {
        println!("Available rules:");
        for rule in &all_rules {
            println!("  {} - {}", rule.name().bold(), rule.description());
        }
        return;
    };

    let rule_query = mdlite_config::normalize_key(rule_query);
    let Some(rule) = all_rules.iter().find(|r| r.name() == rule_query) else {
        eprintln!("{}: Rule '{}' not found.", "Error".red().bold(), rule_query);
        eprintln!("\nUse 'mdlite rule' to see all available rules.");
        exit::tool_error();
    };

    println!("{}", format!("{} - {}", rule.name(), rule.description()).bold());
    println!("Category: {:?}", rule.category());
    if let Some((name, section)) = rule.default_config_section() {
        println!("\n{}", "Default Configuration:".bold());
        println!("{}", format!("[{name}]").dimmed());
        if let Ok(config_str) = toml::to_string_pretty(&section) {
            for line in config_str.lines() {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn handle_schema_command() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Config);
    let mut schema_value = serde_json::to_value(&schema)?;

    // Rule sections are flattened next to [global]
    if let Some(schema_obj) = schema_value.as_object_mut() {
        schema_obj.insert(
            "additionalProperties".to_string(),
            serde_json::json!({ "$ref": "#/$defs/RuleConfig" }),
        );
    }

    println!("{}", serde_json::to_string_pretty(&schema_value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::unset_override(),
    }

    match &cli.command {
        Commands::Check(args) => {
            let config = load_config_with_cli_error_handling(&cli);
            run_check(args, config);
        }
        Commands::Styles {
            file,
            annotated,
            encoding,
        } => {
            let encoding = match encoding {
                Some(encoding) => *encoding,
                None => load_config_with_cli_error_handling(&cli).offset_encoding(),
            };
            if let Err(e) = run_styles(file, *annotated, encoding) {
                eprintln!("{}: {e:#}", "Error".red().bold());
                exit::tool_error();
            }
        }
        Commands::Rule { rule } => {
            let config = load_config_with_cli_error_handling(&cli);
            handle_rule_command(rule.as_deref(), &config);
        }
        Commands::Init => match mdlite_config::create_default_config(Path::new(".mdlite.toml")) {
            Ok(()) => println!("Created default configuration file: .mdlite.toml"),
            Err(e) => {
                eprintln!("{}: Failed to create config file: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        },
        Commands::Schema => {
            if let Err(e) = handle_schema_command() {
                eprintln!("{}: Failed to generate schema: {e:#}", "Error".red().bold());
                exit::tool_error();
            }
        }
    }

    Ok(())
}
