//! File discovery and linting for the `check` command

use anyhow::Context;
use colored::*;
use ignore::WalkBuilder;
use mdlite_lib::Linter;
use mdlite_lib::rule::LintWarning;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Path argument that selects standard input
pub const STDIN_PATH: &str = "-";

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn", "mdwn"];

fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Expand the given paths into the list of Markdown files to lint.
///
/// Explicit file arguments are always kept; directories are walked with
/// `.gitignore` and hidden-file filtering and yield only Markdown files.
pub fn find_markdown_files(paths: &[String]) -> anyhow::Result<Vec<String>> {
    let mut file_paths = Vec::new();
    let mut dirs = Vec::new();

    for path in paths {
        let candidate = Path::new(path);
        if candidate.is_file() {
            file_paths.push(path.clone());
        } else if candidate.is_dir() {
            dirs.push(path.clone());
        } else {
            anyhow::bail!("Path not found: {path}");
        }
    }

    if paths.is_empty() {
        dirs.push(".".to_string());
    }

    if let Some((first, rest)) = dirs.split_first() {
        let mut walk_builder = WalkBuilder::new(first);
        for dir in rest {
            walk_builder.add(dir);
        }

        let mut types_builder = ignore::types::TypesBuilder::new();
        for ext in MARKDOWN_EXTENSIONS {
            types_builder.add("markdown", &format!("*.{ext}"))?;
        }
        types_builder.select("markdown");
        walk_builder.types(types_builder.build()?);

        for result in walk_builder.build() {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_markdown_path(path) {
                        let file_path = path.to_string_lossy();
                        let cleaned = file_path.strip_prefix("./").unwrap_or(&file_path);
                        file_paths.push(cleaned.to_string());
                    }
                }
                Err(err) => log::warn!("Error walking directory: {err}"),
            }
        }
    }

    file_paths.sort();
    file_paths.dedup();
    Ok(file_paths)
}

/// Read a document from a path, or from stdin for [`STDIN_PATH`]
pub fn read_input(path: &str) -> anyhow::Result<String> {
    if path == STDIN_PATH {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file {path}"))
}

/// Lint one file, returning its warnings in pipeline order
pub fn lint_file(path: &str, linter: &Linter) -> anyhow::Result<Vec<LintWarning>> {
    let content = read_input(path)?;
    let warnings = linter
        .lint(&content)
        .with_context(|| format!("Failed to lint {path}"))?;
    log::debug!("{path}: {} warnings", warnings.len());
    Ok(warnings)
}

/// Lint every file, in parallel when the `parallel` feature is enabled.
/// Results keep the order of `files`.
pub fn lint_files(files: &[String], linter: &Linter) -> Vec<(String, anyhow::Result<Vec<LintWarning>>)> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        files
            .par_iter()
            .map(|path| (path.clone(), lint_file(path, linter)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        files
            .iter()
            .map(|path| (path.clone(), lint_file(path, linter)))
            .collect()
    }
}

/// Render a warning as `file:line:col: [rule] message`
pub fn format_warning(path: &str, warning: &LintWarning) -> String {
    let rule_name = warning.rule_name.as_deref().unwrap_or("unknown");
    format!(
        "{}:{}:{}: {} {}",
        path.blue().underline(),
        warning.line.to_string().cyan(),
        warning.column.to_string().cyan(),
        format!("[{rule_name}]").yellow(),
        warning.message
    )
}
