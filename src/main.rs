use clap::Parser;
use colored::*;
use ignore::WalkBuilder;
use std::path::Path;
use std::process;
use std::time::Instant;

use gshlint::exit_codes;
use gshlint::locator::Notice;
use gshlint::shellcheck::ShellcheckRunner;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Groovy files or directories to lint.
    /// Directories are walked recursively, filtering to *.groovy files.
    #[arg(required = false)]
    paths: Vec<String>,

    /// Shellcheck binary to invoke
    #[arg(long, default_value = "shellcheck")]
    shellcheck: String,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode
    #[arg(short, long)]
    quiet: bool,
}

/// Collect the files to lint: explicitly named files as-is, directories
/// walked recursively and filtered to the .groovy extension.
fn find_groovy_files(paths: &[String]) -> Vec<String> {
    let mut file_paths = Vec::new();
    let mut dirs = Vec::new();

    for path in paths {
        if Path::new(path).is_file() {
            // Explicit files are linted regardless of extension.
            file_paths.push(path.clone());
        } else {
            dirs.push(path);
        }
    }

    if let Some((first, rest)) = dirs.split_first() {
        let mut walk_builder = WalkBuilder::new(first);
        for dir in rest {
            walk_builder.add(dir);
        }
        walk_builder.hidden(true); // Keep hidden files ignored unconditionally
        walk_builder.require_git(false);

        for result in walk_builder.build() {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && path.extension().is_some_and(|ext| ext == "groovy") {
                        let file_path = path.to_string_lossy();
                        // Clean the path before pushing
                        let cleaned_path = file_path.strip_prefix("./").unwrap_or(&file_path);
                        file_paths.push(cleaned_path.to_string());
                    }
                }
                Err(err) => eprintln!("Error walking directory: {err}"),
            }
        }
    }

    file_paths.sort();
    file_paths.dedup();
    file_paths
}

fn print_notice(file_path: &str, notice: &Notice) {
    let (line, what) = match notice {
        Notice::NoQuotes { keyword_line } => (keyword_line, "sh with no quotes"),
        Notice::NoEndQuotes { keyword_line } => (keyword_line, "sh with no end quotes"),
    };
    eprintln!(
        "{} {}:{}: {}",
        "Warning:".yellow().bold(),
        file_path,
        line + 1,
        what
    );
}

// Function to print the run summary
fn print_results(
    quiet: bool,
    total_files_processed: usize,
    files_with_findings: usize,
    total_findings: usize,
    duration_ms: u64,
) {
    if quiet {
        return;
    }

    // Choose singular or plural form of "file" based on count
    let file_text = if total_files_processed == 1 { "file" } else { "files" };

    if total_findings > 0 {
        let finding_text = if total_findings == 1 { "finding" } else { "findings" };
        println!(
            "{} {} {} in {} of {} {} ({}ms)",
            "Found:".yellow().bold(),
            total_findings,
            finding_text,
            files_with_findings,
            total_files_processed,
            file_text,
            duration_ms
        );
    } else {
        println!(
            "{} No issues found in {} {} ({}ms)",
            "Success:".green().bold(),
            total_files_processed,
            file_text,
            duration_ms
        );
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // If no paths provided, print error and exit
    if cli.paths.is_empty() {
        eprintln!(
            "{}: No files or directories specified. Please provide at least one path to lint.",
            "Error".red().bold()
        );
        process::exit(exit_codes::TOOL_ERROR);
    }

    // Every argument must name an existing file or directory
    for path in &cli.paths {
        let p = Path::new(path);
        if !p.is_file() && !p.is_dir() {
            eprintln!(
                "{}: {} is not a file or directory",
                "Error".red().bold(),
                path
            );
            process::exit(exit_codes::TOOL_ERROR);
        }
    }

    let file_paths = find_groovy_files(&cli.paths);
    if file_paths.is_empty() {
        if !cli.quiet {
            println!("No Groovy files found to check.");
        }
        return;
    }

    let runner = ShellcheckRunner::new(cli.shellcheck.as_str());
    let start_time = Instant::now();

    let mut total_files_processed = 0;
    let mut files_with_findings = 0;
    let mut total_findings = 0;
    let mut tool_error = false;

    // Process files sequentially
    for file_path in &file_paths {
        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "{} Failed to read file {}: {}",
                    "Error:".red().bold(),
                    file_path,
                    err
                );
                tool_error = true;
                continue;
            }
        };

        total_files_processed += 1;

        match gshlint::lint_shell_fragments(&content, file_path, &runner) {
            Ok(report) => {
                for notice in &report.notices {
                    print_notice(file_path, notice);
                }
                for block in &report.findings {
                    println!("{block}");
                }
                if !report.findings.is_empty() {
                    files_with_findings += 1;
                    total_findings += report.findings.len();
                } else if cli.verbose && report.notices.is_empty() {
                    println!("No issues found in {file_path}");
                }
            }
            // Shellcheck could not run: abandon this document, keep going
            // with the rest, and report a tool error at exit.
            Err(err) => {
                eprintln!("{} {}: {}", "Error:".red().bold(), file_path, err);
                tool_error = true;
            }
        }
    }

    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs() * 1000 + duration.subsec_millis() as u64;

    print_results(
        cli.quiet,
        total_files_processed,
        files_with_findings,
        total_findings,
        duration_ms,
    );

    if tool_error {
        process::exit(exit_codes::TOOL_ERROR);
    }
    if total_findings > 0 {
        process::exit(exit_codes::FINDINGS_FOUND);
    }
}
