//! Terminal demo for `review-core`.
//!
//! Prints colored prompt diffs and issue annotation overlays, and applies suggested fixes.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p review-cli -- diff old.txt new.txt
//! cargo run -p review-cli -- prompt analysis.json prompt.txt
//! cargo run -p review-cli -- annotate analysis.json output.txt
//! cargo run -p review-cli -- annotate analysis.json reasoning.txt --source reasoning
//! cargo run -p review-cli -- fix analysis.json output.txt fact-0
//! cargo run -p review-cli -- check input.json
//! ```
//!
//! # Options
//!
//! - `--config <file>`: JSON configuration (see `ReviewConfig`)
//! - `--json`: print machine-readable JSON instead of colored text
//! - `--source <output|reasoning>`: which document `annotate` overlays (default `output`)
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use crossterm::style::{Color, Stylize};
use review_core::{
    AdherenceBand, AnalysisInput, AnalysisResult, AnnotatedSegment, DiffKind, Issue,
    IssueCategory, IssueSource, ReliabilityBand, ReviewConfig, ReviewError, TextDiff, annotate,
    apply_issue_fix, diff_with_options, find_matches, issues_for_source,
};
use std::{env, fmt, fs, process::ExitCode};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: review-cli [--config <file>] [--json] <command> [args]

Commands:
  diff <old-file> <new-file>                   Token diff of two texts
  prompt <analysis.json> <prompt-file>         Diff a prompt against its optimized version
  annotate <analysis.json> <document-file>     Highlight issue quotes in a document
           [--source output|reasoning]
  fix <analysis.json> <document-file> <id>     Apply an issue's suggested replacement
  check <input.json>                           Validate review input";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Invalid(String),
    Review(ReviewError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}\n\n{USAGE}"),
            Self::Invalid(msg) => f.write_str(msg),
            Self::Review(err) => write!(f, "{err}"),
        }
    }
}

impl From<ReviewError> for CliError {
    fn from(err: ReviewError) -> Self {
        Self::Review(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Review(err.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Diff { old: String, new: String },
    Prompt { analysis: String, prompt: String },
    Annotate {
        analysis: String,
        document: String,
        source: IssueSource,
    },
    Fix {
        analysis: String,
        document: String,
        issue_id: String,
    },
    Check { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    config: Option<String>,
    json: bool,
    command: Command,
}

fn parse_source(value: &str) -> Result<IssueSource, CliError> {
    match value {
        "output" => Ok(IssueSource::Output),
        "reasoning" => Ok(IssueSource::Reasoning),
        other => Err(CliError::Usage(format!("unknown source '{other}'"))),
    }
}

fn parse_args(raw: &[String]) -> Result<Args, CliError> {
    let mut config = None;
    let mut json = false;
    let mut source = IssueSource::Output;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a file".to_string()))?;
                config = Some(value.clone());
            }
            "--source" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--source needs a value".to_string()))?;
                source = parse_source(value)?;
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option '{flag}'")));
            }
            value => positional.push(value),
        }
    }

    let command = match positional.as_slice() {
        ["diff", old, new] => Command::Diff {
            old: old.to_string(),
            new: new.to_string(),
        },
        ["prompt", analysis, prompt] => Command::Prompt {
            analysis: analysis.to_string(),
            prompt: prompt.to_string(),
        },
        ["annotate", analysis, document] => Command::Annotate {
            analysis: analysis.to_string(),
            document: document.to_string(),
            source,
        },
        ["fix", analysis, document, issue_id] => Command::Fix {
            analysis: analysis.to_string(),
            document: document.to_string(),
            issue_id: issue_id.to_string(),
        },
        ["check", input] => Command::Check {
            input: input.to_string(),
        },
        [] => return Err(CliError::Usage("missing command".to_string())),
        [name, ..] => {
            return Err(CliError::Usage(format!(
                "unknown command or wrong arguments: '{name}'"
            )));
        }
    };

    Ok(Args {
        config,
        json,
        command,
    })
}

fn read(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|err| CliError::Review(ReviewError::Io(err)))
}

fn load_analysis(path: &str) -> Result<AnalysisResult, CliError> {
    Ok(AnalysisResult::from_json(&read(path)?)?)
}

fn category_color(category: IssueCategory) -> Color {
    match category {
        IssueCategory::Fact => Color::Red,
        IssueCategory::Strategy => Color::DarkYellow,
        IssueCategory::Compliance => Color::Magenta,
    }
}

fn print_diff(result: &TextDiff<'_>, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let mut out = String::new();
    for part in result.coalesced().parts() {
        let text = part.text.as_ref();
        let styled = match part.kind {
            DiffKind::Equal => text.to_string(),
            DiffKind::Deleted => text.red().crossed_out().to_string(),
            DiffKind::Inserted => text.green().bold().to_string(),
        };
        out.push_str(&styled);
    }
    println!("{out}");

    let stats = result.stats();
    eprintln!(
        "{} equal, {} inserted, {} deleted tokens",
        stats.equal, stats.inserted, stats.deleted
    );
    Ok(())
}

fn print_scores(result: &AnalysisResult) {
    let reliability = ReliabilityBand::from_score(result.score);
    let adherence = AdherenceBand::from_score(result.strategy_report.adherence_score);
    println!(
        "Reliability {} ({reliability:?})  Adherence {} ({adherence:?})",
        result.score.to_string().bold(),
        result.strategy_report.adherence_score.to_string().bold(),
    );
    if !result.summary.is_empty() {
        println!("{}", result.summary.as_str().italic());
    }
    println!();
}

fn print_segments(segments: &[AnnotatedSegment<'_>]) {
    let mut out = String::new();
    for segment in segments {
        match &segment.matched {
            Some(m) => {
                let styled = segment
                    .text
                    .with(category_color(m.category))
                    .underlined()
                    .to_string();
                out.push_str(&styled);
                out.push_str(&format!("[{}]", m.issue_id).dark_grey().to_string());
            }
            None => out.push_str(segment.text),
        }
    }
    println!("{out}");
}

fn print_issue_list(issues: &[&Issue], located: &[String]) {
    println!();
    for issue in issues {
        let marker = if located.contains(&issue.id) {
            "●".with(category_color(issue.category)).to_string()
        } else {
            "○".dark_grey().to_string()
        };
        println!(
            "{marker} {} {} \"{}\"",
            issue.id.as_str().bold(),
            issue.sub_type.as_deref().unwrap_or(""),
            issue.quote
        );
        if !issue.reason.is_empty() {
            println!("    {}", issue.reason);
        }
        if let Some(fix) = &issue.reference_fix {
            println!("    {} {fix}", "fix:".green());
        }
    }
}

fn run_annotate(
    analysis: &str,
    document: &str,
    source: IssueSource,
    json: bool,
) -> Result<(), CliError> {
    let result = load_analysis(analysis)?;
    let document = read(document)?;
    let issues = result.unified_issues();
    let visible = issues_for_source(&issues, source);

    let segments = annotate(&document, visible.iter().copied());
    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    let located: Vec<String> = find_matches(&document, visible.iter().copied())
        .into_iter()
        .map(|m| m.issue_id)
        .collect();

    print_scores(&result);
    print_segments(&segments);
    print_issue_list(&visible, &located);
    Ok(())
}

fn run_fix(analysis: &str, document: &str, issue_id: &str, json: bool) -> Result<(), CliError> {
    let mut result = load_analysis(analysis)?;
    let document = read(document)?;
    let applied = apply_issue_fix(&mut result, &document, issue_id)?;

    if json {
        let value = serde_json::json!({
            "document": applied.document,
            "edit": applied.edit,
            "removedIssues": applied.removed_issues,
            "issues": result.unified_issues(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", applied.document);
    match &applied.edit {
        Some(edit) => eprintln!(
            "replaced {} chars at {} with {} chars, {} issue(s) resolved",
            edit.deleted_len(),
            edit.start,
            edit.inserted_len(),
            applied.removed_issues
        ),
        None => eprintln!(
            "quote not found, document unchanged, {} issue(s) resolved",
            applied.removed_issues
        ),
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ReviewConfig::from_json(&read(path)?)?,
        None => ReviewConfig::default(),
    };
    tracing::debug!(?config, command = ?args.command, "starting");

    match args.command {
        Command::Diff { old, new } => {
            let old = read(&old)?;
            let new = read(&new)?;
            print_diff(&diff_with_options(&old, &new, config.diff), args.json)
        }
        Command::Prompt { analysis, prompt } => {
            let result = load_analysis(&analysis)?;
            let prompt = read(&prompt)?;
            let optimized = result.optimized_prompt.as_deref().ok_or_else(|| {
                CliError::Invalid(format!("{analysis} has no optimized prompt yet"))
            })?;
            print_diff(&diff_with_options(&prompt, optimized, config.diff), args.json)?;
            if !args.json {
                for suggestion in result.prompt_suggestions.iter().flatten() {
                    println!("  {} {suggestion}", "•".cyan());
                }
            }
            Ok(())
        }
        Command::Annotate {
            analysis,
            document,
            source,
        } => run_annotate(&analysis, &document, source, args.json),
        Command::Fix {
            analysis,
            document,
            issue_id,
        } => run_fix(&analysis, &document, &issue_id, args.json),
        Command::Check { input } => {
            let input: AnalysisInput = serde_json::from_str(&read(&input)?)?;
            input.validate()?;
            println!("{}", "input is complete".green());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match parse_args(&raw).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
