use std::error::Error;
use std::process;

use llm_service::{CompletionClient, CompletionConfig};
use pr_reviewer::config::ReviewConfig;
use pr_reviewer::github::GitHubClient;
use pr_reviewer::publish::{CommentPublisher, PublishConfig};
use pr_reviewer::types::PullRequestRef;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: pr-review-bot <PR_NUMBER> [--list-files] [--dry-run]";

struct CliArgs {
    pr_number: u64,
    list_files: bool,
    dry_run: bool,
}

/// Trivial positional parsing: one PR number plus optional flags.
fn parse_args<I: Iterator<Item = String>>(args: I) -> Option<CliArgs> {
    let mut pr_number: Option<u64> = None;
    let mut list_files = false;
    let mut dry_run = false;

    for arg in args {
        match arg.as_str() {
            "--list-files" => list_files = true,
            "--dry-run" => dry_run = true,
            other => {
                if pr_number.is_some() {
                    return None;
                }
                pr_number = other.parse::<u64>().ok().filter(|n| *n > 0);
                pr_number?;
            }
        }
    }

    Some(CliArgs {
        pr_number: pr_number?,
        list_files,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Optional .env in the working directory; CI environments set vars directly.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    let cfg = ReviewConfig::from_env()?;
    let pr = PullRequestRef {
        repo: cfg.repository.clone(),
        number: args.pr_number,
    };

    let github = GitHubClient::new(cfg.base_api.clone(), cfg.token.clone())?;

    if args.list_files {
        let files = github.get_changed_files(&pr).await?;
        println!("PR #{} has {} changed file(s):", pr.number, files.len());
        for f in &files {
            println!(" - {}", f.path);
        }
        return Ok(());
    }

    let llm = CompletionClient::new(CompletionConfig::from_env()?)?;
    let publisher = CommentPublisher::new(
        cfg.base_api.clone(),
        &cfg.token,
        PublishConfig {
            dry_run: cfg.dry_run || args.dry_run,
            skip_duplicates: cfg.skip_duplicates,
        },
    )?;

    let summary = pr_reviewer::run_review(&github, &publisher, &llm, &cfg, &pr).await?;
    println!("Review of PR #{} finished: {}", args.pr_number, summary);

    Ok(())
}
