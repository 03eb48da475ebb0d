mod config;
mod domain;
mod notify;
mod repo;
mod usecase;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::{Config, RepoRef, resolve_config_path};
use domain::pull_request::PullRequest;
use repo::github::{GithubSource, auth};
use repo::memory::InMemorySource;
use usecase::review_requests::collect_review_requests;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "List open pull requests waiting on your review",
    long_about = None
)]
struct Args {
    /// Path to config file (default: ~/.ghreviews/config.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Report each PR once even if you are requested more than once
    #[arg(long, default_value_t = false)]
    dedup: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long)]
    api_base: Option<String>,

    /// Run against built-in sample data instead of GitHub
    #[arg(long, default_value_t = false)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Show the resolved config (token is never printed)
    Config,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("encountered error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Init { force }) => init(args.config, force),
        Some(Command::Config) => show_config(args.config),
        None if args.demo => check_demo(args.dedup),
        None => check(args.config, args.dedup, args.api_base),
    }
}

fn check(config: Option<PathBuf>, dedup: bool, api_base: Option<String>) -> Result<()> {
    let path = resolve_config_path(config)?;
    let cfg = Config::load(&path)?;
    log::debug!("loaded {} repositories from {}", cfg.repos.len(), path.display());

    let token = auth::resolve_token(&cfg.token)?;
    let source = GithubSource::new(&token, api_base)?;
    let requests = collect_review_requests(&source, &cfg.username, &cfg.repos, dedup)?;
    log::debug!("{} repositories with pending review requests", requests.len());
    notify::notify(&requests);
    Ok(())
}

fn check_demo(dedup: bool) -> Result<()> {
    let (source, repos) = demo_source();
    let requests = collect_review_requests(&source, "octocat", &repos, dedup)?;
    notify::notify(&requests);
    Ok(())
}

fn init(config: Option<PathBuf>, force: bool) -> Result<()> {
    let path = resolve_config_path(config)?;
    Config::write_template(&path, force)?;
    println!("wrote config template to {}", path.display());
    println!("edit `username` and `repos`, then run ghreviews");
    Ok(())
}

fn show_config(config: Option<PathBuf>) -> Result<()> {
    let path = resolve_config_path(config)?;
    let cfg = Config::load(&path)?;
    println!("config:   {}", path.display());
    println!("username: {}", cfg.username);
    let token = if cfg.token.trim().is_empty() {
        "(from GITHUB_TOKEN / gh)"
    } else {
        "(set)"
    };
    println!("token:    {token}");
    println!("repos:");
    for repo in &cfg.repos {
        println!("\t- {}/{}", repo.owner, repo.name);
    }
    Ok(())
}

fn demo_source() -> (InMemorySource, Vec<RepoRef>) {
    let pr = |uri: &str, reviewers: &[&str]| {
        PullRequest::new(uri, reviewers.iter().map(|r| r.to_string()).collect())
    };
    let source = InMemorySource::default()
        .with_repo(
            "octocat",
            "hello-world",
            vec![
                pr("https://github.com/octocat/hello-world/pull/42", &["octocat", "hubot"]),
                pr("https://github.com/octocat/hello-world/pull/41", &["hubot"]),
            ],
        )
        .with_repo(
            "octocat",
            "spoon-knife",
            vec![pr("https://github.com/octocat/spoon-knife/pull/7", &["octocat"])],
        );
    let repos = ["hello-world", "spoon-knife"]
        .into_iter()
        .map(|name| RepoRef {
            name: name.to_string(),
            owner: "octocat".to_string(),
        })
        .collect();
    (source, repos)
}
