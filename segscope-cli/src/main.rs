use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use segscope_core::backend::{Action, FsBackend};
use segscope_core::error::Error;
use segscope_core::format;
use segscope_core::listing::{is_head_commit, is_past_commit, is_segment};
use segscope_core::localize::Messages;
use segscope_core::session::Session;

#[derive(Parser)]
#[command(
    name = "segscope",
    version,
    about = "Browse index segment metadata exported from a storage backend"
)]
struct Cli {
    /// Language tag for output messages
    #[arg(long, global = true, default_value = "en-GB")]
    lang: String,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List indexes and their files
    List {
        root: PathBuf,
        /// Only show files matching these globs
        #[arg(long)]
        include: Vec<String>,
        /// Hide files matching these globs
        #[arg(long)]
        exclude: Vec<String>,
        /// Show size, date and age per file
        #[arg(long, default_value_t = false)]
        long: bool,
    },
    /// Analyze a commit file and show segment-file associations
    Analyze { root: PathBuf, index: String, file: String },
    /// Ask the backend to revert the commit a file describes
    Revert { root: PathBuf, index: String, file: String },
    /// Ask the backend to damage a file (testing aid)
    Damage { root: PathBuf, index: String, file: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let loc = Messages::builtin(&cli.lang);
    match cli.cmd {
        Cmd::List { root, include, exclude, long } => {
            list(&loc, &root, &include, &exclude, long)
        }
        Cmd::Analyze { root, index, file } => analyze(&loc, &root, &index, &file),
        Cmd::Revert { root, index, file } => action(&loc, &root, Action::Revert, &index, &file),
        Cmd::Damage { root, index, file } => action(&loc, &root, Action::Damage, &index, &file),
    }
}

fn build_globset(includes: &[String], excludes: &[String]) -> Result<(GlobSet, GlobSet)> {
    let mut inc = GlobSetBuilder::new();
    let mut exc = GlobSetBuilder::new();
    if includes.is_empty() {
        inc.add(Glob::new("*")?);
    }
    for g in includes {
        inc.add(Glob::new(g)?);
    }
    for g in excludes {
        exc.add(Glob::new(g)?);
    }
    Ok((inc.build()?, exc.build()?))
}

fn marker(name: &str) -> &'static str {
    if is_head_commit(name) {
        "head "
    } else if is_past_commit(name) {
        "past "
    } else if is_segment(name) {
        "gen  "
    } else {
        "     "
    }
}

fn list(loc: &Messages, root: &Path, include: &[String], exclude: &[String], long: bool) -> Result<()> {
    let (inc, exc) = build_globset(include, exclude)?;
    let mut session = Session::new(FsBackend::new(root));
    session.reload();
    let empty = loc.format("catalog-empty", &[("root", root.display().to_string())]);
    let Some(catalog) = session.catalog() else {
        println!("{empty}");
        return Ok(());
    };
    if catalog.indexes.is_empty() {
        println!("{empty}");
        return Ok(());
    }
    println!(
        "{}",
        loc.format(
            "catalog-summary",
            &[
                ("count", catalog.indexes.len().to_string()),
                ("root", root.display().to_string()),
            ],
        )
    );
    let now_ms = Utc::now().timestamp_millis();
    for ix in &catalog.indexes {
        println!();
        println!(
            "{}",
            loc.format(
                "index-heading",
                &[
                    ("path", ix.path.clone()),
                    ("files", ix.files.files.len().to_string()),
                    ("generations", ix.files.generations().to_string()),
                ],
            )
        );
        for f in &ix.files.files {
            if !inc.is_match(&f.name) || exc.is_match(&f.name) {
                continue;
            }
            let mut row = format!("{}{}", marker(&f.name), f.name);
            if long {
                let size = f.size.map(format::size).unwrap_or_else(|| "-".into());
                let when = f.modified.map(format::date).unwrap_or_else(|| "-".into());
                let age =
                    f.modified.map(|ms| format::age(now_ms - ms)).unwrap_or_else(|| "-".into());
                row = format!("{row:<44} {size:>10}  {when}  {age}");
            }
            println!("  {row}");
        }
    }
    Ok(())
}

fn analyze(loc: &Messages, root: &Path, index: &str, file: &str) -> Result<()> {
    let mut session = Session::new(FsBackend::new(root));
    session.reload();
    if session.catalog().is_none() {
        bail!("{}", session.last_error().unwrap_or("catalog unavailable"));
    }
    let report = session
        .analyze(index, file)
        .with_context(|| format!("analyze {file} in {index}"))?;
    println!(
        "{}",
        loc.format(
            "analyze-heading",
            &[("file", file.to_string()), ("path", index.to_string())],
        )
    );
    let mut entries: Vec<_> = report.segments.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (_, info) in entries {
        if let Some(detail) = &info.corruption {
            println!(
                "{}",
                loc.format(
                    "analyze-corrupt",
                    &[("segment", info.segment_name.clone()), ("detail", detail.clone())],
                )
            );
            continue;
        }
        for commit in &info.commits {
            let name = commit.name.as_deref().unwrap_or(&info.segment_name);
            let docs = commit.doccount.unwrap_or(0);
            let dels = commit.delcount.unwrap_or(0);
            let size = commit.size_in_bytes.map(format::size).unwrap_or_else(|| "-".into());
            println!("  commit {name}: {docs} docs, {dels} deleted, {size}");
        }
    }
    let ix = session.index(index).context("index missing after analysis")?;
    let mut associated = 0usize;
    for f in &ix.files.files {
        if f.segments.is_empty() {
            continue;
        }
        associated += 1;
        let refs: Vec<&str> = f.segments.iter().map(|s| s.name.as_str()).collect();
        println!("  {} <- {}", f.name, refs.join(", "));
    }
    println!("{}", loc.format("analyze-applied", &[("count", associated.to_string())]));
    Ok(())
}

fn action(loc: &Messages, root: &Path, action: Action, index: &str, file: &str) -> Result<()> {
    let mut session = Session::new(FsBackend::new(root));
    match session.submit(action, index, file) {
        Ok(receipt) => {
            println!(
                "{}",
                loc.format(
                    "action-accepted",
                    &[("action", action.to_string()), ("file", file.to_string())],
                )
            );
            if !receipt.body.is_null() {
                println!("{}", serde_json::to_string_pretty(&receipt.body)?);
            }
            Ok(())
        }
        Err(Error::Unsupported { .. }) => {
            println!("{}", loc.format("action-unsupported", &[("action", action.to_string())]));
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("{action} {file} in {index}")),
    }
}
