use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

/// Where target URLs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File(PathBuf),
    /// Comma separated list from the command line.
    List(String),
}

/// Piped stdin wins over `-file`, which wins over `-url`.
pub fn select_sources(url: Option<&str>, file: Option<&Path>, stdin_piped: bool) -> Vec<FeedSource> {
    let mut sources = Vec::new();
    if stdin_piped {
        sources.push(FeedSource::Stdin);
    }
    if let Some(path) = file {
        sources.push(FeedSource::File(path.to_path_buf()));
    } else if let Some(list) = url.filter(|u| !u.trim().is_empty()) {
        sources.push(FeedSource::List(list.to_string()));
    }
    sources
}

pub fn stdin_is_piped() -> bool {
    !std::io::stdin().is_terminal()
}

/// Read targets from the first source that yields any. An unreadable file is
/// fatal; no targets at all is an error as well.
pub fn read_targets(sources: &[FeedSource]) -> Result<Vec<String>> {
    if sources.is_empty() {
        bail!("no targets supplied: pipe URLs on stdin or use -url / -file");
    }

    for source in sources {
        let targets = match source {
            FeedSource::Stdin => read_lines(std::io::stdin().lock()).context("failed to read stdin")?,
            FeedSource::File(path) => read_file(path)?,
            FeedSource::List(list) => split_list(list),
        };
        if !targets.is_empty() {
            tracing::debug!(source=?source, count=targets.len(), "targets loaded");
            return Ok(targets);
        }
        tracing::debug!(source=?source, "source yielded no targets");
    }

    bail!("no targets supplied: input was empty")
}

pub fn read_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open target file {}", path.display()))?;
    read_lines(BufReader::new(file))
        .with_context(|| format!("failed to read target file {}", path.display()))
}

/// Non-empty trimmed lines.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}

pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
