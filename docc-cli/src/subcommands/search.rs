use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use regex::Regex;

/// Catalog entry: `- [Title](https://url) — abstract`, the abstract being optional.
const CATALOG_LINE: &str =
    r"^- \[(?P<title>[^\]]+)\]\((?P<url>https?://[^)]+)\)(?:\s+—\s+(?P<abstract>.*))?$";

const TITLE_WEIGHT: usize = 5;
const ABSTRACT_WEIGHT: usize = 1;

/// Search page titles and abstracts in a Markdown catalog
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Keywords to look for
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Markdown catalog listing one page per line
    #[arg(long, default_value = "references/hig_catalog.md")]
    pub catalog: PathBuf,

    /// Maximum number of results
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub url: String,
    pub r#abstract: String,
}

#[tracing::instrument(skip(args), fields(catalog = %args.catalog.display()))]
pub fn run(args: &Args) -> Result<()> {
    let terms: Vec<String> = args
        .terms
        .iter()
        .map(|term| normalize(term))
        .filter(|term| !term.is_empty())
        .collect();
    anyhow::ensure!(!terms.is_empty(), "no non-blank search terms given");

    let text = fs::read_to_string(&args.catalog)
        .with_context(|| format!("failed to read catalog {}", args.catalog.display()))?;
    let pages = parse_catalog(&text)?;
    tracing::debug!(pages = pages.len(), "parsed catalog");

    let mut stdout = io::stdout().lock();
    for (score, page) in rank(&pages, &terms, args.top) {
        writeln!(stdout, "{}", format_hit(score, page))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Parse every catalog line, skipping lines that are not page entries.
///
/// # Errors
///
/// Returns an error if the entry pattern fails to compile.
pub fn parse_catalog(text: &str) -> Result<Vec<Page>, regex::Error> {
    let pattern = Regex::new(CATALOG_LINE)?;
    Ok(text
        .lines()
        .filter_map(|line| pattern.captures(line.trim()))
        .map(|caps| {
            let group = |name| {
                caps.name(name)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            };
            Page {
                title: group("title"),
                url: group("url"),
                r#abstract: group("abstract"),
            }
        })
        .collect())
}

/// Lowercase and collapse whitespace runs to a single space.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Weighted count of non-overlapping term occurrences in title and abstract.
///
/// Terms are expected to be normalized and non-empty.
#[must_use]
pub fn score(page: &Page, terms: &[String]) -> usize {
    let title = normalize(&page.title);
    let summary = normalize(&page.r#abstract);
    terms
        .iter()
        .map(|term| {
            TITLE_WEIGHT * title.matches(term.as_str()).count()
                + ABSTRACT_WEIGHT * summary.matches(term.as_str()).count()
        })
        .sum()
}

/// Matching pages, best first; equal scores are ordered by title.
#[must_use]
pub fn rank<'a>(pages: &'a [Page], terms: &[String], top: usize) -> Vec<(usize, &'a Page)> {
    let mut ranked: Vec<(usize, &Page)> = pages
        .iter()
        .map(|page| (score(page, terms), page))
        .filter(|(score, _)| *score > 0)
        .collect();
    ranked.sort_by(|(a_score, a), (b_score, b)| {
        b_score.cmp(a_score).then_with(|| a.title.cmp(&b.title))
    });
    ranked.truncate(top);
    ranked
}

fn format_hit(score: usize, page: &Page) -> String {
    let summary = page.r#abstract.trim();
    if summary.is_empty() {
        format!("[{score:>3}] {}\n      {}\n", page.title, page.url)
    } else {
        format!(
            "[{score:>3}] {}\n      {}\n      {summary}\n",
            page.title, page.url
        )
    }
}
