use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{ArgGroup, Args as ClapArgs};
use docc_converters_markdown::{DEFAULT_BASE_URL, Options, Processor};
use docc_model::Document;

/// Endpoint serving the `DocC` render JSON of every page.
pub const DEFAULT_DATA_BASE_URL: &str = "https://developer.apple.com/tutorials/data";

const USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Render a `DocC` JSON page to Markdown
#[derive(ClapArgs, Debug)]
#[command(group(ArgGroup::new("page").required(true).args(["path", "url"])))]
pub struct Args {
    /// Page path, e.g. `/design/human-interface-guidelines/buttons`
    #[arg(long)]
    pub path: Option<String>,

    /// Page URL, e.g. `https://developer.apple.com/design/human-interface-guidelines/buttons`
    #[arg(long)]
    pub url: Option<String>,

    /// `DocC` JSON file to read instead of fetching the page (`-` for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write Markdown to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Origin used for the canonical URL and site-relative links
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Endpoint the page JSON is fetched from
    #[arg(long, default_value = DEFAULT_DATA_BASE_URL)]
    pub data_base_url: String,
}

#[tracing::instrument(skip(args), fields(input = ?args.input, out = ?args.out))]
pub fn run(args: &Args) -> Result<()> {
    let page = args
        .path
        .as_deref()
        .or(args.url.as_deref())
        .unwrap_or_default();
    let canonical = canonical_url(&args.base_url, page);
    tracing::debug!(canonical = %canonical, "rendering page");

    let document = match &args.input {
        Some(path) if path.as_os_str() == "-" => Document::from_reader(io::stdin().lock())
            .context("failed to read DocC JSON from stdin")?,
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Document::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to read DocC JSON from {}", path.display()))?
        }
        None => fetch_document(&data_url(&args.data_base_url, page))?,
    };

    let processor = Processor::new(Options::builder().base_url(args.base_url.as_str()).build());
    match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            processor
                .write_to(&document, &canonical, BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => processor
            .write_to(&document, &canonical, io::stdout().lock())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

/// Download and decode the render JSON at `url`.
fn fetch_document(url: &str) -> Result<Document> {
    tracing::debug!(url, "fetching page JSON");
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let response = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .with_context(|| format!("failed to fetch {url}"))?;
    Document::from_reader(response)
        .with_context(|| format!("failed to read DocC JSON from {url}"))
}

/// Reduce a page URL or path to its path component.
///
/// Query and fragment are dropped and the result always starts with `/`.
#[must_use]
pub fn normalize_path(page: &str) -> String {
    let path = ["http://", "https://"]
        .iter()
        .find_map(|scheme| page.strip_prefix(scheme))
        .map_or(page, |rest| {
            rest.find(['/', '?', '#']).map_or("", |start| {
                rest.get(start..).unwrap_or_default()
            })
        });

    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// The absolute URL of a page under `base_url`.
#[must_use]
pub fn canonical_url(base_url: &str, page: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), normalize_path(page))
}

/// The render JSON location of a page under `data_base_url`.
#[must_use]
pub fn data_url(data_base_url: &str, page: &str) -> String {
    format!(
        "{}{}.json",
        data_base_url.trim_end_matches('/'),
        normalize_path(page)
    )
}
