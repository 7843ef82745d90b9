// ABOUTME: CLI for sorting a saved channel videos page by view count.
// ABOUTME: Reads HTML from a file or stdin and prints the reordered page, a sort report, or extracted counts.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use viewsort_core::dom_query::Document;
use viewsort_core::navigation::location_path;
use viewsort_core::options::{
    DEFAULT_ITEM_SELECTOR, DEFAULT_METADATA_SELECTOR, DEFAULT_TEXT_SELECTOR,
};
use viewsort_core::{inject_sort_button, is_channel_page, parse_metric, Sorter, TriggerOutcome};

/// Sort the videos of a saved channel page by view count.
#[derive(Parser, Debug)]
#[command(name = "viewsort")]
#[command(about = "Sort a saved channel videos page by view count", long_about = None)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides).
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the videos found on a page with their parsed view counts.
    Extract {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Reorder the videos on a page, most viewed first, and print the page.
    Sort {
        #[command(flatten)]
        page: PageArgs,

        /// Output file path (default: stdout).
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Print the sort report as JSON instead of the page.
        #[arg(long = "json")]
        json_output: bool,

        /// Also place the "Sort by Views" button in the page's filter chip bar.
        #[arg(long = "inject-button")]
        inject_button: bool,
    },
    /// Parse view-count labels such as "1.2K views" and print the numbers.
    Parse {
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// HTML file of the page. Use "-" to read from stdin.
    input: String,

    /// Location the page was saved from; refuse to run unless it is a channel page.
    #[arg(long)]
    location: Option<String>,

    /// Selector marking one video entry.
    #[arg(long, default_value = DEFAULT_ITEM_SELECTOR)]
    item_selector: String,

    /// Selector of the metadata line inside an entry.
    #[arg(long, default_value = DEFAULT_METADATA_SELECTOR)]
    metadata_selector: String,

    /// Selector of the text fields inside the metadata line.
    #[arg(long, default_value = DEFAULT_TEXT_SELECTOR)]
    text_selector: String,
}

impl PageArgs {
    fn sorter(&self) -> Sorter {
        Sorter::builder()
            .item_selector(&self.item_selector)
            .metadata_selector(&self.metadata_selector)
            .text_selector(&self.text_selector)
            .build()
    }

    fn load(&self) -> Result<Document> {
        if let Some(location) = &self.location {
            if !is_channel_page(&location_path(location)) {
                bail!("not a channel page: {}", location);
            }
        }
        let html = load_html(&self.input)?;
        Ok(Document::from(html.as_str()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Extract { page } => {
            let doc = page.load()?;
            let items = page.sorter().extract_items(&doc)?;
            let entries: Vec<Value> = items
                .iter()
                .enumerate()
                .map(|(position, item)| {
                    json!({
                        "position": position,
                        "views": item.metric,
                        "known": !item.is_unknown(),
                        "text": item.source_text,
                    })
                })
                .collect();
            print_json(&json!({ "items": entries, "total": entries.len() }), cli.compact)
        }
        Command::Sort {
            page,
            output,
            json_output,
            inject_button,
        } => {
            let doc = page.load()?;
            let sorter = page.sorter();
            let notifier = |message: &str| eprintln!("{}", message);

            let report = match sorter.trigger(&doc, &notifier) {
                TriggerOutcome::Sorted(report) => report,
                TriggerOutcome::Failed(err) => return Err(anyhow!(err)),
                TriggerOutcome::Busy => bail!("a sort is already running"),
            };

            if inject_button && !inject_sort_button(&doc) {
                warn!("no filter chip bar on the page; button not added");
            }

            let rendered = if json_output {
                to_json(&serde_json::to_value(&report)?, cli.compact)?
            } else {
                doc.html().to_string()
            };

            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("error writing to {:?}", path))?,
                None => println!("{}", rendered),
            }
            Ok(())
        }
        Command::Parse { labels } => {
            let parsed: Vec<Value> = labels
                .iter()
                .map(|label| json!({ "text": label, "views": parse_metric(label) }))
                .collect();
            print_json(&Value::Array(parsed), cli.compact)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("viewsort={level},viewsort_core={level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    debug!("logging initialized");
}

fn to_json(value: &Value, compact: bool) -> Result<String> {
    Ok(if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}

fn print_json(value: &Value, compact: bool) -> Result<()> {
    println!("{}", to_json(value, compact)?);
    Ok(())
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
