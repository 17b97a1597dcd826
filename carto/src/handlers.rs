use anyhow::Context as _;
use carto_core::render::{OutputFormat, Style, render_dot, render_json};
use carto_core::{CategoryRow, GraphOptions, build_graph, categorize, format_count, table};
use carto_fetch::SitemapClient;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default hand-off artifact between extract and categorize.
pub const URL_LIST_FILE: &str = "sitemap_urls.dat";
/// Default hand-off artifact between categorize and visualize.
pub const LAYER_TABLE_FILE: &str = "sitemap_layers.csv";

// Helper functions shared by the stage handlers

/// Expand a leading tilde and turn the argument into a path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Load the URL list artifact: one URL per line, blank lines ignored.
///
/// No validation happens here; the categorizer rejects malformed entries
/// with their position so nothing is silently skipped.
pub fn load_urls_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write the URL list artifact, one URL per line.
pub fn save_url_list(path: &Path, urls: &[String]) -> anyhow::Result<()> {
    let mut content = urls.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content)
        .with_context(|| format!("failed to write URL list {}", path.display()))
}

// Subcommand handlers

pub async fn handle_extract(sub_matches: &ArgMatches, quiet: bool) {
    tracing_subscriber::fmt::init();
    if let Err(e) = extract_stage(sub_matches, quiet).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub fn handle_categorize(sub_matches: &ArgMatches) {
    tracing_subscriber::fmt::init();
    if let Err(e) = categorize_stage(sub_matches) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub fn handle_visualize(sub_matches: &ArgMatches) {
    tracing_subscriber::fmt::init();
    if let Err(e) = visualize_stage(sub_matches) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub async fn handle_run(sub_matches: &ArgMatches, quiet: bool) {
    tracing_subscriber::fmt::init();
    if let Err(e) = run_stages(sub_matches, quiet).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

// Stage implementations

async fn extract_stage(sub_matches: &ArgMatches, quiet: bool) -> anyhow::Result<Vec<String>> {
    let url = sub_matches.get_one::<Url>("url").unwrap();
    let direct = sub_matches.get_flag("direct");
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap();
    let output = expand_path(sub_matches.get_one::<String>("output").unwrap());

    do_extract(url, direct, timeout, &output, quiet).await
}

fn categorize_stage(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let depth = *sub_matches.get_one::<usize>("depth").unwrap();
    let input = expand_path(sub_matches.get_one::<String>("input").unwrap());
    let output = expand_path(sub_matches.get_one::<String>("output").unwrap());

    let urls = load_urls_from_file(&input)?;
    println!(
        "Loaded {} URLs from {}",
        format_count(urls.len() as u64).cyan(),
        input.display()
    );

    do_categorize(&urls, depth, &output)?;
    Ok(())
}

fn visualize_stage(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let input = expand_path(sub_matches.get_one::<String>("input").unwrap());
    let output = expand_path(sub_matches.get_one::<String>("output").unwrap());
    let (options, style, format) = graph_settings(sub_matches);

    let text = fs::read_to_string(&input)
        .with_context(|| format!("failed to read layer table {}", input.display()))?;
    let rows = table::read_rows(&text)?;
    println!(
        "Loaded {} rows of categorized data from {}",
        format_count(rows.len() as u64).cyan(),
        input.display()
    );

    do_visualize(&rows, &options, style, format, &output)
}

async fn run_stages(sub_matches: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let url = sub_matches.get_one::<Url>("url").unwrap();
    let direct = sub_matches.get_flag("direct");
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap();
    let output = expand_path(sub_matches.get_one::<String>("output").unwrap());
    let (options, style, format) = graph_settings(sub_matches);

    let urls = do_extract(url, direct, timeout, &expand_path(URL_LIST_FILE), quiet).await?;
    let rows = do_categorize(&urls, options.depth_limit, &expand_path(LAYER_TABLE_FILE))?;
    do_visualize(&rows, &options, style, format, &output)
}

/// Read the shared visualize/run knobs out of the parsed arguments.
fn graph_settings(sub_matches: &ArgMatches) -> (GraphOptions, Style, OutputFormat) {
    let options = GraphOptions {
        depth_limit: *sub_matches.get_one::<usize>("depth").unwrap(),
        child_limit: sub_matches.get_one::<usize>("limit").copied(),
        title: sub_matches.get_one::<String>("title").unwrap().clone(),
        size_hint: sub_matches.get_one::<String>("size").unwrap().clone(),
    };
    let style =
        Style::from_str(sub_matches.get_one::<String>("style").unwrap()).unwrap_or(Style::Light);
    let format = OutputFormat::from_str(sub_matches.get_one::<String>("format").unwrap())
        .unwrap_or(OutputFormat::Dot);
    (options, style, format)
}

async fn do_extract(
    url: &Url,
    direct: bool,
    timeout: u64,
    output: &Path,
    quiet: bool,
) -> anyhow::Result<Vec<String>> {
    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {url}"));
        Some(pb)
    };

    let mut client = SitemapClient::with_timeout(timeout).with_direct(direct);
    if let Some(ref pb) = spinner {
        let pb = pb.clone();
        client = client.with_progress_callback(Arc::new(move |msg: String| pb.set_message(msg)));
    }

    let urls = client
        .fetch_url_list(url.as_str())
        .await
        .with_context(|| format!("failed to extract URLs from {url}"))?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    save_url_list(output, &urls)?;
    println!(
        "{} Found {} URLs in the sitemap, saved to {}",
        "✓".green().bold(),
        format_count(urls.len() as u64).cyan(),
        output.display().to_string().bright_white()
    );
    Ok(urls)
}

fn do_categorize(urls: &[String], depth: usize, output: &Path) -> anyhow::Result<Vec<CategoryRow>> {
    println!("Categorizing up to a depth of {depth}");

    let rows = categorize(urls, depth)?;
    fs::write(output, table::write_rows(&rows))
        .with_context(|| format!("failed to write layer table {}", output.display()))?;

    println!(
        "{} Printed {} rows of categorized data to {}",
        "✓".green().bold(),
        format_count(rows.len() as u64).cyan(),
        output.display().to_string().bright_white()
    );
    Ok(rows)
}

fn do_visualize(
    rows: &[CategoryRow],
    options: &GraphOptions,
    style: Style,
    format: OutputFormat,
    output: &Path,
) -> anyhow::Result<()> {
    println!("Building a {} layer deep sitemap graph", options.depth_limit);

    let site = build_graph(rows, options)?;
    let rendered = match format {
        OutputFormat::Dot => render_dot(&site, style),
        OutputFormat::Json => {
            render_json(&site).context("failed to serialize graph description")?
        }
    };
    fs::write(output, rendered)
        .with_context(|| format!("failed to write graph {}", output.display()))?;

    println!(
        "{} Exported graph to {}",
        "✓".green().bold(),
        output.display().to_string().bright_white()
    );
    Ok(())
}
