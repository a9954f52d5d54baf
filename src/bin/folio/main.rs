use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::{info, warn};

use folio::config::{Config, MalformedPolicy};
use folio::logger::configure_logger;
use folio::paginator::Paginator;
use folio::post_list::{series_reading_order, tag_frequency};
use folio::source::{filesystem_sources, ComponentSource, DocumentSource};
use folio::text_utils::{convert_to_date, romanize};
use folio::{Aggregator, FilterMode, PostItem, PostParams};

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the posts visible at a url
    List(ListArgs),
    /// Reports modules that cannot be listed
    Check,
    /// Prints the tags of public posts, most used first
    Tags,
    /// Writes a sample configuration
    InitConfig {
        /// Where to write it. Defaults to the user config directory
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Url the listing is rendered for, e.g. /posts?series=rust&page=2
    #[arg(short, long, default_value = "/posts")]
    url: String,

    /// Keep only posts with this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Apply the tag filter on top of the draft and series filters
    #[arg(short, long)]
    additive: bool,

    #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,

    /// Show dates relative to today
    #[arg(short, long)]
    relative: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

type SiteAggregator = Aggregator<DocumentSource, ComponentSource>;

fn build_aggregator(config: &Config) -> Result<SiteAggregator> {
    let discovery = config.discovery.clone();
    let (documents, pages) = filesystem_sources(&config.paths.src_dir, &discovery.page_export)
        .with_context(|| format!("Error scanning {}", config.paths.src_dir.display()))?;
    Ok(Aggregator::new(documents, pages, discovery)?)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if let Command::InitConfig { path } = &args.command {
        let path = generate_cfg(path.as_deref(), CFG_FILE_NAME)?;
        println!("Sample config written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = open_config(args.config, CFG_FILE_NAME)
        .map_err(|e| anyhow!("{}\nPlease run folio --help", e))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    info!("Reading posts from {}", config.paths.src_dir.display());

    match args.command {
        Command::List(list_args) => list_cmd(&config, list_args).await,
        Command::Check => {
            config.discovery.malformed = MalformedPolicy::Skip;
            check_cmd(&config).await
        }
        Command::Tags => tags_cmd(&config).await,
        Command::InitConfig { .. } => Ok(ExitCode::SUCCESS),
    }
}

async fn list_cmd(config: &Config, args: ListArgs) -> Result<ExitCode> {
    let aggregator = build_aggregator(config)?;
    let params = PostParams::from_url(&args.url);

    let has_tag = |post: &PostItem| match &args.tag {
        Some(tag) => post.meta.tags.contains(tag),
        None => true,
    };
    let filter = args.tag.as_ref().map(|_| &has_tag as &folio::PostFilter);
    let posts = aggregator.get_filtered_posts(&params, filter, Some(args.additive)).await?;
    let posts = listing_order(posts, params.series());

    let paginator = Paginator::from(&posts, config.site.posts_per_page);
    let page = paginator.clamp_page(params.page());
    let page_posts: &[PostItem] = if paginator.page_count() == 0 {
        &[]
    } else {
        paginator.get_page(page).map_err(|e| anyhow!(e))?
    };

    match args.format {
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(page_posts)?),
        ListFormat::Text => {
            println!("{}", config.site.title_for(&config.site.title));
            let today = Local::now().naive_local();
            for post in page_posts {
                print_post(post, &config.site.absolute_url(&post.url), args.relative.then_some(&today));
            }
            println!("Page {} of {} ({} posts)", page, paginator.page_count().max(1), posts.len());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// A series listing is read in part order instead of newest first.
fn listing_order(posts: Vec<PostItem>, series: Option<&str>) -> Vec<PostItem> {
    let Some(series) = series else {
        return posts;
    };
    let ordered = series_reading_order(&posts, series);
    // A custom only filter can keep posts from other series
    if ordered.len() != posts.len() {
        return posts;
    }
    ordered.into_iter().cloned().collect()
}

fn print_post(post: &PostItem, link: &str, today: Option<&chrono::NaiveDateTime>) {
    let date = convert_to_date(&post.meta.date, today);
    let series = match (&post.meta.series, post.meta.part) {
        (Some(series), Some(part)) => format!(" [{} {}]", series, romanize(part)),
        (Some(series), None) => format!(" [{}]", series),
        _ => String::new(),
    };
    println!("{:>14}  {}  {}{}", date, link, post.meta.title, series);
}

async fn check_cmd(config: &Config) -> Result<ExitCode> {
    let aggregator = build_aggregator(config)?;
    let keep_all = |_: &PostItem| true;
    let collection = aggregator
        .collect(&PostParams::from_url(&config.discovery.route_base), FilterMode::Custom(&keep_all))
        .await?;

    for diagnostic in &collection.diagnostics {
        println!("{}", diagnostic);
    }
    println!("{} modules listed, {} skipped", collection.posts.len(), collection.diagnostics.len());

    if collection.diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn tags_cmd(config: &Config) -> Result<ExitCode> {
    let aggregator = build_aggregator(config)?;
    let posts = aggregator
        .get_filtered_posts(&PostParams::from_url(&config.discovery.route_base), None, None)
        .await?;

    for (tag, count) in tag_frequency(&posts) {
        println!("{:>4}  {}", count, tag);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folio::PostMeta;

    use super::*;

    fn post(url: &str, day: u32, series: Option<&str>, part: Option<u32>) -> PostItem {
        PostItem {
            url: url.to_string(),
            meta: PostMeta {
                title: url.to_string(),
                description: None,
                date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap().and_hms_opt(0, 0, 0).unwrap(),
                last_updated: None,
                tags: vec![],
                part,
                series: series.map(str::to_string),
                draft: false,
            },
        }
    }

    fn urls(posts: &[PostItem]) -> Vec<&str> {
        posts.iter().map(|p| p.url.as_str()).collect()
    }

    #[test]
    fn test_series_listing_in_part_order() {
        let newest_first = vec![
            post("/posts/three", 20, Some("rust"), Some(3)),
            post("/posts/one", 10, Some("rust"), Some(1)),
            post("/posts/two", 5, Some("rust"), Some(2)),
        ];

        let listed = listing_order(newest_first.clone(), Some("rust"));
        assert_eq!(urls(&listed), ["/posts/one", "/posts/two", "/posts/three"]);

        let listed = listing_order(newest_first, None);
        assert_eq!(urls(&listed), ["/posts/three", "/posts/one", "/posts/two"]);
    }

    #[test]
    fn test_mixed_listing_keeps_date_order() {
        let newest_first = vec![
            post("/posts/other", 20, None, None),
            post("/posts/two", 10, Some("rust"), Some(2)),
            post("/posts/one", 5, Some("rust"), Some(1)),
        ];

        let listed = listing_order(newest_first, Some("rust"));
        assert_eq!(urls(&listed), ["/posts/other", "/posts/two", "/posts/one"]);
    }
}
