use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsift::index::loader::{discover_index_files, resolve_index_path};
use docsift::index::{load_index_file, Category, IndexStore};
use docsift::output;
use docsift::query::SearchOptions;
use docsift::utils::AppConfig;
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Search generated documentation indexes from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Index file, or documentation build directory containing search_index.js
    #[arg(short, long, global = true, default_value = ".")]
    index: PathBuf,

    /// When to use colors
    #[arg(long, global = true, value_enum)]
    color: Option<ColorArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find entries whose title or text contains the query (case-insensitive)
    Search {
        /// Text to look for
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every entry of one page
    Page {
        /// Exact page name
        name: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List page names
    Pages,
    /// Show index statistics
    Stats,
    /// List search indexes found under a directory
    Discover {
        /// Directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

#[derive(clap::Args, Default)]
struct FilterArgs {
    /// Only show entries of this category
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Only show entries whose page matches this glob
    #[arg(long)]
    page: Option<String>,

    /// Maximum number of results (0 = unlimited)
    #[arg(short = 'm', long)]
    limit: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Section,
    Page,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Section => Category::Section,
            CategoryArg::Page => Category::Page,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let color = color_choice(cli.color, &config);

    match cli.command {
        Some(Commands::Search { query, filters, json }) => {
            let store = open_store(&cli.index, &config)?;
            run_search(&store, &query.join(" "), &filters, json, color, &config)?;
        }
        Some(Commands::Page { name, json }) => {
            let store = open_store(&cli.index, &config)?;
            let entries = store.by_page(&name);
            if json {
                output::print_json(&entries)?;
            } else {
                output::print_entries(&entries, None, color)?;
            }
        }
        Some(Commands::Pages) => {
            let store = open_store(&cli.index, &config)?;
            output::print_pages(&store.pages(), color)?;
        }
        Some(Commands::Stats) => {
            let path = resolve_index_path(&cli.index)?;
            let store = load_index_file(&path)?;
            docsift::index::stats::show_stats(&store, &path)?;
        }
        Some(Commands::Discover { root }) => {
            let found = discover_index_files(&root);
            if found.is_empty() {
                println!("No search indexes found under {}", root.display());
            }
            for path in found {
                println!("{}", path.display());
            }
        }
        None => {
            if cli.query.is_empty() {
                // Nothing to search for: show what the index contains instead
                let store = open_store(&cli.index, &config)?;
                output::print_pages(&store.pages(), color)?;
            } else {
                let store = open_store(&cli.index, &config)?;
                let filters = FilterArgs::default();
                run_search(&store, &cli.query.join(" "), &filters, false, color, &config)?;
            }
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn color_choice(flag: Option<ColorArg>, config: &AppConfig) -> ColorChoice {
    match flag {
        Some(ColorArg::Always) => ColorChoice::Always,
        Some(ColorArg::Never) => ColorChoice::Never,
        Some(ColorArg::Auto) => ColorChoice::Auto,
        None if config.color => ColorChoice::Auto,
        None => ColorChoice::Never,
    }
}

fn open_store(path: &Path, config: &AppConfig) -> Result<IndexStore> {
    let index_path = resolve_index_path(path)
        .with_context(|| format!("No search index at {}", path.display()))?;
    let store = load_index_file(&index_path)
        .with_context(|| format!("Failed to load {}", index_path.display()))?;
    Ok(store.with_parallel_threshold(config.parallel_threshold))
}

fn run_search(
    store: &IndexStore,
    query: &str,
    filters: &FilterArgs,
    json: bool,
    color: ColorChoice,
    config: &AppConfig,
) -> Result<()> {
    let mut options = SearchOptions::new().with_limit(config.effective_limit(filters.limit));
    if let Some(category) = filters.category {
        options = options.with_category(category.into());
    }
    if let Some(pattern) = &filters.page {
        options = options
            .with_page_glob(pattern)
            .with_context(|| format!("Invalid page glob: {}", pattern))?;
    }

    let results = store.search_with(query, &options);
    if json {
        output::print_json(&results)?;
    } else {
        output::print_entries(&results, Some(query), color)?;
    }
    Ok(())
}
