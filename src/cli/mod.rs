mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::services::{
    Config, LoadOutcome, NameResolver, PackageCatalog, Presenter, SystemAppClassifier,
    UsageLoader,
};
use crate::sources::JsonlUsageSource;

pub use report::{render_classification, render_page, render_page_json, NO_DATA_MESSAGE};

/// Per-app screen time from OS usage exports
#[derive(Parser)]
#[command(name = "apptrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.apptrack/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory of JSONL usage exports
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Package metadata snapshot (labels and system flags)
    #[arg(long, global = true, value_name = "PATH")]
    packages: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ranked list of most used apps (default)
    Apps(AppsArgs),

    /// Show total screen time and app counts
    Summary {
        #[command(flatten)]
        filter: SystemFilter,
    },

    /// Show display name and system-app classification for ids
    Classify {
        /// Application ids (e.g. com.whatsapp)
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct AppsArgs {
    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Apps per page
    #[arg(long)]
    page_size: Option<usize>,

    #[command(flatten)]
    filter: SystemFilter,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Default, Clone, Copy)]
struct SystemFilter {
    /// Hide system, launcher, and shell apps
    #[arg(long, conflicts_with = "include_system")]
    exclude_system: bool,

    /// Show system apps even if the config hides them
    #[arg(long)]
    include_system: bool,
}

impl SystemFilter {
    fn resolve(self, config: &Config) -> bool {
        if self.exclude_system {
            true
        } else if self.include_system {
            false
        } else {
            config.exclude_system_apps
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(path) = self.packages {
            config.packages_file = path;
        }

        let catalog = PackageCatalog::load_or_empty(&config.packages_file);

        match self.command {
            None => run_apps(&config, &catalog, AppsArgs::default()),
            Some(Commands::Apps(args)) => run_apps(&config, &catalog, args),
            Some(Commands::Summary { filter }) => run_summary(&config, &catalog, filter),
            Some(Commands::Classify { ids }) => {
                let resolver = NameResolver::new(&catalog);
                let classifier = SystemAppClassifier::new(&catalog);
                for id in &ids {
                    println!("{}", render_classification(&resolver, &classifier, id));
                }
                Ok(())
            }
        }
    }
}

impl Default for AppsArgs {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
            filter: SystemFilter::default(),
            json: false,
        }
    }
}

fn load(
    config: &Config,
    catalog: &PackageCatalog,
    exclude: bool,
) -> crate::types::Result<LoadOutcome> {
    let source = JsonlUsageSource::new(config.data_dir.clone());
    let classifier = SystemAppClassifier::new(catalog);
    UsageLoader::new(&source)
        .with_window_days(config.window_days)
        .refresh(exclude, &classifier)
}

fn run_apps(config: &Config, catalog: &PackageCatalog, args: AppsArgs) -> anyhow::Result<()> {
    let exclude = args.filter.resolve(config);
    let report = match load(config, catalog, exclude)? {
        LoadOutcome::Loaded(report) => report,
        LoadOutcome::NoData => {
            println!("{}", NO_DATA_MESSAGE);
            return Ok(());
        }
    };

    let resolver = NameResolver::new(catalog);
    let classifier = SystemAppClassifier::new(catalog);
    let presenter = Presenter::new(&resolver, &classifier);
    let page_size = args.page_size.unwrap_or(config.page_size);
    let page = presenter.page(&report.ranked, page_size, args.page.saturating_sub(1));

    if args.json {
        println!("{}", render_page_json(&page)?);
    } else {
        print!("{}", report.summary());
        println!();
        print!("{}", render_page(&page));
    }
    Ok(())
}

fn run_summary(
    config: &Config,
    catalog: &PackageCatalog,
    filter: SystemFilter,
) -> anyhow::Result<()> {
    match load(config, catalog, filter.resolve(config))? {
        LoadOutcome::Loaded(report) => print!("{}", report.summary()),
        LoadOutcome::NoData => println!("{}", NO_DATA_MESSAGE),
    }
    Ok(())
}
