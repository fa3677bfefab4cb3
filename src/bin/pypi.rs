use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use pypi_rs::api::DEFAULT_INDEX_URL;
use pypi_rs::browse::{self, BrowseTarget};
use pypi_rs::report::{self, ReportOptions};
use pypi_rs::{Client, PackageRef, stats, term};

#[derive(Parser, Debug)]
#[command(
    name = "pypi",
    version,
    disable_version_flag = true,
    about = "Download statistics and quick links for Python packages",
    after_help = "Examples:\n  pypi stat Django\n  pypi browse Flask"
)]
struct Cli {
    /// Show the current pypi version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    _version: Option<bool>,
    /// Base URL of the package index JSON API.
    #[arg(long, global = true, env = "PYPI_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    index_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print download statistics for one or more packages.
    Stat(StatArgs),
    /// Open a package's index page (or its homepage) in the browser.
    Browse(BrowseArgs),
}

#[derive(Args, Debug)]
struct StatArgs {
    /// Package names or index URLs ([https://host/pypi/]name[/version]).
    #[arg(required = true)]
    packages: Vec<String>,
    /// Output a graph of download counts (default).
    #[arg(short = 'g', long = "graph", overrides_with = "no_graph")]
    graph: bool,
    /// Skip the graph.
    #[arg(short = 'q', long = "no-graph", overrides_with = "graph")]
    no_graph: bool,
    /// Chart width in columns (defaults to the terminal width).
    #[arg(long)]
    width: Option<usize>,
}

#[derive(Args, Debug)]
struct BrowseArgs {
    /// Package name or index URL.
    package: String,
    /// Open the project's homepage instead of its index page.
    #[arg(long, default_value_t = false)]
    homepage: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(cli.index_url);
    match cli.cmd {
        Command::Stat(args) => cmd_stat(&client, args),
        Command::Browse(args) => cmd_browse(&client, args),
    }
}

fn cmd_stat(client: &Client, args: StatArgs) -> Result<()> {
    let opts = ReportOptions {
        graph: args.graph || !args.no_graph,
        width: args.width.unwrap_or_else(term::terminal_width),
        colored: term::color_enabled(),
    };

    for raw in &args.packages {
        let pkg: PackageRef = match raw.parse() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                log::warn!("skipping {raw:?}");
                continue;
            }
        };
        if let Some(v) = &pkg.version {
            log::debug!("{}: version {v} ignored, statistics cover all releases", pkg.name);
        }
        let index = pkg.index_or(&client.base_url);
        let payload = client
            .fetch_from(index, &pkg.name)
            .with_context(|| format!("fetching {}", pkg.name))?;
        let url = payload
            .info
            .package_url
            .clone()
            .unwrap_or_else(|| Client::json_url(index, &pkg.name));
        println!("Fetching statistics for '{url}'. . .");

        let metrics = stats::aggregate(&payload.releases, payload.info.downloads)?;
        println!("{}", report::render_report(&pkg.name, &metrics, &opts));
    }
    Ok(())
}

fn cmd_browse(client: &Client, args: BrowseArgs) -> Result<()> {
    let pkg: PackageRef = args.package.parse()?;
    let payload = client
        .fetch_from(pkg.index_or(&client.base_url), &pkg.name)
        .with_context(|| format!("fetching {}", pkg.name))?;
    let target = if args.homepage {
        BrowseTarget::Homepage
    } else {
        BrowseTarget::IndexPage
    };
    let url = browse::target_url(&pkg.name, &payload.info, target)?;
    match target {
        BrowseTarget::IndexPage => println!("Opening index page for \"{}\"", pkg.name),
        BrowseTarget::Homepage => println!("Opening homepage for \"{}\"", pkg.name),
    }
    browse::launch(&url)?;
    Ok(())
}
