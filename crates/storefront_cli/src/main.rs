//! Storefront category CLI.
//!
//! # Responsibility
//! - Fetch categories from a storefront backend and print the forest.
//! - Replay menu clicks against the live forest for quick manual checks.
//! - List the products a category navigation lands on.

use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_core::config::{Loader, StorefrontConfig};
use storefront_core::{
    init_logging, init_stderr_logging, render_body, ApiClient, CategoryId, CategoryMenu,
    CategoryService, Credential, HttpCategoryRepository, HttpProductRepository, MenuAction,
    ProductService, RenderStyle,
};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Browse storefront categories")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    /// Backend root URL, e.g. http://localhost:8000.
    #[arg(long)]
    base_url: Option<String>,
    /// Bearer token forwarded to the backend.
    #[arg(long, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Absolute directory for rotating log files; logs go to stderr otherwise.
    #[arg(long)]
    log_dir: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    /// Use ASCII row markers.
    #[arg(long)]
    ascii: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the whole category forest.
    Tree {
        /// First depth rendered inert (roots are depth 0).
        #[arg(long)]
        depth: Option<usize>,
        /// Print the forest as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Open the menu, click the given nodes in order and print the result.
    Menu {
        /// Node ids to click, in order.
        #[arg(long = "click", value_name = "ID")]
        clicks: Vec<CategoryId>,
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Show one category record.
    Category { id: CategoryId },
    /// List available products, optionally scoped to one category.
    Products {
        #[arg(long)]
        category: Option<CategoryId>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(&cli)?;
    start_logging(&cli, &config)?;

    let client = ApiClient::with_timeout(&config.api.base_url, config.api.timeout())
        .map_err(|err| err.to_string())?;
    let credential = cli.token.clone().and_then(Credential::bearer);
    let style = if cli.ascii {
        RenderStyle::ascii()
    } else {
        RenderStyle::unicode()
    };

    match cli.command {
        Command::Tree { depth, json } => {
            let service = CategoryService::new(HttpCategoryRepository::new(&client, credential));
            let mut options = config.menu.options();
            if let Some(depth) = depth {
                options.max_depth = depth;
            }
            let mut menu = CategoryMenu::new(options);
            refresh(&service, &mut menu)?;
            if json {
                let forest = menu.forest().cloned().unwrap_or_default();
                let text = serde_json::to_string_pretty(&forest).map_err(|err| err.to_string())?;
                println!("{text}");
            } else {
                menu.expand_all();
                print!("{}", render_body(&menu.body(), &style));
            }
        }
        Command::Menu { clicks, depth } => {
            let service = CategoryService::new(HttpCategoryRepository::new(&client, credential));
            let mut options = config.menu.options();
            if let Some(depth) = depth {
                options.max_depth = depth;
            }
            let mut menu = CategoryMenu::new(options);
            refresh(&service, &mut menu)?;
            menu.open();
            for id in clicks {
                match menu.select(id) {
                    MenuAction::Toggled { id, expanded } => {
                        println!("toggle {id} -> {}", if expanded { "expanded" } else { "collapsed" })
                    }
                    MenuAction::Navigate { route, .. } => {
                        println!("navigate {route}");
                        break;
                    }
                    MenuAction::Ignored => println!("ignored {id}"),
                }
            }
            if menu.is_open() {
                print!("{}", render_body(&menu.body(), &style));
            }
        }
        Command::Category { id } => {
            let service = CategoryService::new(HttpCategoryRepository::new(&client, credential));
            match service.get_category(id) {
                Ok(Some(record)) => {
                    let parent = record
                        .parent
                        .map(|parent| parent.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("{}\t{}\tparent={}", record.id, record.name, parent);
                }
                Ok(None) => return Err(format!("category {id} not found")),
                Err(err) => {
                    error!("event=cli_category module=cli status=error error={err}");
                    return Err(err.user_message().to_string());
                }
            }
        }
        Command::Products { category } => {
            let service = ProductService::new(HttpProductRepository::new(&client, credential));
            let products = service
                .list_for_category(category)
                .map_err(|err| format!("failed to load products: {err}"))?;
            if products.is_empty() {
                println!("No products found in this category");
            }
            for product in products {
                println!(
                    "{}\t{}\t{}\tstock={}",
                    product.id, product.name, product.price, product.stock
                );
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<StorefrontConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();
    if let Some(base_url) = &cli.base_url {
        loader = loader
            .set_override("api.base_url", base_url.as_str())
            .map_err(|err| err.to_string())?;
    }
    if let Some(level) = &cli.log_level {
        loader = loader
            .set_override("logging.level", level.as_str())
            .map_err(|err| err.to_string())?;
    }
    loader
        .build()
        .map_err(|err| format!("invalid configuration: {err}"))
}

fn start_logging(cli: &Cli, config: &StorefrontConfig) -> Result<(), String> {
    match cli.log_dir.as_deref().or(config.logging.dir.as_deref()) {
        Some(dir) => init_logging(&config.logging.level, dir),
        // Keep stdout clean for piping; only problems reach stderr.
        None if cli.log_level.is_none() => init_stderr_logging("warn"),
        None => init_stderr_logging(&config.logging.level),
    }
}

fn refresh(
    service: &CategoryService<HttpCategoryRepository<'_>>,
    menu: &mut CategoryMenu,
) -> Result<(), String> {
    service
        .refresh_menu(menu)
        .map_err(|err| err.user_message().to_string())
}
