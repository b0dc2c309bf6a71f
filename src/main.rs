// listwise - a shopping list you can talk to
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use listwise_lib::{
    core::{Assistant, Outcome, Searcher},
    db::{CatalogProduct, ListStore, StaticCatalog},
    intelligence::{categorize, parse, SearchFilters},
    Config, Database, ListError, Result,
};
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if let Err(e) = run(&args).await {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_filter);

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "say" => handle_say(&config, &args[2..]).await,
        "parse" => handle_parse(&args[2..]),
        "list" => handle_list(&config).await,
        "search" => handle_search(&config, &args[2..]).await,
        "suggest" => handle_say(&config, &["suggest".to_string()]).await,
        "categorize" => handle_categorize(&args[2..]),
        "clear" => handle_clear(&config).await,
        "status" => handle_status(&config).await,
        "version" | "-v" | "--version" => {
            println!("listwise v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

fn init_logging(filter: &str) {
    // a bad filter string shouldn't stop the list from working
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_say(config: &Config, args: &[String]) -> Result<()> {
    let text = args.join(" ");
    let assistant = open_assistant(config).await?;

    match assistant.handle(&text).await? {
        Outcome::Added { entry, substitutes } => {
            println!(
                "Added {} x {} ({})",
                entry.quantity, entry.item, entry.category
            );
            if !substitutes.is_empty() {
                println!("  You could also try: {}", substitutes.join(", "));
            }
        }
        Outcome::Removed { item } => println!("Removed {}", item),
        Outcome::NotFound { item } => println!("'{}' isn't on your list", item),
        Outcome::SearchResults {
            query, products, ..
        } => print_products(&query, &products),
        Outcome::Suggestions { items } => {
            if items.is_empty() {
                println!("No suggestions yet.");
            } else {
                println!("\nYou might want:");
                for (i, item) in items.iter().enumerate() {
                    println!("{:3}. {}", i + 1, item);
                }
            }
        }
        Outcome::Ambiguous { attempted } => {
            println!("Sounds like you want to {} something, but what?", attempted);
        }
        Outcome::Unrecognized { text } => {
            println!("Sorry, I didn't understand '{}'", text);
            println!("Try: add 2 apples, remove milk, find toothpaste under 100, suggest");
        }
    }

    Ok(())
}

fn handle_parse(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ListError::InvalidCommand("parse needs some text".to_string()));
    }

    let intent = parse(&args.join(" "));
    println!("{}", serde_json::to_string_pretty(&intent)?);

    Ok(())
}

async fn handle_list(config: &Config) -> Result<()> {
    let db = open_database(config).await?;
    let entries = db.list_all().await?;

    if entries.is_empty() {
        println!("Your list is empty.");
    } else {
        println!("\nShopping list:");
        println!("{}", "=".repeat(60));
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:3}. {:<30} x{:<4} {}",
                i + 1,
                entry.item,
                entry.quantity,
                entry.category
            );
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

async fn handle_search(config: &Config, args: &[String]) -> Result<()> {
    let mut query_parts = Vec::new();
    let mut min_price: Option<String> = None;
    let mut max_price: Option<String> = None;
    let mut brand: Option<String> = None;
    let mut limit = config.search_limit;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--min-price" => {
                i += 1;
                min_price = args.get(i).cloned();
            }
            "--max-price" => {
                i += 1;
                max_price = args.get(i).cloned();
            }
            "--brand" => {
                i += 1;
                brand = args.get(i).cloned();
            }
            "--limit" => {
                i += 1;
                limit = args
                    .get(i)
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| {
                        ListError::InvalidCommand("--limit needs a whole number".to_string())
                    })?;
            }
            arg => query_parts.push(arg.to_string()),
        }
        i += 1;
    }

    let query = query_parts.join(" ");
    let filters =
        SearchFilters::from_raw(min_price.as_deref(), max_price.as_deref(), brand.as_deref());

    let db = Arc::new(open_database(config).await?);
    let searcher = Searcher::new(db);

    // no explicit flags: let the phrase speak for itself ("soap under 50")
    let (query, products) = if filters == SearchFilters::default() {
        let (query, _, products) = searcher.search_phrase(&query, limit).await?;
        (query, products)
    } else {
        let products = searcher.search(&query, &filters, limit).await?;
        (query, products)
    };

    print_products(&query, &products);

    Ok(())
}

fn handle_categorize(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ListError::InvalidCommand(
            "categorize needs an item name".to_string(),
        ));
    }

    println!("{}", categorize(&args.join(" ")));

    Ok(())
}

async fn handle_clear(config: &Config) -> Result<()> {
    let db = open_database(config).await?;
    let removed = db.clear_list().await?;

    println!("Cleared {} item(s). History was kept.", removed);

    Ok(())
}

async fn handle_status(config: &Config) -> Result<()> {
    let db = open_database(config).await?;
    let stats = db.stats().await?;

    println!("\nlistwise Status");
    println!("{}", "=".repeat(60));
    println!("  Database:    {}", db.path().display());
    println!("  List items:  {}", stats.total_items);
    println!("  History:     {}", stats.total_history);
    println!("  Products:    {}", stats.total_products);
    println!(
        "  Connections: {} ({} idle)",
        stats.pool_size, stats.idle_connections
    );
    println!("{}", "=".repeat(60));

    Ok(())
}

fn print_products(query: &str, products: &[CatalogProduct]) {
    if products.is_empty() {
        println!("No products found matching '{}'", query);
        return;
    }

    println!("\nFound {} product(s) matching '{}':", products.len(), query);
    println!("{}", "=".repeat(60));
    for (i, product) in products.iter().enumerate() {
        let price = product
            .price
            .map(|p| format!("Rs {:.2}", p))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:3}. {:<32} {:<12} {}",
            i + 1,
            product.name,
            product.brand,
            price
        );
    }
    println!("{}", "=".repeat(60));
}

async fn open_database(config: &Config) -> Result<Database> {
    let db = Database::new(&config.db_path).await?;
    db.seed_catalog(StaticCatalog::default().products()).await?;
    Ok(db)
}

async fn open_assistant(config: &Config) -> Result<Assistant<Database, Database>> {
    let db = Arc::new(open_database(config).await?);

    Ok(Assistant::new(Arc::clone(&db), db)
        .with_search_limit(config.search_limit)
        .with_history_top_n(config.history_top_n))
}

fn print_usage() {
    println!(
        r#"listwise v{} - A shopping list you can talk to

USAGE:
    listwise <COMMAND> [OPTIONS]

COMMANDS:
    say <text>             Run a natural-language command
    parse <text>           Show how a command is interpreted (JSON)
    list                   Show the shopping list
    search <query>         Search the catalog
        --min-price <n>    Lowest acceptable price
        --max-price <n>    Highest acceptable price
        --brand <name>     Brand must contain this text
        --limit <n>        Maximum results
    suggest                Suggest what to buy
    categorize <item>      Show the category for an item
    clear                  Empty the list (history is kept)
    status                 Show database stats
    version                Show version
    help                   Show this help

EXAMPLES:
    listwise say add 2 apples
    listwise say remove milk from my list
    listwise say find toothpaste under 100
    listwise search milk --max-price 60
    listwise suggest

ENVIRONMENT:
    LISTWISE_DB, LISTWISE_SEARCH_LIMIT, LISTWISE_HISTORY_TOP_N, LISTWISE_LOG
"#,
        env!("CARGO_PKG_VERSION")
    );
}
