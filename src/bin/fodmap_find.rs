//! Command-line front end for the FODMAP food and recipe catalog.
//!
//! ```bash
//! # Ranked food search
//! fodmap-find foods wheat
//!
//! # Autocomplete suggestions
//! fodmap-find suggest gar
//!
//! # Browse or search recipes
//! fodmap-find recipes
//! fodmap-find recipes spinach
//! ```

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use fodmap_find::{
    category_glyph, results_heading, safe_amount_text, traffic_light_glyph, CatalogCache, Config,
    MatchScope,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fodmap-find",
    about = "Search low-FODMAP foods and browse recipes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML config file
    #[arg(long, short = 'c', global = true)]
    config: Option<Utf8PathBuf>,

    /// Food table override (CSV or JSON)
    #[arg(long, global = true)]
    foods: Option<Utf8PathBuf>,

    /// Recipe document override (JSON or YAML)
    #[arg(long, global = true)]
    recipes: Option<Utf8PathBuf>,

    /// Fields to match food queries against: `name` or `all`
    #[arg(long, global = true)]
    scope: Option<MatchScope>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search foods by name, category or FODMAP class
    Foods { query: Vec<String> },
    /// Suggest food names for a partial query
    Suggest { query: Vec<String> },
    /// Browse recipes, or search them by title or ingredient
    Recipes { query: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(path) = cli.foods {
        config.food_path = path;
    }
    if let Some(path) = cli.recipes {
        config.recipe_path = path;
    }
    if let Some(scope) = cli.scope {
        config.match_scope = scope;
    }
    debug!(?config, "resolved configuration");

    let cache = CatalogCache::new(config);
    match cli.command {
        Command::Foods { query } => print_foods(&cache, &query.join(" ")),
        Command::Suggest { query } => print_suggestions(&cache, &query.join(" ")),
        Command::Recipes { query } => print_recipes(&cache, &query.join(" ")),
    }
}

fn print_foods(cache: &CatalogCache, query: &str) -> anyhow::Result<()> {
    let Some(rows) = cache
        .food_rows(query)
        .context("unable to load FODMAP food data")?
    else {
        println!("Start typing a food to search, e.g. wheat, apple, dairy");
        return Ok(());
    };

    if rows.is_empty() {
        println!("No foods found containing '{query}'. Try different keywords.");
        return Ok(());
    }

    println!("{}\n", results_heading(rows.len()));
    for row in rows {
        println!("{}  {} ({})", row.status, row.food, row.category);
        println!("    Safe amount: {}", row.safe_amount);
        println!("    FODMAPs: {}", row.fodmaps);
    }
    Ok(())
}

fn print_suggestions(cache: &CatalogCache, query: &str) -> anyhow::Result<()> {
    let suggestions = cache
        .suggest_foods(query)
        .context("unable to load FODMAP food data")?;

    for food in suggestions {
        println!(
            "{} {} - {} - {}",
            traffic_light_glyph(food.traffic_light),
            food.name,
            food.category,
            safe_amount_text(food)
        );
    }
    Ok(())
}

fn print_recipes(cache: &CatalogCache, query: &str) -> anyhow::Result<()> {
    let categories = cache
        .recipe_cards(query)
        .context("unable to load recipes")?;

    if categories.is_empty() {
        println!("No recipes found containing '{query}'.");
        return Ok(());
    }

    for (label, cards) in categories {
        println!("{} {label}", category_glyph(&label));
        for card in cards {
            println!("\n  {} ({})", card.title, card.servings);
            for ingredient in &card.ingredients {
                println!("    - {ingredient}");
            }
            for step in &card.steps {
                println!("    {step}");
            }
        }
        println!();
    }
    Ok(())
}
