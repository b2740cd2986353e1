use anyhow::Context;
use clap::Parser;
use content_catalog::core::{views, ConfigProvider};
use content_catalog::utils::{logger, validation::Validate};
use content_catalog::{
    source_from_config, CatalogError, CliConfig, Command, ContentCatalog, ErrorCategory,
    ListingQuery,
};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let Err(err) = run(&cli).await else {
        return Ok(());
    };

    let Some(e) = err.downcast_ref::<CatalogError>() else {
        return Err(err);
    };

    tracing::error!(
        "❌ Command failed: {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Config => 2,
        ErrorCategory::NotFound => 3,
        ErrorCategory::Fetch | ErrorCategory::Schema => 1,
    };
    std::process::exit(exit_code);
}

async fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let source = source_from_config(&config)?;
    let catalog = ContentCatalog::new(source);
    let posts = catalog.load().await?;

    match &cli.command {
        Command::List {
            tag,
            search,
            page,
            page_size,
            include_previews,
        } => {
            let visible = if *include_previews {
                posts.to_vec()
            } else {
                views::exclude_previews(&posts)
            };
            let mut query = ListingQuery::new(page_size.unwrap_or(config.page_size()));
            if let Some(tag) = tag {
                query = query.with_tag(tag.clone());
            }
            if let Some(search) = search {
                query = query.with_search(search.clone());
            }
            print_json(&query.with_page(*page).apply(&visible))
        }
        Command::Featured => print_json(&views::select_featured(&posts)),
        Command::Hero => print_json(&views::select_hero(&posts)),
        Command::Tags => print_json(&views::collect_tags(&posts)),
        Command::Related { slug, max } => {
            let current = posts.find(slug)?;
            let related = views::select_related(
                &posts,
                &current.slug,
                &current.tags,
                max.unwrap_or(config.related_count()),
            );
            print_json(&related)
        }
        Command::Show { slug } => {
            let post = catalog.load_post(&posts, slug).await?;
            print_json(&post)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serializing command output")?;
    println!("{}", rendered);
    Ok(())
}
