#![allow(missing_docs)]

mod render;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, console::Term};
use gameshelf_core::prelude::*;
use std::num::NonZeroUsize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gameshelfctl", about = "Browse and edit a gameshelf game library", version)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:5001/api (overrides config and env)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List games with search, filters, sorting and pagination
    List(ListArgs),
    /// Show one game
    Show {
        id: String,
        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },
    /// Add a game
    Add(FormArgs),
    /// Edit a game; omitted flags keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a game
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Platforms, genres and statuses present in the library
    Options,
    /// List or post player reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Inspect or write the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive title search
    #[arg(long, short = 's')]
    search: Option<String>,
    /// Exact platform, or "All"
    #[arg(long)]
    platform: Option<String>,
    /// Exact genre, or "All"
    #[arg(long)]
    genre: Option<String>,
    /// Por jugar, Jugando, Completado, Abandonado, or "All"
    #[arg(long)]
    status: Option<Filter<GameStatus>>,
    /// none, titleAsc, titleDesc, hoursDesc, ratingDesc, yearDesc
    #[arg(long, default_value = "none")]
    sort: SortKey,
    /// Page to show; clamped to the pages available
    #[arg(long, short = 'p', default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<NonZeroUsize>,
    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Any platform; `options` lists the usual ones
    #[arg(long)]
    platform: Option<String>,
    /// Any genre; `options` lists the usual ones
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    year: Option<String>,
    /// Por jugar, Jugando, Completado, Abandonado
    #[arg(long)]
    status: Option<String>,
    /// Whole stars from 0 to 5
    #[arg(long)]
    rating: Option<String>,
    #[arg(long)]
    hours: Option<String>,
    /// Absolute image URL; pass an empty string to clear it
    #[arg(long)]
    image_url: Option<String>,
}

impl FormArgs {
    fn apply(self, form: &mut GameForm) {
        let fields = [
            (self.title, &mut form.title),
            (self.description, &mut form.description),
            (self.platform, &mut form.platform),
            (self.genre, &mut form.genre),
            (self.year, &mut form.release_year),
            (self.status, &mut form.status),
            (self.rating, &mut form.rating),
            (self.hours, &mut form.hours_played),
            (self.image_url, &mut form.image_url),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List reviews, optionally for one game
    List {
        /// Only reviews of this game id
        #[arg(long)]
        game: Option<String>,
        /// Print the reviews as JSON
        #[arg(long)]
        json: bool,
    },
    /// Post a review
    Add {
        /// Id of the reviewed game
        #[arg(long)]
        game: String,
        /// Whole stars from 0 to 5
        #[arg(long, default_value = "0")]
        rating: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        author: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the effective configuration to the config file
    Save,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load();
    if let Some(server) = cli.server {
        config.server_url = gameshelf_core::api_client::normalize_base_url(&server);
    }

    tracing::debug!(server = %config.server_url, "Using games backend");

    run(config, cli.command).await
}

fn connect(config: &ClientConfig) -> Result<GameLibrary> {
    GameLibrary::from_config(config)
        .with_context(|| format!("Failed to set up client for {}", config.server_url))
}

async fn run(config: ClientConfig, command: Command) -> Result<()> {
    match command {
        Command::List(args) => {
            let mut library = connect(&config)?;
            load(&library).await?;
            if let Some(size) = args.page_size {
                library.set_page_size(size);
            }
            if let Some(search) = args.search {
                library.set_search_text(search);
            }
            if let Some(platform) = args.platform {
                library.set_platform_filter(Filter::from_selection(platform));
            }
            if let Some(genre) = args.genre {
                library.set_genre_filter(Filter::from_selection(genre));
            }
            if let Some(status) = args.status {
                library.set_status_filter(status);
            }
            library.set_sort_key(args.sort);
            library.set_page(args.page);

            let view = library.view();
            if args.json {
                println!("{}", serde_json::to_string_pretty(view.page_items())?);
            } else {
                print!("{}", render::page(&view, library.params()));
            }
        }
        Command::Show { id, json } => {
            let library = connect(&config)?;
            let game = library
                .get(&GameId::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to fetch game {id}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&game)?);
            } else {
                print!("{}", render::detail(&game));
            }
        }
        Command::Add(args) => {
            let library = connect(&config)?;
            let mut form = GameForm::default();
            args.apply(&mut form);
            let outcome = report(library.save_form(&form, None).await)?;
            println!("Added '{}' as {}", form.title.trim(), outcome.game_id());
        }
        Command::Edit { id, form: args } => {
            let library = connect(&config)?;
            let id = GameId::new(id);
            let current = library
                .get(&id)
                .await
                .with_context(|| format!("Failed to fetch game {id}"))?;
            let mut form = GameForm::from_game(&current);
            args.apply(&mut form);
            report(library.save_form(&form, Some(&id)).await)?;
            println!("Updated {id}");
        }
        Command::Delete { id, yes } => {
            let id = GameId::new(id);
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete game {id}?"))
                    .default(false)
                    .interact_on(&Term::stderr())?;
                if !confirmed {
                    println!("Aborted; nothing was deleted.");
                    return Ok(());
                }
            }
            let library = connect(&config)?;
            report(library.delete(&id).await)?;
            println!("Deleted {id}");
        }
        Command::Options => {
            let library = connect(&config)?;
            load(&library).await?;
            print!("{}", render::filter_options(&library.filter_options()));
        }
        Command::Reviews { action } => run_reviews(&config, action).await?,
        Command::Config { action } => run_config(&config, action)?,
    }
    Ok(())
}

async fn load(library: &GameLibrary) -> Result<()> {
    library.reload().await.map_err(|err| {
        let context = match timeout_hint(&err) {
            Some(hint) => format!("Failed to load the game library ({hint})"),
            None => "Failed to load the game library".to_string(),
        };
        anyhow::Error::new(err).context(context)
    })?;
    Ok(())
}

fn timeout_hint(err: &LibraryError) -> Option<&'static str> {
    match err {
        LibraryError::Transport(transport) if transport.is_timeout() => {
            Some("the backend did not answer in time; raise GAMESHELF_TIMEOUT_SECS")
        }
        _ => None,
    }
}

/// Turn a mutation result into something a user can act on. A mutation
/// that went through but could not be followed by a reload still counts as
/// done, with a warning.
fn report(result: Result<MutationOutcome, LibraryError>) -> Result<MutationOutcome> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(LibraryError::RefreshAfterMutation { outcome, source }) => {
            eprintln!("warning: {outcome} succeeded, but the library could not be reloaded: {source}");
            Ok(outcome)
        }
        Err(LibraryError::Form(err)) => {
            for issue in &err.issues {
                eprintln!("  - {issue}");
            }
            bail!("The game was not saved")
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_reviews(config: &ClientConfig, action: ReviewAction) -> Result<()> {
    let library = connect(config)?;
    match action {
        ReviewAction::List { game, json } => {
            let game = game.map(GameId::new);
            let reviews = library
                .reviews(game.as_ref())
                .await
                .context("Failed to fetch reviews")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reviews)?);
            } else {
                print!("{}", render::reviews(&reviews));
            }
        }
        ReviewAction::Add {
            game,
            rating,
            text,
            author,
        } => {
            let form = ReviewForm {
                game_id: game,
                author: author.unwrap_or_default(),
                rating,
                text,
            };
            match library.add_review(&form).await {
                Ok(review) => println!("Posted review {} for game {}", review.id, review.game_id),
                Err(LibraryError::Form(err)) => {
                    for issue in &err.issues {
                        eprintln!("  - {issue}");
                    }
                    bail!("The review was not posted")
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err).context("Failed to post the review"));
                }
            }
        }
    }
    Ok(())
}

fn run_config(config: &ClientConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Path => match ClientConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("No config directory on this platform"),
        },
        ConfigAction::Save => {
            let path = config.save().context("Failed to save config")?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
