use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estate_viewer::command::{self, Command, HELP};
use estate_viewer::config::{AssetBase, PriceSlider, ViewerConfig, DEFAULT_CURRENCY};
use estate_viewer::detail::DetailState;
use estate_viewer::display::Renderer;
use estate_viewer::search::{self, SearchForm, ANY};
use estate_viewer::{Dataset, Event, PropertyId, PropertyRecord, Route, Session};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "estate-viewer",
    about = "Browse, filter and shortlist property listings",
    version
)]
struct Cli {
    /// Dataset JSON (array of properties or `{ "properties": [...] }`)
    #[arg(long, global = true, env = "ESTATE_DATASET")]
    dataset: Option<PathBuf>,

    /// Prefix joined onto image references
    #[arg(long, global = true, env = "ESTATE_ASSET_BASE", default_value = "/")]
    asset_base: String,

    /// Currency label shown before prices
    #[arg(long, global = true, env = "ESTATE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print listings matching a search
    List {
        #[arg(long = "type", default_value = ANY)]
        property_type: String,
        /// Minimum bedrooms, or Any
        #[arg(long, default_value = ANY)]
        bedrooms: String,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Print one listing's detail page
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Print the property types present in the dataset
    Types,

    /// Interactive session reading commands from stdin
    Session,
}

impl Cli {
    fn config(&self) -> ViewerConfig {
        ViewerConfig {
            dataset: self.dataset.clone(),
            asset_base: AssetBase::new(self.asset_base.clone()),
            currency: self.currency.clone(),
            price_slider: PriceSlider::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so listings on stdout stay pipeable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 Estate Viewer");

    let config = cli.config();
    let source = config.dataset_source();
    info!("Loading properties from {}", source.describe());
    let dataset = source
        .load()
        .await
        .with_context(|| format!("Failed to load dataset from {}", source.describe()))?;

    let renderer = Renderer::new(config.currency.clone(), config.asset_base.clone());

    match cli.command {
        Commands::List {
            property_type,
            bedrooms,
            min_price,
            max_price,
            json,
        } => {
            let form = SearchForm {
                property_type,
                bedrooms,
                min_price,
                max_price,
            };
            let results = search::search(dataset.records(), &form).context("Invalid search")?;
            info!("✅ {} of {} properties match", results.len(), dataset.len());

            if json {
                let records: Vec<&PropertyRecord> = results.iter().map(|r| r.as_ref()).collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{}", renderer.listing(results.as_slice()));
            }
        }
        Commands::Show { id, json } => {
            let state = DetailState::lookup(&dataset, &PropertyId::from(id.as_str()));
            if json {
                let value = match &state {
                    DetailState::Found(view) => serde_json::to_value(view.record().as_ref())?,
                    DetailState::NotFound(id) => json!({ "error": "Property not found", "id": id }),
                };
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", renderer.detail(&state));
            }
        }
        Commands::Types => {
            for kind in search::available_types(dataset.records()) {
                println!("{}", kind);
            }
        }
        Commands::Session => run_session(dataset, &renderer, &config.price_slider).await?,
    }

    Ok(())
}

async fn run_session(dataset: Dataset, renderer: &Renderer, slider: &PriceSlider) -> Result<()> {
    let mut session = Session::new(dataset);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", renderer.listing(session.results()));
    println!("{}", renderer.slider(slider));
    println!("Type `help` for commands.");

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        let command = match command::parse(&line, slider) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!("Rejected input {:?}", line);
                println!("{}", err);
                continue;
            }
        };

        match command {
            Command::Event(event) => {
                let view = ViewAfter::of(&event);
                let notice = session.handle(event);
                println!("{}", notice);
                render(&session, renderer, view);
            }
            Command::ShowResults => println!("{}", renderer.listing(session.results())),
            Command::ShowFavourites => println!("{}", renderer.favourites(session.favourites())),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    info!("Session ended with {} favourites", session.favourites().len());
    Ok(())
}

/// Which part of the screen an event redraws
#[derive(Clone, Copy)]
enum ViewAfter {
    Results,
    Favourites,
    Page,
    Nothing,
}

impl ViewAfter {
    fn of(event: &Event) -> Self {
        match event {
            Event::Search(_) | Event::ResetSearch => ViewAfter::Results,
            Event::AddFavourite(_)
            | Event::RemoveFavourite(_)
            | Event::ClearFavourites
            | Event::Drop(_) => ViewAfter::Favourites,
            Event::Open(_) | Event::Back | Event::SelectImage(_) | Event::SelectTab(_) => {
                ViewAfter::Page
            }
            Event::DragStart(_) => ViewAfter::Nothing,
        }
    }
}

fn render(session: &Session, renderer: &Renderer, view: ViewAfter) {
    match view {
        ViewAfter::Results => println!("{}", renderer.listing(session.results())),
        ViewAfter::Favourites => println!("{}", renderer.favourites(session.favourites())),
        ViewAfter::Page => match session.route() {
            Route::Listing => println!("{}", renderer.listing(session.results())),
            Route::Detail(state) => println!("{}", renderer.detail(state)),
        },
        ViewAfter::Nothing => {}
    }
}
