use clap::{Parser, Subcommand};
use quarry::commands::{self, DEFAULT_SHOW_LIMIT};
use quarry::{logging, DatasetFactory, Settings};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Inspect the table datasets of a Quarry catalog",
    long_about = None
)]
struct Args {
    /// Catalog file (TOML, YAML or JSON). Defaults to $QUARRY_CATALOG_PATH, then conf/catalog.toml.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List dataset names.
    List,
    /// Print a dataset's configuration.
    Describe { name: String },
    /// Load a dataset and print its first rows.
    Show {
        name: String,
        #[arg(short, long, default_value_t = DEFAULT_SHOW_LIMIT)]
        limit: usize,
    },
    /// Load a dataset and print its columns.
    Schema { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    logging::init()?;

    let settings = Settings::new(args.config.as_deref())?;
    let factory = DatasetFactory::default();

    let output = match args.command {
        Command::List => commands::list(&settings),
        Command::Describe { name } => commands::describe(&settings, &factory, &name)?,
        Command::Show { name, limit } => commands::show(&settings, &factory, &name, limit).await?,
        Command::Schema { name } => commands::schema(&settings, &factory, &name).await?,
    };
    println!("{output}");

    factory.pool().close_all().await;
    Ok(())
}
