use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::solve::SolveArgs;

mod geojson_export;
mod input;
mod parsers;
mod print;
mod solve;
mod stops_csv;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plans routes for the stops of a JSON or CSV file
    #[command(visible_alias = "s")]
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Prints the JSON schema of the problem input
    Schema {
        /// Writes the schema to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args).await?,
        Some(Commands::Schema { output }) => {
            let schema = dispatch_optimizer::json::schema::generate_json_schema()?;
            match output {
                Some(path) => std::fs::write(path, schema)?,
                None => println!("{schema}"),
            }
        }
        None => {}
    }

    Ok(())
}
