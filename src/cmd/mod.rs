use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drugrec::{schema::DatasetSchema, LoadOptions, RecordStore};
use eyre::Result;

mod columns;
mod options;
mod recommend;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(
        short,
        long,
        env = "DRUGREC_DATA",
        help = "The review dataset, as delimited text, optionally gzipped"
    )]
    pub data: PathBuf,

    #[arg(
        long,
        env = "DRUGREC_SCHEMA",
        help = "A JSON file naming the dataset's columns"
    )]
    pub schema: Option<PathBuf>,

    /// The field delimiter of the dataset
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Fail instead of skipping side effect columns that don't hold whole-number indicators
    #[arg(long)]
    pub strict_schema: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank drugs for a condition, age bracket and sex
    Recommend(recommend::RecommendArgs),
    /// List the values that can be used in a recommendation
    Options(options::OptionsArgs),
    /// Show how the dataset's columns were interpreted
    Columns,
}

fn load_store(args: &Args) -> Result<RecordStore> {
    let mut schema = match &args.schema {
        Some(path) => DatasetSchema::from_file(path)?,
        None => DatasetSchema::default(),
    };
    schema.strict |= args.strict_schema;

    if !args.delimiter.is_ascii() {
        return Err(eyre::eyre!(
            "Delimiter must be a single ASCII character, got {:?}",
            args.delimiter
        ));
    }

    let options = LoadOptions {
        schema,
        delimiter: args.delimiter as u8,
    };

    Ok(RecordStore::from_path(&args.data, &options)?)
}

pub fn run(args: Args) -> Result<()> {
    let store = load_store(&args)?;

    match args.command {
        Commands::Recommend(cmd_args) => recommend::run(&store, cmd_args),
        Commands::Options(cmd_args) => options::run(&store, cmd_args),
        Commands::Columns => columns::run(&store),
    }
}
