use std::io::Write;

use clap::{Args, ValueEnum};
use drugrec::{
    pipeline::{recommend, IncidenceMode, PipelineOptions, Recommendation, DEFAULT_TOP_N},
    render::{drug_table, frequency_table, incidence_table, Table},
    RecordStore,
};
use eyre::Result;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// The medical condition
    #[clap(short, long)]
    pub condition: String,

    /// The age bracket, exactly as it appears in the dataset
    #[clap(short, long)]
    pub age: String,

    /// The patient's sex
    #[clap(short, long)]
    pub sex: String,

    /// How many of the most common side effects to report
    #[clap(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Rank side effects by review count or by share of reviews
    #[clap(short, long, value_enum, default_value_t = IncidenceMode::Percentage)]
    pub incidence: IncidenceMode,

    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn write_section<W: Write>(
    out: &mut W,
    title: &str,
    table: &Table,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => table.write_csv(&mut *out)?,
        _ => {
            writeln!(out, "{title}:")?;
            table.write_text(&mut *out)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_report<W: Write>(
    out: &mut W,
    rec: &Recommendation,
    incidence: IncidenceMode,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rec)?;
            writeln!(out)?;
            return Ok(());
        }
        // An empty CSV report still has every table, header rows only.
        OutputFormat::Text if rec.is_empty() => {
            writeln!(out, "No reviews match these filters")?;
            return Ok(());
        }
        _ => {}
    }

    write_section(out, "Recommended drugs", &drug_table(rec), format)?;
    write_section(
        out,
        "Most common side effects",
        &frequency_table(rec, incidence),
        format,
    )?;
    write_section(out, "Side effects by drug", &incidence_table(rec), format)?;

    Ok(())
}

pub fn run(store: &RecordStore, args: RecommendArgs) -> Result<()> {
    let query = store.query(&args.condition, &args.age, &args.sex)?;
    let options = PipelineOptions {
        top_n: args.top_n,
        incidence: args.incidence,
    };

    let rec = recommend(store, &query, &options);

    let mut out = std::io::stdout().lock();
    write_report(&mut out, &rec, args.incidence, args.format)
}
