use clap::Args;
use drugrec::RecordStore;
use eyre::Result;
use smol_str::SmolStr;

#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Only show the sexes and age brackets reviewed for this condition
    #[clap(short, long)]
    condition: Option<String>,

    /// Together with --condition, only show age brackets reviewed for this sex
    #[clap(short, long, requires = "condition")]
    sex: Option<String>,
}

fn print_list(label: &str, values: &[SmolStr]) {
    println!("{label}:");
    for value in values {
        println!("  {value}");
    }
}

pub fn run(store: &RecordStore, args: OptionsArgs) -> Result<()> {
    match (args.condition.as_deref(), args.sex.as_deref()) {
        (Some(condition), Some(sex)) => {
            print_list("Age brackets", &store.ages_for(condition, sex));
        }
        (Some(condition), None) => {
            let sexes = store.sexes_for(condition);
            print_list("Sexes", &sexes);
            for sex in &sexes {
                print_list(
                    &format!("Age brackets ({sex})"),
                    &store.ages_for(condition, sex),
                );
            }
        }
        _ => {
            print_list("Conditions", &store.conditions());
            print_list("Age brackets", &store.ages());
            print_list("Sexes", &store.sexes());
        }
    }

    Ok(())
}
