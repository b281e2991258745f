use drugrec::RecordStore;
use eyre::Result;

pub fn run(store: &RecordStore) -> Result<()> {
    println!(
        "{} reviews, {} side effect columns",
        store.len(),
        store.side_effect_names().len()
    );

    for (idx, name) in store.side_effect_names().iter().enumerate() {
        let reported = store
            .records()
            .iter()
            .filter(|r| r.has_side_effect(idx))
            .count();
        println!("  {name} - reported in {reported} reviews");
    }

    Ok(())
}
