use crate::store::{Query, ReviewRecord};

/// Select the records matching all three values exactly, keeping their original order.
pub fn filter<'a>(
    records: &'a [ReviewRecord],
    condition: &str,
    age: &str,
    sex: &str,
) -> Vec<&'a ReviewRecord> {
    records
        .iter()
        .filter(|r| r.condition == condition && r.age == age && r.sex == sex)
        .collect()
}

pub fn filter_query<'a>(records: &'a [ReviewRecord], query: &Query) -> Vec<&'a ReviewRecord> {
    filter(records, &query.condition, &query.age, &query.sex)
}
