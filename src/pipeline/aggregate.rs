use ahash::{HashMap, HashMapExt};
use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use crate::store::ReviewRecord;

/// Mean scores of one drug within a filtered set of reviews.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DrugMeans {
    pub drug: SmolStr,
    pub reviews: usize,
    pub score: Option<f64>,
    pub effectiveness: Option<f64>,
    pub satisfaction: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct Group {
    reviews: usize,
    score: Mean,
    effectiveness: Mean,
    satisfaction: Mean,
}

/// Group reviews by drug and average their scores. Missing values count toward neither the
/// sum nor the denominator. Drugs come back in ascending name order.
pub fn drug_means(subset: &[&ReviewRecord]) -> Vec<DrugMeans> {
    let mut groups: HashMap<&SmolStr, Group> = HashMap::new();

    for record in subset {
        let group = groups.entry(&record.drug).or_default();
        group.reviews += 1;
        group.score.add(record.score);
        group.effectiveness.add(record.effectiveness);
        group.satisfaction.add(record.satisfaction);
    }

    groups
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(drug, group)| DrugMeans {
            drug: drug.clone(),
            reviews: group.reviews,
            score: group.score.value(),
            effectiveness: group.effectiveness.value(),
            satisfaction: group.satisfaction.value(),
        })
        .collect()
}
