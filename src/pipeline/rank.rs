use std::cmp::Ordering;

use super::aggregate::DrugMeans;

/// Order missing values after present ones, and higher values first.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort drugs by score, then effectiveness, then satisfaction, all descending. The sort is
/// stable so fully tied drugs keep their incoming order.
pub fn rank(mut drugs: Vec<DrugMeans>) -> Vec<DrugMeans> {
    drugs.sort_by(|a, b| {
        descending(a.score, b.score)
            .then_with(|| descending(a.effectiveness, b.effectiveness))
            .then_with(|| descending(a.satisfaction, b.satisfaction))
    });
    drugs
}
