//! Turns the reviews for one condition, age bracket and sex into a ranked drug list and a
//! side effect incidence table.

use serde::Serialize;
use tracing::debug;

use crate::store::{Query, RecordStore};

pub mod aggregate;
pub mod filter;
pub mod rank;
pub mod side_effects;

pub use aggregate::DrugMeans;
pub use side_effects::{IncidenceMode, IncidenceTable, SideEffectFrequency};

/// The number of side effects reported when nothing else is asked for.
pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub top_n: usize,
    pub incidence: IncidenceMode,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            incidence: IncidenceMode::default(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    /// Drugs, best first.
    pub drugs: Vec<DrugMeans>,
    /// The most frequent side effects across all matching reviews.
    pub side_effects: Vec<SideEffectFrequency>,
    pub incidence: IncidenceTable,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}

/// Run the whole pipeline for one query. A query that matches no reviews gives an empty
/// recommendation.
pub fn recommend(store: &RecordStore, query: &Query, options: &PipelineOptions) -> Recommendation {
    let subset = filter::filter_query(store.records(), query);
    debug!(
        condition = %query.condition,
        age = %query.age,
        sex = %query.sex,
        matches = subset.len(),
        "filtered reviews"
    );

    if subset.is_empty() {
        return Recommendation::default();
    }

    let drugs = rank::rank(aggregate::drug_means(&subset));
    let top = side_effects::top_side_effects(
        &subset,
        store.side_effect_names(),
        options.incidence,
        options.top_n,
    );
    let incidence = side_effects::incidence_by_drug(&subset, &drugs, &top);
    debug!(
        drugs = drugs.len(),
        side_effects = top.len(),
        "built recommendation"
    );

    Recommendation {
        drugs,
        side_effects: top,
        incidence,
    }
}
