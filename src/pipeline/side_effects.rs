use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::aggregate::DrugMeans;
use crate::store::ReviewRecord;

/// How side effects are ranked and reported in the frequency table.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncidenceMode {
    /// Number of reviews that report the side effect.
    Count,
    /// Share of reviews that report the side effect.
    #[default]
    Percentage,
}

/// How often one side effect was reported across the filtered reviews.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SideEffectFrequency {
    pub name: SmolStr,
    /// Position of the side effect in the record store's side effect columns.
    #[serde(skip)]
    pub column: usize,
    pub count: usize,
    pub percentage: f64,
}

impl SideEffectFrequency {
    pub fn value(&self, mode: IncidenceMode) -> f64 {
        match mode {
            IncidenceMode::Count => self.count as f64,
            IncidenceMode::Percentage => self.percentage,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Incidence {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DrugIncidence {
    pub drug: SmolStr,
    pub reviews: usize,
    /// One cell per entry of [IncidenceTable::side_effects], in the same order.
    pub cells: Vec<Incidence>,
}

/// Drug by side effect incidence. Every row has a cell for every column.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct IncidenceTable {
    pub side_effects: Vec<SmolStr>,
    pub rows: Vec<DrugIncidence>,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Find the `top_n` side effects reported most often in `subset`. Ties keep column order, so
/// side effects nobody reported fill any remaining places in column order.
pub fn top_side_effects(
    subset: &[&ReviewRecord],
    names: &[SmolStr],
    mode: IncidenceMode,
    top_n: usize,
) -> Vec<SideEffectFrequency> {
    let mut frequencies = names
        .iter()
        .enumerate()
        .map(|(column, name)| {
            let count = subset.iter().filter(|r| r.has_side_effect(column)).count();
            SideEffectFrequency {
                name: name.clone(),
                column,
                count,
                percentage: percentage(count, subset.len()),
            }
        })
        .collect::<Vec<_>>();

    // sort_by is stable, so equal counts stay in column order.
    frequencies.sort_by(|a, b| b.value(mode).total_cmp(&a.value(mode)));
    frequencies.truncate(top_n);
    frequencies
}

/// For each drug, in the order given, the share of its own reviews reporting each of the
/// `top` side effects.
pub fn incidence_by_drug(
    subset: &[&ReviewRecord],
    drugs: &[DrugMeans],
    top: &[SideEffectFrequency],
) -> IncidenceTable {
    let rows = drugs
        .iter()
        .map(|drug| {
            let reviews = subset
                .iter()
                .filter(|r| r.drug == drug.drug)
                .collect::<Vec<_>>();

            let cells = top
                .iter()
                .map(|se| {
                    let count = reviews
                        .iter()
                        .filter(|r| r.has_side_effect(se.column))
                        .count();
                    Incidence {
                        count,
                        percentage: percentage(count, reviews.len()),
                    }
                })
                .collect();

            DrugIncidence {
                drug: drug.drug.clone(),
                reviews: reviews.len(),
                cells,
            }
        })
        .collect();

    IncidenceTable {
        side_effects: top.iter().map(|se| se.name.clone()).collect(),
        rows,
    }
}
