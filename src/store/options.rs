use itertools::Itertools;
use smol_str::SmolStr;

use super::{RecordStore, ReviewRecord};

impl RecordStore {
    fn distinct<'a>(
        &'a self,
        keep: impl Fn(&ReviewRecord) -> bool,
        get: impl Fn(&'a ReviewRecord) -> &'a SmolStr,
    ) -> Vec<SmolStr> {
        self.records
            .iter()
            .filter(|r| keep(r))
            .map(get)
            .unique()
            .cloned()
            .collect()
    }

    /// Every condition in the dataset, in order of first appearance.
    pub fn conditions(&self) -> Vec<SmolStr> {
        self.distinct(|_| true, |r| &r.condition)
    }

    pub fn ages(&self) -> Vec<SmolStr> {
        self.distinct(|_| true, |r| &r.age)
    }

    pub fn sexes(&self) -> Vec<SmolStr> {
        self.distinct(|_| true, |r| &r.sex)
    }

    /// The sexes that appear alongside the given condition.
    pub fn sexes_for(&self, condition: &str) -> Vec<SmolStr> {
        self.distinct(|r| r.condition == condition, |r| &r.sex)
    }

    /// The age brackets that appear alongside the given condition and sex.
    pub fn ages_for(&self, condition: &str, sex: &str) -> Vec<SmolStr> {
        self.distinct(|r| r.condition == condition && r.sex == sex, |r| &r.age)
    }
}
