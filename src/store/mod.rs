use smol_str::SmolStr;

use crate::error::{Error, Result};

mod load;
mod options;

pub use load::LoadOptions;

/// One review row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub condition: SmolStr,
    pub age: SmolStr,
    pub sex: SmolStr,
    pub drug: SmolStr,
    /// `None` when the cell could not be read as a number.
    pub score: Option<f64>,
    pub effectiveness: Option<f64>,
    pub satisfaction: Option<f64>,
    /// Indicator values, aligned with [RecordStore::side_effect_names]. Unreadable cells are 0.
    pub side_effects: Vec<f64>,
}

impl ReviewRecord {
    pub fn has_side_effect(&self, index: usize) -> bool {
        self.side_effects.get(index).copied().unwrap_or(0.0) > 0.0
    }
}

/// The immutable table of reviews that every recommendation reads from.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ReviewRecord>,
    side_effect_names: Vec<SmolStr>,
}

/// A filter triple whose values are all known to exist in a [RecordStore].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub condition: SmolStr,
    pub age: SmolStr,
    pub sex: SmolStr,
}

impl RecordStore {
    pub fn new(records: Vec<ReviewRecord>, side_effect_names: Vec<SmolStr>) -> Self {
        Self {
            records,
            side_effect_names,
        }
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn side_effect_names(&self) -> &[SmolStr] {
        &self.side_effect_names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a query, checking that each value occurs somewhere in its column.
    pub fn query(&self, condition: &str, age: &str, sex: &str) -> Result<Query> {
        let check = |field: &'static str, value: &str, get: fn(&ReviewRecord) -> &SmolStr| {
            if self.records.iter().any(|r| get(r) == value) {
                Ok(SmolStr::from(value))
            } else {
                Err(Error::InvalidFilterValue {
                    field,
                    value: value.to_string(),
                })
            }
        };

        Ok(Query {
            condition: check("condition", condition, |r| &r.condition)?,
            age: check("age", age, |r| &r.age)?,
            sex: check("sex", sex, |r| &r.sex)?,
        })
    }
}

/// Read a numeric cell, treating blanks and anything unparseable as missing.
pub(crate) fn coerce(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub fn sample_csv() -> &'static str {
        "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,se1,se2\n\
         A,Y,M,X,4,4,5,1,0\n\
         A,Y,M,X,2,2,3,0,1\n\
         A,Y,M,Z,5,5,5,1,1\n\
         B,O,F,X,1,1,1,0,0\n"
    }

    pub fn sample_store() -> RecordStore {
        RecordStore::from_reader(sample_csv().as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn coerce_values() {
        assert_eq!(coerce(" 3.5 "), Some(3.5));
        assert_eq!(coerce(""), None);
        assert_eq!(coerce("n/a"), None);
        assert_eq!(coerce("NaN"), None);
    }

    #[test]
    fn query_accepts_known_values() {
        let store = sample_store();
        let query = store.query("A", "Y", "M").unwrap();
        assert_eq!(query.condition, "A");
        assert_eq!(query.sex, "M");
    }

    #[test]
    fn query_rejects_unknown_values() {
        let store = sample_store();
        let err = store.query("A", "Y", "X").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFilterValue { field: "sex", .. }
        ));
    }

    #[test]
    fn has_side_effect_out_of_range() {
        let store = sample_store();
        let record = &store.records()[0];
        assert!(record.has_side_effect(0));
        assert!(!record.has_side_effect(1));
        assert!(!record.has_side_effect(10));
    }
}
