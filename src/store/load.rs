use std::{io::Read, path::Path};

use flate2::read::GzDecoder;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use super::{coerce, RecordStore, ReviewRecord};
use crate::{
    error::{Error, Result},
    schema::{DatasetSchema, IndicatorCheck},
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub schema: DatasetSchema,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: DatasetSchema::default(),
            delimiter: b',',
        }
    }
}

impl RecordStore {
    /// Load a delimited review file. Files ending in `.gz` are decompressed on the fly.
    pub fn from_path(path: &Path, options: &LoadOptions) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);

        let gzipped = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        let store = if gzipped {
            Self::from_reader(GzDecoder::new(reader), options)?
        } else {
            Self::from_reader(reader, options)?
        };

        info!(
            path = %path.display(),
            records = store.len(),
            side_effects = store.side_effect_names().len(),
            "loaded review dataset"
        );

        Ok(store)
    }

    pub fn from_reader<R: Read>(input: R, options: &LoadOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        let columns = options.schema.resolve(&headers)?;

        let mut checks = vec![IndicatorCheck::default(); columns.side_effects.len()];
        let mut records = Vec::new();

        for line in reader.records() {
            let line = line?;
            let text = |idx: usize| SmolStr::from(line.get(idx).unwrap_or_default());
            let number = |idx: usize| coerce(line.get(idx).unwrap_or_default());

            let side_effects = columns
                .side_effects
                .iter()
                .zip(checks.iter_mut())
                .map(|(col, check)| {
                    let value = number(col.index);
                    check.observe(value);
                    value.unwrap_or(0.0)
                })
                .collect();

            records.push(ReviewRecord {
                condition: text(columns.condition),
                age: text(columns.age),
                sex: text(columns.sex),
                drug: text(columns.drug),
                score: number(columns.score),
                effectiveness: number(columns.effectiveness),
                satisfaction: number(columns.satisfaction),
                side_effects,
            });
        }

        // Drop any column in the side effect block that turned out to hold something else,
        // like a prediction that was appended after the indicators.
        let mut keep = Vec::with_capacity(checks.len());
        for (col, check) in columns.side_effects.iter().zip(&checks) {
            match check.mismatch() {
                Some(reason) if options.schema.strict => {
                    return Err(Error::SchemaMismatch {
                        column: col.name.clone(),
                        reason,
                    });
                }
                Some(reason) => {
                    warn!(column = %col.name, %reason, "excluding column from side effects");
                    keep.push(false);
                }
                None => keep.push(true),
            }
        }

        let side_effect_names = columns
            .side_effects
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(col, _)| col.name.clone())
            .collect::<Vec<_>>();

        if side_effect_names.len() != columns.side_effects.len() {
            for record in &mut records {
                let mut kept = keep.iter();
                record
                    .side_effects
                    .retain(|_| kept.next().copied().unwrap_or(false));
            }
        }

        debug!(
            records = records.len(),
            side_effects = side_effect_names.len(),
            "parsed review rows"
        );

        Ok(RecordStore::new(records, side_effect_names))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::test::sample_store;

    #[test]
    fn loads_records() {
        let store = sample_store();
        assert_eq!(store.len(), 4);
        assert_eq!(store.side_effect_names(), &["se1", "se2"]);

        let first = &store.records()[0];
        assert_eq!(first.drug, "X");
        assert_eq!(first.score, Some(4.0));
        assert_eq!(first.side_effects, vec![1.0, 0.0]);
    }

    #[test]
    fn blank_and_bad_cells() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,rash\n\
                    A,Y,M,X,,abc,3,\n\
                    A,Y,M,X,2,2,3,oops\n";
        let store = RecordStore::from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();

        let first = &store.records()[0];
        assert_eq!(first.score, None);
        assert_eq!(first.effectiveness, None);
        assert_eq!(first.satisfaction, Some(3.0));
        assert_eq!(first.side_effects, vec![0.0]);
        assert_eq!(store.records()[1].side_effects, vec![0.0]);
    }

    #[test]
    fn short_rows_default_side_effects_to_zero() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,rash,itch\n\
                    A,Y,M,X,1,2,3,1\n";
        let store = RecordStore::from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(store.records()[0].side_effects, vec![1.0, 0.0]);
    }

    #[test]
    fn excludes_non_indicator_columns() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,rash,predicted,itch\n\
                    A,Y,M,X,1,2,3,1,4.2,0\n\
                    A,Y,M,X,1,2,3,0,3.1,1\n";
        let store = RecordStore::from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(store.side_effect_names(), &["rash", "itch"]);
        assert_eq!(store.records()[0].side_effects, vec![1.0, 0.0]);
        assert_eq!(store.records()[1].side_effects, vec![0.0, 1.0]);
    }

    #[test]
    fn whole_number_counts_are_side_effects() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,nausea\n\
                    A,Y,M,X,1,2,3,2\n\
                    A,Y,M,X,1,2,3,0\n";
        let store = RecordStore::from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(store.side_effect_names(), &["nausea"]);
        assert!(store.records()[0].has_side_effect(0));
        assert!(!store.records()[1].has_side_effect(0));
    }

    #[test]
    fn strict_schema_rejects_non_indicator_columns() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,predicted\n\
                    A,Y,M,X,1,2,3,4.2\n";
        let options = LoadOptions {
            schema: DatasetSchema {
                strict: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let err = RecordStore::from_reader(data.as_bytes(), &options).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { column, .. } if column == "predicted"));
    }

    #[test]
    fn custom_delimiter() {
        let data = "Condition;Age;Sex;Drug;sentiment_score;Effectiveness;Satisfaction;rash\n\
                    A;Y;M;X;1;2;3;1\n";
        let options = LoadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let store = RecordStore::from_reader(data.as_bytes(), &options).unwrap();
        assert_eq!(store.records()[0].effectiveness, Some(2.0));
    }
}
