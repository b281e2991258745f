use std::path::Path;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{Error, Result};

/// Names the columns of a review dataset. Columns are always located by name, so the
/// side effect block stays correct when leading columns are added or reordered.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatasetSchema {
    pub condition: SmolStr,
    pub age: SmolStr,
    pub sex: SmolStr,
    pub drug: SmolStr,
    pub score: SmolStr,
    pub effectiveness: SmolStr,
    pub satisfaction: SmolStr,
    /// Extra metadata columns that are neither scores nor side effects.
    pub ignored: Vec<SmolStr>,
    /// Restrict side effects to the inclusive range between these two columns.
    pub side_effect_range: Option<(SmolStr, SmolStr)>,
    /// Fail the load instead of dropping a side effect column that doesn't hold indicators.
    pub strict: bool,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self {
            condition: "Condition".into(),
            age: "Age".into(),
            sex: "Sex".into(),
            drug: "Drug".into(),
            score: "sentiment_score".into(),
            effectiveness: "Effectiveness".into(),
            satisfaction: "Satisfaction".into(),
            ignored: Vec::new(),
            side_effect_range: None,
            strict: false,
        }
    }
}

/// Column indexes of a concrete header row.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub condition: usize,
    pub age: usize,
    pub sex: usize,
    pub drug: usize,
    pub score: usize,
    pub effectiveness: usize,
    pub satisfaction: usize,
    pub side_effects: Vec<SideEffectColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectColumn {
    pub name: SmolStr,
    pub index: usize,
}

impl DatasetSchema {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let schema = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(schema)
    }

    fn fixed_columns(&self) -> [&SmolStr; 7] {
        [
            &self.condition,
            &self.age,
            &self.sex,
            &self.drug,
            &self.score,
            &self.effectiveness,
            &self.satisfaction,
        ]
    }

    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ResolvedSchema> {
        let position = |name: &SmolStr| {
            headers
                .iter()
                .position(|h| h.as_ref() == name.as_str())
                .ok_or_else(|| Error::MissingColumn(name.clone()))
        };

        let (range_start, range_end) = match &self.side_effect_range {
            Some((first, last)) => (position(first)?, position(last)?),
            None => (0, headers.len().saturating_sub(1)),
        };

        let fixed = self.fixed_columns();
        let side_effects = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i >= range_start && *i <= range_end)
            .filter(|(_, h)| {
                let h = h.as_ref();
                !h.is_empty()
                    && !fixed.iter().any(|f| f.as_str() == h)
                    && !self.ignored.iter().any(|f| f.as_str() == h)
            })
            .map(|(index, h)| SideEffectColumn {
                name: h.as_ref().into(),
                index,
            })
            .collect();

        Ok(ResolvedSchema {
            condition: position(&self.condition)?,
            age: position(&self.age)?,
            sex: position(&self.sex)?,
            drug: position(&self.drug)?,
            score: position(&self.score)?,
            effectiveness: position(&self.effectiveness)?,
            satisfaction: position(&self.satisfaction)?,
            side_effects,
        })
    }
}

/// Tracks whether a candidate side effect column only ever holds indicator values.
#[derive(Debug, Default, Clone)]
pub(crate) struct IndicatorCheck {
    offending: Option<f64>,
}

impl IndicatorCheck {
    pub fn observe(&mut self, value: Option<f64>) {
        if self.offending.is_some() {
            return;
        }

        if let Some(v) = value {
            if v < 0.0 || v.fract() != 0.0 {
                self.offending = Some(v);
            }
        }
    }

    /// Returns why the column is not an indicator column, if it isn't.
    pub fn mismatch(&self) -> Option<String> {
        self.offending
            .map(|v| format!("found value {v}, expected non-negative whole numbers"))
    }
}
