//! Display formatting for recommendations. Nothing here feeds back into the pipeline.

use std::io::Write;

use crate::error::Result;
use crate::pipeline::{IncidenceMode, Recommendation};

const STAR: &str = "⭐";
/// Values above this still show their number, but no more stars.
pub const MAX_STARS: usize = 10;

/// Render a value as one star per whole point, up to [MAX_STARS], followed by the value,
/// e.g. `⭐⭐⭐(3.7)`.
pub fn stars(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            let count = if v > 0.0 {
                (v.floor() as usize).min(MAX_STARS)
            } else {
                0
            };
            format!("{}({v:.1})", STAR.repeat(count))
        }
        None => "-".to_string(),
    }
}

/// Render a percentage with one decimal, e.g. `66.7%`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Write the table as space-padded columns.
    pub fn write_text<W: Write>(&self, mut out: W) -> Result<()> {
        let mut widths = self
            .headers
            .iter()
            .map(|h| h.chars().count())
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_row = |out: &mut W, cells: &[String]| -> std::io::Result<()> {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(out, "{}", line.trim_end())
        };

        write_row(&mut out, &self.headers)?;
        for row in &self.rows {
            write_row(&mut out, row)?;
        }

        Ok(())
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// The ranked drugs with star-formatted scores.
pub fn drug_table(rec: &Recommendation) -> Table {
    Table {
        headers: ["Drug", "Score", "Effectiveness", "Satisfaction", "Reviews"]
            .map(String::from)
            .to_vec(),
        rows: rec
            .drugs
            .iter()
            .map(|d| {
                vec![
                    d.drug.to_string(),
                    stars(d.score),
                    stars(d.effectiveness),
                    stars(d.satisfaction),
                    d.reviews.to_string(),
                ]
            })
            .collect(),
    }
}

/// The most frequent side effects across all matching reviews.
pub fn frequency_table(rec: &Recommendation, mode: IncidenceMode) -> Table {
    let label = match mode {
        IncidenceMode::Count => "Reviews",
        IncidenceMode::Percentage => "Share",
    };

    Table {
        headers: vec!["Side Effect".to_string(), label.to_string()],
        rows: rec
            .side_effects
            .iter()
            .map(|se| {
                let value = match mode {
                    IncidenceMode::Count => se.count.to_string(),
                    IncidenceMode::Percentage => percent(se.percentage),
                };
                vec![se.name.to_string(), value]
            })
            .collect(),
    }
}

/// One row per ranked drug, one column per reported side effect.
pub fn incidence_table(rec: &Recommendation) -> Table {
    let headers = std::iter::once("Drug".to_string())
        .chain(rec.incidence.side_effects.iter().map(|s| s.to_string()))
        .collect();

    let rows = rec
        .incidence
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.drug.to_string())
                .chain(row.cells.iter().map(|c| percent(c.percentage)))
                .collect()
        })
        .collect();

    Table { headers, rows }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pipeline::{recommend, PipelineOptions};
    use crate::store::{test::sample_store, LoadOptions, RecordStore};

    #[test]
    fn star_formatting() {
        assert_eq!(stars(Some(3.7)), "⭐⭐⭐(3.7)");
        assert_eq!(stars(Some(3.7)).matches(STAR).count(), 3);
        assert_eq!(stars(Some(4.0)), "⭐⭐⭐⭐(4.0)");
        assert_eq!(stars(Some(0.4)), "(0.4)");
        assert_eq!(stars(Some(-0.5)), "(-0.5)");
        assert_eq!(stars(None), "-");
    }

    #[test]
    fn huge_values_are_capped() {
        let rendered = stars(Some(1e300));
        assert_eq!(rendered.matches(STAR).count(), MAX_STARS);
        assert!(rendered.ends_with(")"));

        assert_eq!(stars(Some(12.0)).matches(STAR).count(), MAX_STARS);
    }

    #[test]
    fn huge_score_renders_in_drug_table() {
        let data = "Condition,Age,Sex,Drug,sentiment_score,Effectiveness,Satisfaction,rash\n\
                    A,Y,M,X,1e300,4,5,1\n";
        let store = RecordStore::from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();
        let query = store.query("A", "Y", "M").unwrap();
        let rec = recommend(&store, &query, &PipelineOptions::default());

        let table = drug_table(&rec);
        assert_eq!(table.rows[0][1].matches(STAR).count(), MAX_STARS);
        assert_eq!(table.rows[0][2], "⭐⭐⭐⭐(4.0)");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(percent(200.0 / 3.0), "66.7%");
        assert_eq!(percent(0.0), "0.0%");
    }

    #[test]
    fn tables_from_recommendation() {
        let store = sample_store();
        let query = store.query("A", "Y", "M").unwrap();
        let rec = recommend(&store, &query, &PipelineOptions::default());

        let drugs = drug_table(&rec);
        assert_eq!(drugs.rows[0][0], "Z");
        assert_eq!(drugs.rows[1][1], "⭐⭐⭐(3.0)");
        assert_eq!(drugs.rows[1][3], "⭐⭐⭐⭐(4.0)");

        let incidence = incidence_table(&rec);
        assert_eq!(incidence.headers, vec!["Drug", "se1", "se2"]);
        assert_eq!(incidence.rows[0], vec!["Z", "100.0%", "100.0%"]);
        assert_eq!(incidence.rows[1], vec!["X", "50.0%", "50.0%"]);

        let frequencies = frequency_table(&rec, IncidenceMode::Percentage);
        assert_eq!(frequencies.rows[0], vec!["se1", "66.7%"]);
        let counts = frequency_table(&rec, IncidenceMode::Count);
        assert_eq!(counts.rows[1], vec!["se2", "2"]);
    }

    #[test]
    fn empty_recommendation_tables() {
        let rec = Recommendation::default();
        assert!(drug_table(&rec).rows.is_empty());

        let incidence = incidence_table(&rec);
        assert_eq!(incidence.headers, vec!["Drug"]);
        assert!(incidence.rows.is_empty());
    }

    #[test]
    fn text_and_csv_output() {
        let table = Table {
            headers: vec!["Drug".into(), "Score".into()],
            rows: vec![vec!["Aspirin".into(), "1".into()]],
        };

        let mut text = Vec::new();
        table.write_text(&mut text).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "Drug     Score\nAspirin  1\n");

        let mut csv = Vec::new();
        table.write_csv(&mut csv).unwrap();
        assert_eq!(String::from_utf8(csv).unwrap(), "Drug,Score\nAspirin,1\n");
    }
}
