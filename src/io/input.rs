//! Scored-patient CSV input.
//!
//! Expected header: `patient_id,horizon_days,risk_score,annual_cost`.

use crate::engine::ScoredPatient;
use crate::errors::{Error, Result};
use crate::risk::PatientId;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ScoredRow {
    patient_id: String,
    horizon_days: u32,
    risk_score: f64,
    annual_cost: f64,
}

impl From<ScoredRow> for ScoredPatient {
    fn from(row: ScoredRow) -> Self {
        ScoredPatient {
            patient_id: PatientId::parse(&row.patient_id),
            horizon_days: row.horizon_days,
            risk_score: row.risk_score,
            annual_cost: row.annual_cost,
        }
    }
}

/// Read every row, failing on the first malformed one
pub fn read_scored_patients<R: Read>(reader: R) -> Result<Vec<ScoredPatient>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<ScoredRow>()
        .map(|row| row.map(ScoredPatient::from).map_err(Error::from))
        .collect()
}

/// Read every well-formed row; malformed rows are logged and counted
pub fn read_scored_patients_lenient<R: Read>(reader: R) -> (Vec<ScoredPatient>, usize) {
    let mut patients = Vec::new();
    let mut skipped = 0;

    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for row in csv.deserialize::<ScoredRow>() {
        match row {
            Ok(row) => patients.push(row.into()),
            Err(e) => {
                log::warn!("Skipping malformed row: {}", e);
                skipped += 1;
            }
        }
    }

    (patients, skipped)
}

pub fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::file_system("Failed to open input", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const INPUT: &str = indoc! {"
        patient_id,horizon_days,risk_score,annual_cost
        1001,30,0.82,36500
        MRN-7, 60 ,0.15,12000.50
    "};

    #[test]
    fn test_reads_numeric_and_text_ids() {
        let patients = read_scored_patients(INPUT.as_bytes()).unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].patient_id, PatientId::Numeric(1001));
        assert_eq!(patients[1].patient_id, PatientId::Text("MRN-7".into()));
        assert_eq!(patients[1].horizon_days, 60);
        assert_eq!(patients[1].annual_cost, 12_000.5);
    }

    #[test]
    fn test_malformed_row_fails_strict_read() {
        let input = "patient_id,horizon_days,risk_score,annual_cost\n1,thirty,0.5,100\n";
        assert!(matches!(
            read_scored_patients(input.as_bytes()),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_lenient_read_skips_malformed_rows() {
        let input = indoc! {"
            patient_id,horizon_days,risk_score,annual_cost
            1,30,0.5,100
            2,thirty,0.5,100
            3,90,0.7,2000
        "};
        let (patients, skipped) = read_scored_patients_lenient(input.as_bytes());
        assert_eq!(patients.len(), 2);
        assert_eq!(skipped, 1);
    }
}
