use crate::io::output::OutputWriter;
use crate::report::ProjectionReport;
use crate::risk::{PatientProjection, ProjectionResult, RoiCategory};
use serde::Serialize;
use std::io::Write;

/// One flat row per patient and horizon
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    patient_id: String,
    horizon_days: u32,
    tier: u8,
    tier_label: &'a str,
    risk_score: f64,
    annual_cost: f64,
    projected_cost: f64,
    addressable_cost: f64,
    intervention_cost: f64,
    success_rate: f64,
    expected_savings: f64,
    net_benefit: f64,
    raw_roi_percent: Option<f64>,
    roi_percent: f64,
    roi_category: RoiCategory,
}

impl<'a> From<&'a ProjectionResult> for CsvRow<'a> {
    fn from(result: &'a ProjectionResult) -> Self {
        Self {
            patient_id: result.patient_id.to_string(),
            horizon_days: result.horizon_days.days(),
            tier: result.tier.number(),
            tier_label: result.tier.label(),
            risk_score: result.risk_score,
            annual_cost: result.annual_cost,
            projected_cost: result.projected_cost,
            addressable_cost: result.addressable_cost,
            intervention_cost: result.intervention_cost,
            success_rate: result.success_rate,
            expected_savings: result.expected_savings,
            net_benefit: result.net_benefit,
            raw_roi_percent: result.raw_roi_percent,
            roi_percent: result.roi_percent,
            roi_category: result.roi_category,
        }
    }
}

pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_rows<'r>(
        &mut self,
        results: impl IntoIterator<Item = &'r ProjectionResult>,
    ) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(&mut self.writer);
        for result in results {
            csv.serialize(CsvRow::from(result))?;
        }
        csv.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_report(&mut self, report: &ProjectionReport) -> anyhow::Result<()> {
        self.write_rows(&report.patients)
    }

    fn write_patient(&mut self, projection: &PatientProjection) -> anyhow::Result<()> {
        self.write_rows(&projection.projections)
    }
}
