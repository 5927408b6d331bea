use crate::aggregate::{ProgramSummary, TierSummary, TierTransitions};
use crate::io::output::OutputWriter;
use crate::report::{HorizonReport, ProjectionReport};
use crate::risk::{PatientProjection, ProjectionResult, RiskTier, RoiCategory};
use colored::*;
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Human-readable report with colored tiers and ROI
pub struct TerminalWriter<W: Write> {
    writer: W,
    top_patients: usize,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            top_patients: 10,
        }
    }

    /// Number of highest-benefit patients listed (default 10)
    pub fn with_top_patients(mut self, top_patients: usize) -> Self {
        self.top_patients = top_patients;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", RULE.cyan())?;
        writeln!(self.writer, "  {}", title.bold().cyan())?;
        writeln!(self.writer, "{}", RULE.cyan())?;
        Ok(())
    }

    fn write_horizon(&mut self, section: &HorizonReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {}",
            section.horizon.to_string().bold(),
            format!("({})", section.label).dimmed()
        )?;
        writeln!(self.writer, "{THIN_RULE}")?;
        self.write_program_line(&section.summary)?;

        let distribution: Vec<String> = section
            .distribution
            .tiers
            .iter()
            .map(|t| format!("{} {} ({:.1}%)", t.tier.short_label(), t.count, t.percent))
            .collect();
        writeln!(self.writer, "Distribution: {}", distribution.join("  "))?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{:<15} {:>8} {:>14} {:>14} {:>14} {:>9} {:>9}",
            "Tier", "Patients", "Intervention", "Savings", "Net benefit", "ROI", "Median"
        )?;
        for tier in &section.summary.tiers {
            self.write_tier_row(tier)?;
        }
        Ok(())
    }

    fn write_program_line(&mut self, summary: &ProgramSummary) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Patients: {}  Intervened: {}  Cost: {}  Savings: {}  Net: {}  ROI: {}",
            summary.patient_count,
            summary.intervened_count,
            money(summary.total_intervention_cost),
            money(summary.total_expected_savings),
            colored_money(summary.total_net_benefit),
            colored_roi(summary.overall_roi_percent)
        )?;
        Ok(())
    }

    fn write_tier_row(&mut self, tier: &TierSummary) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{:<15} {:>8} {:>14} {:>14} {:>14} {:>9} {:>9}",
            tier_label(tier.tier),
            tier.patient_count,
            money(tier.total_intervention_cost),
            money(tier.total_expected_savings),
            money(tier.total_net_benefit),
            format!("{:.1}%", tier.roi_percent),
            format!("{:.1}%", tier.median_patient_roi)
        )?;
        Ok(())
    }

    fn write_transitions(&mut self, transitions: &TierTransitions) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {} -> {}: {} compared, {} escalated, {} unchanged, {} de-escalated",
            "Transitions".bold(),
            transitions.from,
            transitions.to,
            transitions.patients_compared,
            transitions.escalated.to_string().red(),
            transitions.unchanged,
            transitions.de_escalated.to_string().green()
        )?;
        for (from, to, count) in transitions.moves() {
            if from != to {
                writeln!(
                    self.writer,
                    "  {} -> {}: {}",
                    from.short_label(),
                    to.short_label(),
                    count
                )?;
            }
        }
        Ok(())
    }

    fn write_projection_row(&mut self, result: &ProjectionResult) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "  {:<12} {:>7} {:<15} score {:.3}  cost {:>10}  net {:>10}  ROI {} ({})",
            result.patient_id.to_string(),
            result.horizon_days.to_string(),
            tier_label(result.tier),
            result.risk_score,
            money(result.intervention_cost),
            money(result.net_benefit),
            colored_roi(result.roi_percent),
            category_label(result.roi_category)
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ProjectionReport) -> anyhow::Result<()> {
        self.write_header("CARE PROGRAM ROI PROJECTION")?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        for section in &report.horizons {
            self.write_horizon(section)?;
        }
        for transitions in &report.transitions {
            self.write_transitions(transitions)?;
        }

        let top = report.top_patients(self.top_patients);
        if !top.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Highest net benefit".bold())?;
            for result in top {
                self.write_projection_row(result)?;
            }
        }

        if !report.rejected.is_empty() {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "{}",
                format!("{} records skipped", report.rejected.len()).yellow()
            )?;
            for row in &report.rejected {
                writeln!(self.writer, "  record {}: {}", row.record, row.reason)?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_patient(&mut self, projection: &PatientProjection) -> anyhow::Result<()> {
        self.write_header(&format!("PATIENT {}", projection.patient_id))?;
        writeln!(
            self.writer,
            "Annual cost: {}",
            money(projection.annual_cost)
        )?;
        writeln!(self.writer)?;

        for result in &projection.projections {
            self.write_projection_row(result)?;
            writeln!(
                self.writer,
                "    {}",
                result.tier.recommendation().dimmed()
            )?;
        }

        writeln!(self.writer, "{THIN_RULE}")?;
        writeln!(
            self.writer,
            "Total cost: {}  Savings: {}  Net: {}  Overall ROI: {}",
            money(projection.total_intervention_cost),
            money(projection.total_expected_savings),
            colored_money(projection.total_net_benefit),
            colored_roi(projection.overall_roi_percent)
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn colored_money(amount: f64) -> ColoredString {
    if amount >= 0.0 {
        money(amount).green()
    } else {
        money(amount).red()
    }
}

fn colored_roi(roi: f64) -> ColoredString {
    let text = format!("{roi:.1}%");
    match RoiCategory::from_roi(roi) {
        RoiCategory::Excellent | RoiCategory::Strong => text.green().bold(),
        RoiCategory::Positive => text.yellow(),
        RoiCategory::NoRoi => text.red(),
    }
}

fn category_label(category: RoiCategory) -> ColoredString {
    match category {
        RoiCategory::NoRoi => category.label().dimmed(),
        _ => category.label().normal(),
    }
}

fn tier_label(tier: RiskTier) -> ColoredString {
    let label = tier.label();
    match tier {
        RiskTier::Critical => label.red().bold(),
        RiskTier::High => label.red(),
        RiskTier::Moderate => label.yellow(),
        RiskTier::Low => label.normal(),
        RiskTier::Normal => label.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::{ProjectionEngine, ScoredPatient};

    #[test]
    fn test_report_mentions_every_section() {
        let config = EngineConfig::default();
        let patients = vec![
            ScoredPatient::new(1u64, 30, 0.8, 50_000.0),
            ScoredPatient::new(1u64, 60, 0.4, 50_000.0),
            ScoredPatient::new(2u64, 30, 1.3, 5_000.0),
        ];
        let outcome = ProjectionEngine::new(&config).project_lenient(&patients);
        let report = ProjectionReport::build(&config, outcome);

        let mut writer = TerminalWriter::new(Vec::new());
        writer.write_report(&report).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.contains("CARE PROGRAM ROI PROJECTION"));
        assert!(text.contains("Month 1 (0-30 days)"));
        assert!(text.contains("Critical Risk"));
        assert!(text.contains("Transitions"));
        assert!(text.contains("records skipped"));
        assert!(text.contains("record 3"));
    }

    #[test]
    fn test_money_format() {
        assert_eq!(money(1234.5), "$1234.50");
        assert_eq!(money(-3.0), "$-3.00");
    }
}
