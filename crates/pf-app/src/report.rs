//! Analysis report assembly and plain-text rendering.

use pf_analysis::{
    AnalysisConfig, Analyzer, ImpedanceTable, PhaseEstimator, PhasorSet, PowerSummary,
    PowerTotals, RmsLineTable, RmsSummary,
};
use pf_core::{Node, Phase, PhaseValues};
use pf_signals::SignalSet;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSummary {
    pub frequency_hz: f64,
    pub samples_per_cycle: usize,
    pub samples: usize,
    pub sample_period_s: f64,
}

/// Line RMS of the reconstructed bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node4Summary {
    /// RMS of |V4| per phase.
    pub voltage: PhaseValues,
    /// RMS of I4 per phase.
    pub current: PhaseValues,
}

/// Every table of one analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// RFC 3339 generation time.
    pub generated_at: String,
    /// Where the signals came from (file path or "demo").
    pub source: String,
    pub estimator: PhaseEstimator,
    pub sampling: SamplingSummary,
    pub rms_lines: RmsLineTable,
    pub rms_phase: RmsSummary,
    pub node4: Node4Summary,
    pub power: PowerSummary,
    /// Absent when some phase carries no current.
    pub impedance: Option<ImpedanceTable>,
    pub voltage_phasors: PhasorSet,
    pub current_phasors: PhasorSet,
}

/// Run every analysis over `signals` and collect the results.
pub fn build_report(
    signals: &SignalSet,
    config: AnalysisConfig,
    source: &str,
) -> AppResult<AnalysisReport> {
    let analyzer = Analyzer::with_config(signals, config)?;
    let estimator = analyzer.phase_estimator();
    let sampling = signals.sampling();

    let impedance = match analyzer.impedance_per_phase() {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::warn!(error = %e, "impedance table omitted");
            None
        }
    };

    let report = AnalysisReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.to_string(),
        estimator,
        sampling: SamplingSummary {
            frequency_hz: sampling.frequency_hz(),
            samples_per_cycle: sampling.samples_per_cycle,
            samples: signals.samples(),
            sample_period_s: sampling.dt_s(),
        },
        rms_lines: analyzer.rms_line_table()?,
        rms_phase: analyzer.rms_summary_table()?,
        node4: Node4Summary {
            voltage: analyzer.rms_voltage(Node::N4)?,
            current: analyzer.rms_current(Node::N4)?,
        },
        power: analyzer.power_summary_table()?,
        impedance,
        voltage_phasors: analyzer.voltage_phasors(estimator)?,
        current_phasors: analyzer.current_phasors(estimator)?,
    };
    tracing::info!(source, estimator = estimator.label(), "analysis report built");
    Ok(report)
}

fn fmt_phases(values: &PhaseValues) -> String {
    values
        .iter()
        .map(|(_, v)| format!("{:>12.4}", v))
        .collect::<Vec<_>>()
        .join("")
}

fn fmt_pf(pf: Option<f64>) -> String {
    pf.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

fn fmt_totals(label: &str, t: &PowerTotals) -> String {
    format!(
        "  {:<8} P={:.4} W  Q={:.4} var  S={:.4} VA  PF={}\n",
        label,
        t.active,
        t.reactive,
        t.apparent,
        fmt_pf(t.power_factor)
    )
}

/// Human-readable rendering of a report.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let header = format!("{:<8}{:>12}{:>12}{:>12}", "", "A", "B", "C");

    out.push_str(&format!("Power analysis: {}\n", report.source));
    out.push_str(&format!("Generated: {}\n", report.generated_at));
    out.push_str(&format!(
        "Sampling: {} Hz, {} samples/cycle, {} samples (estimator: {})\n",
        report.sampling.frequency_hz,
        report.sampling.samples_per_cycle,
        report.sampling.samples,
        report.estimator.label()
    ));

    out.push_str("\nLine RMS voltage [V]\n");
    out.push_str(&format!("  {}\n", header));
    for row in &report.rms_lines.rows {
        out.push_str(&format!("  {:<8}{}\n", row.node, fmt_phases(&row.voltage)));
    }
    out.push_str(&format!("  {:<8}{}\n", Node::N4, fmt_phases(&report.node4.voltage)));

    out.push_str("\nLine RMS current [A]\n");
    out.push_str(&format!("  {}\n", header));
    for row in &report.rms_lines.rows {
        out.push_str(&format!("  {:<8}{}\n", row.node, fmt_phases(&row.current)));
    }
    out.push_str(&format!("  {:<8}{}\n", Node::N4, fmt_phases(&report.node4.current)));

    out.push_str("\nRMS summary, nodes 1-3 line / sqrt 3, node 4 line [V | A]\n");
    for node in Node::ALL {
        out.push_str(&format!(
            "  {:<8}{} |{}\n",
            node,
            fmt_phases(report.rms_phase.voltage(node)),
            fmt_phases(report.rms_phase.current(node))
        ));
    }

    out.push_str("\nPower\n");
    for np in &report.power.nodes {
        for phase in Phase::ALL {
            out.push_str(&format!(
                "  {} phase {}  P={:.4} W  Q={:.4} var  S={:.4} VA  PF={}\n",
                np.node,
                phase,
                np.active[phase],
                np.reactive[phase],
                np.apparent[phase],
                fmt_pf(np.power_factor(phase))
            ));
        }
        out.push_str(&fmt_totals(&np.node.to_string(), &np.total));
    }
    out.push_str(&fmt_totals("system", &report.power.total));

    out.push_str("\nImpedance [ohm, deg]\n");
    match &report.impedance {
        Some(table) => {
            for node in Node::MEASURED {
                for phase in Phase::ALL {
                    if let Some(z) = table.get(node, phase) {
                        out.push_str(&format!(
                            "  {} phase {}  |Z|={:.4}  angle={:.2}\n",
                            node, phase, z.magnitude_ohm, z.angle_deg
                        ));
                    }
                }
            }
        }
        None => out.push_str("  unavailable (zero phase current)\n"),
    }

    for set in [&report.voltage_phasors, &report.current_phasors] {
        out.push_str(&format!("\n{:?} phasors [peak, deg]\n", set.quantity));
        for node in Node::ALL {
            let cells: Vec<String> = Phase::ALL
                .iter()
                .map(|&p| {
                    let ph = set.get(node, p);
                    format!("{:>10.3} @ {:>8.2}", ph.magnitude, ph.angle_deg)
                })
                .collect();
            out.push_str(&format!("  {:<8}{}\n", node, cells.join("  ")));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_signals::SampleConfig;
    use pf_signals::synth::demo_set;

    #[test]
    fn report_collects_every_table() {
        let set = demo_set(SampleConfig::default(), 2, 30.0).unwrap();
        let report = build_report(&set, AnalysisConfig::default(), "demo").unwrap();

        assert_eq!(report.source, "demo");
        assert_eq!(report.estimator, PhaseEstimator::PeakOffset);
        assert_eq!(report.sampling.samples, 200);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
        assert!(report.impedance.is_some());
        assert_eq!(report.power.nodes[0].node, Node::N1);
    }

    #[test]
    fn text_mentions_every_section() {
        let set = demo_set(SampleConfig::default(), 1, 0.0).unwrap();
        let config = AnalysisConfig::with_estimator(PhaseEstimator::Fundamental);
        let report = build_report(&set, config, "unit").unwrap();
        let text = render_text(&report);

        for needle in [
            "Power analysis: unit",
            "estimator: fundamental",
            "Line RMS voltage",
            "RMS summary",
            "system",
            "Impedance",
            "Voltage phasors",
            "Current phasors",
            "node 4",
        ] {
            assert!(text.contains(needle), "missing {needle:?}");
        }
    }
}
