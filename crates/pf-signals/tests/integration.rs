//! Integration tests for pf-signals.

use pf_core::{Node, Phase};
use pf_signals::synth::{balanced_node, demo_set};
use pf_signals::{
    Complex, DMatrix, LineImpedances, NodeSignals, SampleConfig, SignalError, SignalSet,
    SignalSetBuilder, ThreePhaseSource,
};

fn rows(n: usize, value: f64) -> [Vec<f64>; 3] {
    [vec![value; n], vec![value; n], vec![value; n]]
}

#[test]
fn builder_assembles_three_nodes() {
    let mut builder = SignalSetBuilder::new();
    builder
        .node_rows(Node::N1, rows(8, 1.0), rows(8, 0.1))
        .node_rows(Node::N2, rows(8, 2.0), rows(8, 0.2))
        .node_rows(Node::N3, rows(8, 3.0), rows(8, 0.3));
    let set = builder.build().unwrap();

    assert_eq!(set.samples(), 8);
    assert_eq!(set.voltage(Node::N2).unwrap()[(1, 5)], 2.0);
    assert_eq!(set.current(Node::N3).unwrap()[(2, 7)], 0.3);
    assert!(set.voltage(Node::N4).is_none());
    assert_eq!(set.impedances(), &LineImpedances::default());
    assert_eq!(set.sampling(), &SampleConfig::default());
}

#[test]
fn builder_reports_missing_node() {
    let mut builder = SignalSetBuilder::new();
    builder
        .node_rows(Node::N1, rows(4, 1.0), rows(4, 1.0))
        .node_rows(Node::N3, rows(4, 1.0), rows(4, 1.0));
    assert_eq!(
        builder.build().unwrap_err(),
        SignalError::MissingNode { node: Node::N2 }
    );
}

#[test]
fn node4_cannot_be_supplied() {
    let mut builder = SignalSetBuilder::new();
    for node in Node::ALL {
        builder.node_rows(node, rows(4, 1.0), rows(4, 1.0));
    }
    assert_eq!(
        builder.build().unwrap_err(),
        SignalError::NotMeasured { node: Node::N4 }
    );
}

#[test]
fn mismatched_sample_counts_are_rejected() {
    let good = NodeSignals::new(DMatrix::zeros(3, 10), DMatrix::zeros(3, 10));
    let short = NodeSignals::new(DMatrix::zeros(3, 10), DMatrix::zeros(3, 9));
    let err = SignalSet::new(
        [good.clone(), good, short],
        LineImpedances::default(),
        SampleConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SignalError::ShapeMismatch {
            node: Node::N3,
            expected: 10,
            actual: 9,
            ..
        }
    ));
}

#[test]
fn two_phase_matrix_is_rejected() {
    let good = NodeSignals::new(DMatrix::zeros(3, 4), DMatrix::zeros(3, 4));
    let bad = NodeSignals::new(DMatrix::zeros(2, 4), DMatrix::zeros(3, 4));
    let err = SignalSet::new(
        [bad, good.clone(), good],
        LineImpedances::default(),
        SampleConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SignalError::ShapeMismatch { node: Node::N1, .. }));
}

#[test]
fn empty_waveforms_are_rejected() {
    let empty = NodeSignals::new(DMatrix::zeros(3, 0), DMatrix::zeros(3, 0));
    let err = SignalSet::new(
        [empty.clone(), empty.clone(), empty],
        LineImpedances::default(),
        SampleConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, SignalError::EmptyWaveform { node: Node::N1 });
}

#[test]
fn impedances_reject_zero_lines() {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    assert_eq!(
        LineImpedances::new(one, zero, one).unwrap_err(),
        SignalError::ZeroImpedance { line: 2 }
    );
}

#[test]
fn impedances_reject_cancelling_admittances() {
    // 1/(1+j) + 1/(1-j) + 1/(-1) = 1 - 1 = 0
    let err = LineImpedances::new(
        Complex::new(1.0, 1.0),
        Complex::new(1.0, -1.0),
        Complex::new(-1.0, 0.0),
    )
    .unwrap_err();
    assert_eq!(err, SignalError::DegenerateAdmittance);
}

#[test]
fn with_impedances_keeps_waveforms() {
    let set = demo_set(SampleConfig::default(), 1, 0.0).unwrap();
    let z = LineImpedances::resistive(1.0, 2.0, 4.0).unwrap();
    let swapped = set.clone().with_impedances(z);
    assert_eq!(swapped.impedances(), &z);
    assert_eq!(swapped.nodes(), set.nodes());
}

#[test]
fn balanced_node_rows_follow_phase_order() {
    let sampling = SampleConfig::new(50.0, 120).unwrap();
    let node = balanced_node(
        ThreePhaseSource::new(10.0, 0.0),
        ThreePhaseSource::new(1.0, 0.0),
        &sampling,
        1,
    );
    // Phase B lags by a third of a cycle: its peak sits at sample 40.
    let b: Vec<f64> = node.phase_voltage(Phase::B).collect();
    assert!((b[40] - 10.0).abs() < 1e-9);
    assert_eq!(node.voltage.ncols(), 120);
}
