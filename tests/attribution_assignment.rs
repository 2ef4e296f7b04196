#[path = "../src/test_support.rs"]
mod test_support;

use terralabel::{AssignmentMode, AttributionConfig, MemorySink, Terralabel};
use test_support::{default_catalog, generate_feed};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn attribution_writes_reference_codes() -> anyhow::Result<()> {
    init_logging();
    let generated = generate_feed(1_200, 0.2, 0.4, 41);
    let config = AttributionConfig {
        mode: AssignmentMode::DominantWithOcean,
        workers: 3,
        ..Default::default()
    };
    let terralabel = Terralabel::new(config, default_catalog())?;

    let mut sink = MemorySink::new(generated.features.iter().copied());
    let report = terralabel.attribute(generated.feed, &mut sink)?;

    assert_eq!(report.assignment.processed, generated.features.len());
    assert_eq!(report.assignment.updated, report.labels.len());
    assert_eq!(report.assignment.unmatched, 0);
    assert_eq!(sink.attributed_count(), report.labels.len());

    for (feature, label) in &report.labels {
        let attribution = sink.get(*feature).expect("labeled feature was written");
        assert_eq!(&attribution.region, label);
        match terralabel.catalog().country(label) {
            Some(info) => {
                assert_eq!(attribution.secondary_code, info.genc3);
                assert_eq!(attribution.area_code, info.aor);
            }
            None => {
                let ocean = terralabel.catalog().ocean(label).expect("known ocean");
                assert_eq!(attribution.secondary_code, "N/A");
                assert_eq!(attribution.area_code, ocean.aor);
            }
        }
    }
    Ok(())
}

#[test]
fn border_labels_have_no_reference_codes() -> anyhow::Result<()> {
    init_logging();
    let generated = generate_feed(600, 0.7, 0.0, 13);
    let config = AttributionConfig {
        mode: AssignmentMode::Border,
        ..Default::default()
    };
    let terralabel = Terralabel::new(config, default_catalog())?;

    let mut sink = MemorySink::new(generated.features.iter().copied());
    let report = terralabel.attribute(generated.feed, &mut sink)?;

    let borders = report
        .labels
        .values()
        .filter(|label| label.ends_with(" Border"))
        .count();
    assert!(borders > 0);
    assert_eq!(report.assignment.unmatched, borders);

    for (feature, label) in report.labels.iter().filter(|(_, l)| l.ends_with(" Border")) {
        let attribution = sink.get(*feature).expect("border feature was written");
        assert_eq!(&attribution.region, label);
        assert_eq!(attribution.secondary_code, "N/A");
        assert_eq!(attribution.area_code, "N/A");
        assert!(label.is_ascii());
    }
    Ok(())
}
