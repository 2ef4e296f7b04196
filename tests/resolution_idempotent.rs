#[path = "../src/test_support.rs"]
mod test_support;

use terralabel::{AssignmentMode, AttributionConfig, ResolutionDriver};
use test_support::generate_feed;

#[test]
fn resolution_is_idempotent() -> anyhow::Result<()> {
    let generated = generate_feed(2_000, 0.4, 0.3, 7);
    let driver = ResolutionDriver::new(&AttributionConfig::default())?;

    for mode in [
        AssignmentMode::Dominant,
        AssignmentMode::DominantWithOcean,
        AssignmentMode::Border,
    ] {
        let first = driver.run(generated.feed.clone(), mode)?;
        let second = driver.run(generated.feed.clone(), mode)?;
        assert_eq!(first, second, "mode {mode} is not deterministic");
    }

    Ok(())
}

#[test]
fn parallel_border_matches_sequential() -> anyhow::Result<()> {
    let generated = generate_feed(1_500, 0.6, 0.0, 11);

    let sequential = ResolutionDriver::new(&AttributionConfig {
        workers: 4,
        ..Default::default()
    })?;
    let parallel = ResolutionDriver::new(&AttributionConfig {
        workers: 4,
        parallel_border: true,
        ..Default::default()
    })?;

    let left = sequential.run(generated.feed.clone(), AssignmentMode::Border)?;
    let right = parallel.run(generated.feed, AssignmentMode::Border)?;
    assert_eq!(left, right);

    Ok(())
}

#[test]
fn worker_count_does_not_change_labels() -> anyhow::Result<()> {
    let generated = generate_feed(1_000, 0.5, 0.5, 23);

    let mut outputs = Vec::new();
    for workers in [1, 2, 3, 8] {
        let driver = ResolutionDriver::new(&AttributionConfig {
            workers,
            ..Default::default()
        })?;
        outputs.push(driver.run(generated.feed.clone(), AssignmentMode::DominantWithOcean)?);
    }

    for output in &outputs[1..] {
        assert_eq!(output, &outputs[0]);
    }
    Ok(())
}
