use anyhow::{anyhow, bail, Context, Result};
use crossbeam::thread;
use std::path::Path;

use crate::config::TutorConfig;
use crate::io::input::read_recording;
use crate::io::load_vessel_model;
use crate::io::output::{write_metrics_to_csv, write_path_to_csv, write_report_json};
use crate::session::metrics::MetricsReport;
use crate::session::{format_elapsed, TutorSession};

/// Replays a recorded procedure against a vessel model and returns the
/// report the live host would have produced.
///
/// Model and recording load on parallel threads; the session itself is
/// driven strictly in recording order.
pub fn run_replay(
    model_dir: &str,
    recording_path: &str,
    config: TutorConfig,
    output_dir: Option<&str>,
) -> Result<MetricsReport> {
    config.validate()?;

    let loaded = thread::scope(|s| -> Result<_> {
        let model_handle = s.spawn(|_| {
            load_vessel_model(model_dir, &config)
                .with_context(|| format!("load_vessel_model({}) failed", model_dir))
        });
        let recording_handle = s.spawn(|_| {
            read_recording(recording_path)
                .with_context(|| format!("read_recording({}) failed", recording_path))
        });

        let model = model_handle.join().unwrap()?;
        let ticks = recording_handle.join().unwrap()?;
        Ok((model, ticks))
    })
    .map_err(|panic_payload| anyhow!("Loading threads panicked: {:?}", panic_payload))?;
    let (model, ticks) = loaded?;

    if ticks.is_empty() {
        bail!(
            "recording {} was empty — this data is required",
            recording_path
        );
    }

    let mut session = TutorSession::new(model, config);
    let start = ticks[0].t;
    let stop = ticks[ticks.len() - 1].t;
    session.start_session(start);
    for tick in &ticks {
        session.on_transform_update(&tick.tool_state(), tick.t);
    }
    let report = session.stop_session(stop);

    if let Some(dir) = output_dir {
        let base = Path::new(dir);
        std::fs::create_dir_all(base)
            .with_context(|| format!("failed to create output dir {}", dir))?;
        let elapsed = session.elapsed_seconds(stop).map(format_elapsed);
        write_metrics_to_csv(base.join("metrics.csv"), &report, None, elapsed.as_deref())?;
        write_path_to_csv(base.join("path.csv"), &report)?;
        write_report_json(base.join("metrics.json"), &report)?;
        println!("Replay metrics written to {}", dir);
    }

    Ok(report)
}
