use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use boid_core::Flock;
use boid_shared::FrameSnapshot;

use crate::TargetPath;

/// Totals reported when a run finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames_written: u64,
    pub mean_speed: f32,
    pub elapsed: Duration,
}

/// Drives a [`Flock`] along a scripted pointer path, optionally writing
/// JSON-lines frame snapshots and pacing ticks to a frame rate.
pub struct Runner {
    flock: Flock,
    path: TargetPath,
    sink: Option<Box<dyn Write>>,
    emit_every: u64,
    log_every: u64,
    frame_interval: Option<Duration>,
    frames_written: u64,
}

impl Runner {
    pub fn new(flock: Flock, path: TargetPath) -> Self {
        Self {
            flock,
            path,
            sink: None,
            emit_every: 1,
            log_every: 0,
            frame_interval: None,
            frames_written: 0,
        }
    }

    /// Writes a snapshot after every `emit_every`-th tick (0 is treated as 1).
    pub fn with_output(mut self, sink: Box<dyn Write>, emit_every: u64) -> Self {
        self.sink = Some(sink);
        self.emit_every = emit_every.max(1);
        self
    }

    /// Logs progress every `log_every` ticks; 0 disables it.
    pub fn with_progress(mut self, log_every: u64) -> Self {
        self.log_every = log_every;
        self
    }

    /// Sleeps so that ticks run no faster than `fps` per second.
    pub fn paced(mut self, fps: u32) -> Self {
        self.frame_interval = (fps > 0).then(|| Duration::from_secs(1) / fps);
        self
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    /// Moves the pointer along the path and advances the flock by one tick.
    pub fn tick(&mut self) -> Result<()> {
        let config = *self.flock.config();
        let target = self
            .path
            .position(self.flock.ticks(), config.width, config.height);
        self.flock.set_target(target);
        self.flock.step();

        let tick = self.flock.ticks();
        if self.log_every > 0 && tick % self.log_every == 0 {
            log::info!(
                "tick {}: target ({}, {}), mean speed {:.3}",
                tick,
                target.x,
                target.y,
                self.flock.mean_speed()
            );
        }

        if tick % self.emit_every == 0 {
            if let Some(sink) = self.sink.as_mut() {
                let frame = FrameSnapshot::capture(tick, target, self.flock.agents());
                let line = frame.to_json_line().context("Failed to encode frame")?;
                writeln!(sink, "{}", line).context("Failed to write frame")?;
                self.frames_written += 1;
            }
        }

        Ok(())
    }

    /// Runs `ticks` ticks and flushes the output. `0` runs without a tick
    /// limit.
    pub fn run(&mut self, ticks: u64) -> Result<RunSummary> {
        self.run_until(ticks, |_| false)
    }

    /// Like [`Runner::run`], but also stops once `stop` returns true for the
    /// flock after a tick.
    pub fn run_until<F>(&mut self, ticks: u64, mut stop: F) -> Result<RunSummary>
    where
        F: FnMut(&Flock) -> bool,
    {
        let limit = if ticks == 0 { u64::MAX } else { ticks };
        if ticks == 0 {
            log::info!(
                "Running until stopped with {} agents",
                self.flock.agents().len()
            );
        } else {
            log::info!(
                "Running {} ticks with {} agents",
                ticks,
                self.flock.agents().len()
            );
        }
        let started = Instant::now();

        for _ in 0..limit {
            let frame_start = Instant::now();
            self.tick()?;

            if let Some(interval) = self.frame_interval {
                let spent = frame_start.elapsed();
                if spent < interval {
                    thread::sleep(interval - spent);
                }
            }

            if stop(&self.flock) {
                break;
            }
        }

        if let Some(sink) = self.sink.as_mut() {
            sink.flush().context("Failed to flush output")?;
        }

        Ok(RunSummary {
            ticks: self.flock.ticks(),
            frames_written: self.frames_written,
            mean_speed: self.flock.mean_speed(),
            elapsed: started.elapsed(),
        })
    }
}
