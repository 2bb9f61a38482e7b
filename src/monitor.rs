//! src/monitor.rs
use crate::{
    configuration::MonitorSettings,
    registry::{WorkerProgress, WorkerRegistry},
};
use indicatif::{
    MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle, style::TemplateError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const IDLE_MESSAGE: &str = "Waiting for chunk workers to start.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Every worker reported 100%.
    Completed { polls: u32 },
    /// Every worker finished, at least one below 100%.
    Stopped { polls: u32 },
    /// No worker was registered within the idle budget.
    GaveUp { idle_polls: u32 },
}

/// `width` cells: filled up to `percent`, one `>` marker, then blanks.
pub fn render_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    (0..width)
        .map(|i| match i.cmp(&filled) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => '>',
            std::cmp::Ordering::Greater => ' ',
        })
        .collect()
}

pub fn render_line(progress: &WorkerProgress, width: usize) -> String {
    format!(
        "(Thread {})[{}]   {}%",
        progress.index,
        render_bar(progress.percentage, width),
        progress.percentage
    )
}

/// One `indicatif` bar per worker, each showing its rendered line. The
/// multi-bar owns cursor movement, so later frames overwrite earlier ones.
pub struct BarDisplay {
    multi: MultiProgress,
    style: ProgressStyle,
    bars: Vec<ProgressBar>,
}

impl BarDisplay {
    pub fn new(target: ProgressDrawTarget) -> Result<Self, TemplateError> {
        Ok(Self {
            multi: MultiProgress::with_draw_target(target),
            style: ProgressStyle::with_template("{msg}")?,
            bars: Vec::new(),
        })
    }

    pub fn stdout() -> Result<Self, TemplateError> {
        Self::new(ProgressDrawTarget::stdout())
    }

    /// Tracks state without drawing anything.
    pub fn hidden() -> Result<Self, TemplateError> {
        Self::new(ProgressDrawTarget::hidden())
    }

    /// Prints `message` above the bars.
    pub fn waiting(&mut self, message: &str) {
        if let Err(e) = self.multi.println(message) {
            tracing::debug!(error = %e, "Failed to print progress message");
        }
    }

    pub fn draw(&mut self, snapshot: &[WorkerProgress], width: usize) {
        while self.bars.len() < snapshot.len() {
            let bar = ProgressBar::new(100).with_style(self.style.clone());
            self.bars.push(self.multi.add(bar));
        }
        for (bar, progress) in self.bars.iter().zip(snapshot) {
            bar.set_position(u64::from(progress.percentage));
            bar.set_message(render_line(progress, width));
        }
    }

    /// Leaves the last frame on screen.
    pub fn finish(&mut self) {
        for bar in &self.bars {
            bar.abandon();
        }
    }

    /// The line currently shown by each bar, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        self.bars.iter().map(ProgressBar::message).collect()
    }
}

/// Runs `paint` on the blocking pool; terminal writes may stall and must not
/// hold a runtime worker. Returns `None` if the display was lost.
async fn paint<F>(display: BarDisplay, f: F) -> Option<BarDisplay>
where
    F: FnOnce(&mut BarDisplay) + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let mut display = display;
        f(&mut display);
        display
    });
    match task.await {
        Ok(display) => Some(display),
        Err(e) => {
            tracing::debug!(error = %e, "Progress display failed, drawing stops");
            None
        }
    }
}

/// Samples the registry on a fixed tick and redraws one bar per worker.
/// It only observes; the coordinator never waits on it to join workers.
pub struct ProgressMonitor {
    registry: Arc<WorkerRegistry>,
    display: Option<BarDisplay>,
    poll_interval: Duration,
    max_idle_polls: u32,
    bar_width: usize,
}

impl ProgressMonitor {
    pub fn new(
        registry: Arc<WorkerRegistry>,
        display: BarDisplay,
        settings: &MonitorSettings,
    ) -> Self {
        Self {
            registry,
            display: Some(display),
            poll_interval: settings.poll_interval(),
            max_idle_polls: settings.max_idle_polls,
            bar_width: settings.bar_width,
        }
    }

    /// Polls until all workers are done or nobody shows up. The display is
    /// handed back so callers can inspect the last frame.
    pub async fn run(mut self) -> (MonitorOutcome, Option<BarDisplay>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut idle_polls = 0u32;
        let mut polls = 0u32;
        let outcome = loop {
            ticker.tick().await;
            polls += 1;

            let snapshot = self.registry.snapshot();
            if snapshot.is_empty() {
                self.show(|display| display.waiting(IDLE_MESSAGE)).await;
                idle_polls += 1;
                if idle_polls >= self.max_idle_polls {
                    tracing::warn!(idle_polls, "No chunk worker registered, progress display gives up");
                    break MonitorOutcome::GaveUp { idle_polls };
                }
                continue;
            }

            let width = self.bar_width;
            let frame = snapshot.clone();
            self.show(move |display| display.draw(&frame, width)).await;

            if snapshot.len() < self.registry.capacity() {
                continue;
            }
            if snapshot.iter().all(|p| p.percentage == 100) {
                break MonitorOutcome::Completed { polls };
            }
            if snapshot.iter().all(|p| p.finished) {
                break MonitorOutcome::Stopped { polls };
            }
        };

        self.show(BarDisplay::finish).await;
        tracing::debug!(?outcome, "Progress monitor done");
        (outcome, self.display)
    }

    async fn show<F>(&mut self, f: F)
    where
        F: FnOnce(&mut BarDisplay) + Send + 'static,
    {
        if let Some(display) = self.display.take() {
            self.display = paint(display, f).await;
        }
    }
}
