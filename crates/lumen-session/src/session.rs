use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use lumen_core::pipeline::Rendered;
use lumen_core::{Adjustment, AdjustmentParameters, ControlState, Histogram, Pipeline, PixelBuffer};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::events::SessionEvent;
use crate::scheduler::{Admission, Scheduler};
use crate::stats::RunStats;

/// What happened to a request for recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A run completed and its result is now current.
    Rendered,
    /// No image is loaded; nothing to do.
    NoImage,
    /// A run was in flight and the request was discarded.
    Dropped,
    /// A run was in flight; it will run again with the latest parameters.
    Deferred,
    /// The run finished after its image was replaced, reset or closed.
    Discarded,
}

/// One open image and the adjustments applied to it.
///
/// Holds the original pixels, the control and parameter state, and the last
/// rendered result. Control changes are debounced and executed off the
/// caller's thread; results arrive as [`SessionEvent`]s. Cloning gives
/// another handle to the same session.
#[derive(Clone)]
pub struct EditorSession {
    inner: Arc<Inner>,
}

struct Inner {
    pipeline: Arc<Pipeline>,
    scheduler: Scheduler,
    runtime: Handle,
    state: Mutex<State>,
    stats: Mutex<RunStats>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

#[derive(Default)]
struct State {
    original: Option<Arc<PixelBuffer>>,
    rendered: Option<Arc<PixelBuffer>>,
    histogram: Option<Arc<Histogram>>,
    controls: ControlState,
    params: AdjustmentParameters,
    /// Bumped whenever the image or its baseline changes, so results
    /// computed against older content can be recognised and dropped.
    epoch: u64,
}

/// Everything a run needs, captured at trigger time.
struct Job {
    original: Arc<PixelBuffer>,
    params: AdjustmentParameters,
    epoch: u64,
}

impl EditorSession {
    /// Create a session on the current tokio runtime.
    pub fn new(
        config: &SessionConfig,
        pipeline: Pipeline,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>)> {
        let runtime = Handle::try_current().map_err(|err| SessionError::NoRuntime(err.to_string()))?;
        let (events, rx) = mpsc::unbounded_channel();
        let inner = Inner {
            pipeline: Arc::new(pipeline),
            scheduler: Scheduler::new(config.quiescence(), config.trigger_policy),
            runtime,
            state: Mutex::new(State::default()),
            stats: Mutex::new(RunStats::default()),
            events,
        };
        Ok((
            Self {
                inner: Arc::new(inner),
            },
            rx,
        ))
    }

    /// Replace the current image. Adjustments go back to neutral and the
    /// original is shown with its histogram.
    pub async fn load_image(&self, buffer: PixelBuffer) -> Result<()> {
        let original = Arc::new(buffer);
        let epoch = {
            let mut state = self.inner.lock_state();
            state.epoch += 1;
            state.original = Some(original.clone());
            state.rendered = Some(original.clone());
            state.histogram = None;
            state.controls = ControlState::default();
            state.params = AdjustmentParameters::default();
            state.epoch
        };
        // Pending debounced triggers belong to the previous image.
        self.inner.scheduler.touch();
        info!(
            width = original.width(),
            height = original.height(),
            "image loaded"
        );
        self.inner.emit(SessionEvent::RenderedUpdated(original.clone()));
        self.inner.publish_baseline_histogram(original, epoch).await
    }

    /// Drop the current image ("new file").
    pub fn close_image(&self) {
        {
            let mut state = self.inner.lock_state();
            *state = State {
                epoch: state.epoch + 1,
                ..State::default()
            };
        }
        self.inner.scheduler.touch();
        debug!("image closed");
        self.inner.emit(SessionEvent::ImageClosed);
    }

    /// Return every control to neutral and show the original again.
    pub async fn reset_adjustments(&self) -> Result<()> {
        let (original, epoch) = {
            let mut state = self.inner.lock_state();
            state.controls = ControlState::default();
            state.params = AdjustmentParameters::default();
            let Some(original) = state.original.clone() else {
                return Ok(());
            };
            state.epoch += 1;
            state.rendered = Some(original.clone());
            (original, state.epoch)
        };
        self.inner.scheduler.touch();
        debug!("adjustments reset");
        self.inner.emit(SessionEvent::RenderedUpdated(original.clone()));
        self.inner.publish_baseline_histogram(original, epoch).await
    }

    /// Move a control by name. Returns the stored (clamped) control value.
    pub fn set_control_value(&self, name: &str, value: i32) -> Result<u8> {
        let adjustment: Adjustment = name.parse()?;
        Ok(self.set_control(adjustment, value))
    }

    /// Move a control and schedule a recomputation once input settles.
    pub fn set_control(&self, adjustment: Adjustment, value: i32) -> u8 {
        let stored = {
            let mut state = self.inner.lock_state();
            let stored = state.controls.set(adjustment, value);
            let parameter = lumen_core::mapper::to_parameter(adjustment, stored as i32);
            state.params.set(adjustment, parameter);
            stored
        };
        debug!(%adjustment, control = stored, "control changed");
        self.schedule();
        stored
    }

    /// Replace the whole parameter set, e.g. from saved edits.
    pub fn set_parameters(&self, params: AdjustmentParameters) -> Result<()> {
        params.validate()?;
        {
            let mut state = self.inner.lock_state();
            state.controls = ControlState::from_parameters(&params);
            state.params = params;
        }
        self.schedule();
        Ok(())
    }

    /// Run now, skipping the quiescence window, and wait for the result.
    ///
    /// The run itself is a task of its own: dropping the returned future
    /// stops the waiting, not the run, which keeps its slot until done.
    pub async fn render_now(&self) -> Result<RunOutcome> {
        self.inner.scheduler.touch();
        let inner = self.inner.clone();
        self.inner
            .runtime
            .spawn(async move { inner.trigger().await })
            .await
            .map_err(|err| SessionError::Worker(err.to_string()))?
    }

    pub fn rendered(&self) -> Option<Arc<PixelBuffer>> {
        self.inner.lock_state().rendered.clone()
    }

    pub fn original(&self) -> Option<Arc<PixelBuffer>> {
        self.inner.lock_state().original.clone()
    }

    pub fn histogram(&self) -> Option<Arc<Histogram>> {
        self.inner.lock_state().histogram.clone()
    }

    pub fn controls(&self) -> ControlState {
        self.inner.lock_state().controls.clone()
    }

    pub fn parameters(&self) -> AdjustmentParameters {
        self.inner.lock_state().params
    }

    pub fn is_busy(&self) -> bool {
        self.inner.scheduler.is_busy()
    }

    pub fn stats(&self) -> RunStats {
        self.inner.lock_stats().clone()
    }

    fn schedule(&self) {
        let token = self.inner.scheduler.touch();
        let inner = self.inner.clone();
        self.inner.runtime.spawn(async move {
            if !inner.scheduler.settle(token).await {
                return;
            }
            if let Err(err) = inner.trigger().await {
                debug!(%err, "scheduled run failed");
            }
        });
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_stats(&self) -> MutexGuard<'_, RunStats> {
        self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine; the read side still has the state.
        let _ = self.events.send(event);
    }

    fn snapshot(&self) -> Option<Job> {
        let state = self.lock_state();
        let original = state.original.clone()?;
        Some(Job {
            original,
            params: state.params,
            epoch: state.epoch,
        })
    }

    /// Claim the run slot and execute, repeating while the policy asks for it.
    async fn trigger(&self) -> Result<RunOutcome> {
        if self.snapshot().is_none() {
            debug!("no image loaded, trigger ignored");
            return Ok(RunOutcome::NoImage);
        }

        let mut slot = match self.scheduler.try_acquire() {
            Admission::Admitted(slot) => slot,
            Admission::Dropped => {
                self.lock_stats().triggers_dropped += 1;
                debug!("run in flight, trigger dropped");
                return Ok(RunOutcome::Dropped);
            }
            Admission::Deferred => {
                self.lock_stats().triggers_coalesced += 1;
                debug!("run in flight, rerun requested");
                return Ok(RunOutcome::Deferred);
            }
        };

        self.emit(SessionEvent::ProcessingStateChanged(true));
        let mut result;
        loop {
            result = match self.snapshot() {
                Some(job) => self.execute(job).await,
                None => Ok(RunOutcome::NoImage),
            };
            if !slot.release_or_rerun() {
                break;
            }
            debug!("rerunning with latest parameters");
        }
        drop(slot);
        self.emit(SessionEvent::ProcessingStateChanged(false));
        result
    }

    async fn execute(&self, job: Job) -> Result<RunOutcome> {
        self.lock_stats().runs_started += 1;
        let t0 = Instant::now();
        let pipeline = self.pipeline.clone();
        let Job {
            original,
            params,
            epoch,
        } = job;

        let result = tokio::task::spawn_blocking(move || pipeline.render(&original, &params))
            .await
            .map_err(|err| SessionError::Worker(err.to_string()))
            .and_then(|rendered| rendered.map_err(SessionError::from));
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        match result {
            Ok(rendered) => Ok(self.commit(rendered, epoch, elapsed_ms)),
            Err(err) => {
                error!(%err, elapsed_ms, "pipeline run failed");
                self.lock_stats().runs_failed += 1;
                self.emit(SessionEvent::ProcessingFailed(err.to_string()));
                Err(err)
            }
        }
    }

    fn commit(&self, rendered: Rendered, epoch: u64, elapsed_ms: u64) -> RunOutcome {
        let Rendered { buffer, histogram } = rendered;
        let buffer = Arc::new(buffer);
        let histogram = Arc::new(histogram);
        {
            let mut state = self.lock_state();
            if state.epoch != epoch {
                drop(state);
                self.lock_stats().runs_discarded += 1;
                debug!(elapsed_ms, "image changed during run, result discarded");
                return RunOutcome::Discarded;
            }
            state.rendered = Some(buffer.clone());
            state.histogram = Some(histogram.clone());
        }
        {
            let mut stats = self.lock_stats();
            stats.runs_completed += 1;
            stats.last_run_ms = Some(elapsed_ms);
        }
        info!(elapsed_ms, "render complete");
        self.emit(SessionEvent::RenderedUpdated(buffer));
        self.emit(SessionEvent::HistogramUpdated(histogram));
        RunOutcome::Rendered
    }

    /// Compute the histogram of an untouched original off-thread and publish
    /// it if the content has not changed meanwhile.
    async fn publish_baseline_histogram(&self, original: Arc<PixelBuffer>, epoch: u64) -> Result<()> {
        let pipeline = self.pipeline.clone();
        let histogram = tokio::task::spawn_blocking(move || pipeline.histogram(&original))
            .await
            .map_err(|err| SessionError::Worker(err.to_string()))??;
        let histogram = Arc::new(histogram);
        {
            let mut state = self.lock_state();
            if state.epoch != epoch {
                return Ok(());
            }
            state.histogram = Some(histogram.clone());
        }
        self.emit(SessionEvent::HistogramUpdated(histogram));
        Ok(())
    }
}
