//! Playback scheduler.
//!
//! A [`Typewriter`] reveals one printed unit per step on a Tokio task, waiting
//! each unit's delay in between. Every request gets a fresh session; starting
//! a new request, skipping or disposing cancels the running session so its
//! pending step wakes up to nothing.
//!
//! Signals are delivered as [`TyperEvent`]s on an unbounded channel, in strict
//! printed-index order, followed by exactly one [`TyperEvent::Completed`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::{ClockMode, TyperConfig};
use crate::error::{PlanDiagnostic, Result, TyperError};
use crate::plan::{AnimationPlan, TypingPlan};
use crate::presets::Presets;
use crate::timing::TypableUnit;

/// The rich-text surface the display text is revealed on.
pub trait RevealSurface: Send + 'static {
    /// Replace the surface's markup. Called once per request, before any
    /// unit is revealed.
    fn set_text(&mut self, markup: &str);

    /// Show only the first `visible` printed units.
    fn set_visible(&mut self, visible: usize);
}

/// Receives the animation ranges of each request.
pub trait AnimationSink: Send + 'static {
    fn load(&mut self, plan: &AnimationPlan);

    /// Called alongside [`RevealSurface::set_visible`].
    fn set_visible(&mut self, _visible: usize) {}
}

/// An [`AnimationSink`] that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnimations;

impl AnimationSink for NoAnimations {
    fn load(&mut self, _plan: &AnimationPlan) {}
}

/// Signals fired while typing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TyperEvent {
    /// A unit was revealed. Sprites carry
    /// [`SPRITE_SENTINEL`](crate::SPRITE_SENTINEL) as their value.
    CharacterPrinted { index: usize, value: String },
    /// Every unit is shown.
    Completed,
}

/// Shared, adjustable multiplier for the scaled clock.
///
/// A scale of 0 pauses typing; 2 types twice as fast.
#[derive(Clone, Debug)]
pub struct TimeScale(Arc<AtomicU64>);

impl TimeScale {
    pub fn new(scale: f64) -> Self {
        let time_scale = Self(Arc::new(AtomicU64::new(0)));
        time_scale.set(scale);
        time_scale
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Set the scale. Negative and non-finite values become 0.
    pub fn set(&self, scale: f64) {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        self.0.store(scale.to_bits(), Ordering::Relaxed);
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Waits out unit delays in the configured [`ClockMode`].
#[derive(Clone, Debug)]
struct Clock {
    mode: ClockMode,
    frame: Duration,
    scale: TimeScale,
}

impl Clock {
    async fn sleep(&self, delay: Duration) {
        if self.mode == ClockMode::Unscaled || self.frame.is_zero() {
            tokio::time::sleep(delay).await;
            return;
        }

        // Each frame counts its measured length times the current scale. The
        // last step is shortened to what is left so the wait ends on the delay.
        let mut remaining = delay;
        let mut last = Instant::now();
        while !remaining.is_zero() {
            let scale = self.scale.get();
            tokio::time::sleep(self.step(remaining, scale)).await;
            let now = Instant::now();
            remaining = remaining.saturating_sub(scaled(now - last, scale));
            last = now;
        }
    }

    /// Host time to wait before the next check: one frame, or less when
    /// `remaining` runs out sooner at `scale`.
    fn step(&self, remaining: Duration, scale: f64) -> Duration {
        if scale <= 0.0 {
            return self.frame;
        }
        let needed = (remaining.as_nanos() as f64 / scale).ceil() as u64;
        Duration::from_nanos(needed).min(self.frame)
    }
}

fn scaled(elapsed: Duration, scale: f64) -> Duration {
    Duration::from_nanos((elapsed.as_nanos() as f64 * scale).round() as u64)
}

struct Session {
    id: u64,
    token: CancellationToken,
    total: usize,
}

struct Shared<S> {
    surface: S,
    animations: Box<dyn AnimationSink>,
    events: mpsc::UnboundedSender<TyperEvent>,
    session: Option<Session>,
    next_session: u64,
}

impl<S: RevealSurface> Shared<S> {
    fn is_current(&self, id: u64) -> bool {
        self.session.as_ref().is_some_and(|session| session.id == id)
    }

    fn reveal(&mut self, visible: usize) {
        self.surface.set_visible(visible);
        self.animations.set_visible(visible);
    }

    fn emit(&self, event: TyperEvent) {
        let _ = self.events.send(event);
    }

    /// End the current session, if any, without signalling.
    fn cancel(&mut self) -> Option<Session> {
        let session = self.session.take()?;
        session.token.cancel();
        debug!("cancelled typing session {}", session.id);
        Some(session)
    }
}

fn lock<S>(shared: &Mutex<Shared<S>>) -> MutexGuard<'_, Shared<S>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Types markup onto a [`RevealSurface`] one printed unit at a time.
pub struct Typewriter<S: RevealSurface> {
    shared: Arc<Mutex<Shared<S>>>,
    config: TyperConfig,
    presets: Arc<Presets>,
    time_scale: TimeScale,
    runtime: Handle,
}

impl<S: RevealSurface> Typewriter<S> {
    /// Create a typewriter bound to the current Tokio runtime.
    ///
    /// Events are sent to `events`; a dropped receiver is ignored.
    pub fn new(
        config: TyperConfig,
        presets: Presets,
        surface: S,
        events: mpsc::UnboundedSender<TyperEvent>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| TyperError::NoRuntime)?;
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                surface,
                animations: Box::new(NoAnimations),
                events,
                session: None,
                next_session: 0,
            })),
            config,
            presets: Arc::new(presets),
            time_scale: TimeScale::default(),
            runtime,
        })
    }

    /// Hand animation ranges to `sink` for every request.
    pub fn with_animation_sink(self, sink: impl AnimationSink) -> Self {
        lock(&self.shared).animations = Box::new(sink);
        self
    }

    pub fn config(&self) -> &TyperConfig {
        &self.config
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Handle to the scaled clock's multiplier.
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale.clone()
    }

    /// Start typing `text`, cancelling any request in progress.
    ///
    /// `delay` replaces the configured default delay for this request when
    /// positive. Returns the problems found in the markup; none of them stop
    /// the request.
    pub fn type_text(&self, text: &str, delay: Option<Duration>) -> Vec<PlanDiagnostic> {
        let plan = TypingPlan::build(text, &self.config, &self.presets, delay);
        let diagnostics = plan.diagnostics().to_vec();
        let token = CancellationToken::new();

        let id = {
            let mut shared = lock(&self.shared);
            shared.cancel();
            shared.next_session += 1;
            let id = shared.next_session;

            shared.surface.set_text(plan.display_text());
            shared.animations.load(plan.animations());
            shared.reveal(0);
            shared.session = Some(Session {
                id,
                token: token.clone(),
                total: plan.len(),
            });
            id
        };
        debug!("typing session {id} started with {} units", plan.len());

        let clock = Clock {
            mode: self.config.clock_mode,
            frame: self.config.frame_interval,
            scale: self.time_scale.clone(),
        };
        self.runtime.spawn(run_session(
            Arc::clone(&self.shared),
            id,
            token,
            plan.into_units(),
            clock,
        ));

        diagnostics
    }

    /// Show everything now and signal completion.
    ///
    /// Returns false, and signals nothing, when not typing.
    pub fn skip(&self) -> bool {
        let mut shared = lock(&self.shared);
        let Some(session) = shared.cancel() else {
            return false;
        };
        debug!("typing session {} skipped", session.id);
        shared.reveal(session.total);
        shared.emit(TyperEvent::Completed);
        true
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.shared).session.is_some()
    }

    /// Whether [`skip`](Self::skip) would do anything.
    pub fn is_skippable(&self) -> bool {
        self.is_typing()
    }

    /// Stop typing without revealing the rest or signalling completion.
    pub fn dispose(&self) {
        lock(&self.shared).cancel();
    }

    /// Run `f` against the surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.shared).surface)
    }
}

impl<S: RevealSurface> Drop for Typewriter<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_session<S: RevealSurface>(
    shared: Arc<Mutex<Shared<S>>>,
    id: u64,
    token: CancellationToken,
    units: Vec<TypableUnit>,
    clock: Clock,
) {
    for (index, unit) in units.iter().enumerate() {
        {
            let mut shared = lock(&shared);
            if !shared.is_current(id) {
                return;
            }
            shared.reveal(index + 1);
            let value = unit.value();
            trace!("session {id} printed {index}: {value:?}");
            shared.emit(TyperEvent::CharacterPrinted { index, value });
        }

        tokio::select! {
            _ = token.cancelled() => return,
            _ = clock.sleep(unit.delay) => {}
        }
    }

    let mut shared = lock(&shared);
    if shared.is_current(id) {
        shared.session = None;
        debug!("typing session {id} completed");
        shared.emit(TyperEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_clamps() {
        let scale = TimeScale::new(2.5);
        assert_eq!(scale.get(), 2.5);
        scale.set(-1.0);
        assert_eq!(scale.get(), 0.0);
        scale.set(f64::NAN);
        assert_eq!(scale.get(), 0.0);
        assert_eq!(TimeScale::default().get(), 1.0);
    }

    #[test]
    fn time_scale_is_shared() {
        let scale = TimeScale::default();
        let other = scale.clone();
        other.set(0.5);
        assert_eq!(scale.get(), 0.5);
    }

    struct NullSurface;

    impl RevealSurface for NullSurface {
        fn set_text(&mut self, _markup: &str) {}
        fn set_visible(&mut self, _visible: usize) {}
    }

    #[test]
    fn requires_a_runtime() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = Typewriter::new(TyperConfig::default(), Presets::default(), NullSurface, tx);
        assert!(matches!(result, Err(TyperError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn scaled_clock_counts_frames() {
        let clock = Clock {
            mode: ClockMode::Scaled,
            frame: Duration::from_millis(10),
            scale: TimeScale::new(0.5),
        };
        let start = tokio::time::Instant::now();
        clock.sleep(Duration::from_millis(30)).await;
        assert_eq!(start.elapsed(), Duration::from_millis(60));
    }

    #[tokio::test(start_paused = true)]
    async fn scaled_clock_ends_on_the_delay() {
        let config = TyperConfig::default();
        let clock = Clock {
            mode: config.clock_mode,
            frame: config.frame_interval,
            scale: TimeScale::default(),
        };
        let start = tokio::time::Instant::now();
        clock.sleep(Duration::from_millis(50)).await;
        assert_eq!(start.elapsed(), Duration::from_millis(50));
    }
}
