//! Scheduler behavior under paused Tokio time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use typer::{
    AnimationPlan, AnimationSink, ClockMode, PresetLibrary, Presets, RevealSurface, ShakePreset,
    TyperConfig, TyperEvent, Typewriter,
};

#[derive(Default)]
struct RecordingSurface {
    markup: String,
    visible: usize,
    history: Vec<usize>,
}

impl RevealSurface for RecordingSurface {
    fn set_text(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.history.clear();
    }

    fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.history.push(visible);
    }
}

#[derive(Clone, Default)]
struct RecordingSink(Arc<Mutex<Vec<AnimationPlan>>>);

impl AnimationSink for RecordingSink {
    fn load(&mut self, plan: &AnimationPlan) {
        self.0.lock().unwrap().push(plan.clone());
    }
}

fn config() -> TyperConfig {
    TyperConfig::default()
        .with_default_delay(Duration::from_millis(50))
        .with_clock_mode(ClockMode::Unscaled)
}

fn typewriter(
    config: TyperConfig,
) -> (
    Typewriter<RecordingSurface>,
    mpsc::UnboundedReceiver<TyperEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let typewriter =
        Typewriter::new(config, Presets::default(), RecordingSurface::default(), tx).unwrap();
    (typewriter, rx)
}

fn printed(index: usize, value: &str) -> TyperEvent {
    TyperEvent::CharacterPrinted {
        index,
        value: value.to_string(),
    }
}

async fn assert_quiet(rx: &mut mpsc::UnboundedReceiver<TyperEvent>) {
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err(), "unexpected event after completion");
}

#[tokio::test(start_paused = true)]
async fn reveals_in_order_then_completes_once() {
    let (typewriter, mut rx) = typewriter(config());
    let start = Instant::now();
    typewriter.type_text("<b>ab</b>.", None);

    assert_eq!(rx.recv().await, Some(printed(0, "a")));
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(rx.recv().await, Some(printed(1, "b")));
    assert_eq!(start.elapsed(), Duration::from_millis(50));
    assert_eq!(rx.recv().await, Some(printed(2, ".")));
    assert_eq!(start.elapsed(), Duration::from_millis(100));
    assert_eq!(rx.recv().await, Some(TyperEvent::Completed));
    assert_eq!(start.elapsed(), Duration::from_millis(200));

    assert!(!typewriter.is_typing());
    typewriter.with_surface(|surface| {
        assert_eq!(surface.markup, "<b>ab</b>.");
        assert_eq!(surface.history, vec![0, 1, 2, 3]);
    });
    assert_quiet(&mut rx).await;
}

#[tokio::test(start_paused = true)]
async fn skip_reveals_everything_and_completes_once() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("hello", None);

    assert_eq!(rx.recv().await, Some(printed(0, "h")));
    assert!(typewriter.is_skippable());
    assert!(typewriter.skip());

    assert_eq!(rx.recv().await, Some(TyperEvent::Completed));
    assert!(!typewriter.is_typing());
    typewriter.with_surface(|surface| assert_eq!(surface.visible, 5));

    assert!(!typewriter.skip());
    assert_quiet(&mut rx).await;
}

#[tokio::test(start_paused = true)]
async fn skip_matches_natural_completion() {
    let (natural, mut natural_rx) = typewriter(config());
    natural.type_text("<i>one</i> two", None);
    while natural_rx.recv().await != Some(TyperEvent::Completed) {}

    let (skipped, mut skipped_rx) = typewriter(config());
    skipped.type_text("<i>one</i> two", None);
    skipped_rx.recv().await;
    skipped_rx.recv().await;
    skipped.skip();
    assert_eq!(skipped_rx.recv().await, Some(TyperEvent::Completed));

    let natural_view = natural.with_surface(|s| (s.markup.clone(), s.visible));
    let skipped_view = skipped.with_surface(|s| (s.markup.clone(), s.visible));
    assert_eq!(natural_view, skipped_view);
    assert_eq!(natural_view, ("<i>one</i> two".to_string(), 7));
}

#[tokio::test(start_paused = true)]
async fn new_request_cancels_the_previous_one() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("abc", None);
    assert_eq!(rx.recv().await, Some(printed(0, "a")));

    typewriter.type_text("xy", None);
    assert_eq!(rx.recv().await, Some(printed(0, "x")));
    assert_eq!(rx.recv().await, Some(printed(1, "y")));
    assert_eq!(rx.recv().await, Some(TyperEvent::Completed));
    typewriter.with_surface(|surface| assert_eq!(surface.markup, "xy"));

    assert_quiet(&mut rx).await;
}

#[tokio::test(start_paused = true)]
async fn dispose_stops_without_completing() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("abc", None);
    assert_eq!(rx.recv().await, Some(printed(0, "a")));

    typewriter.dispose();
    assert!(!typewriter.is_typing());
    assert_quiet(&mut rx).await;
    typewriter.with_surface(|surface| assert_eq!(surface.visible, 1));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_typewriter_cancels() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("abc", None);
    assert_eq!(rx.recv().await, Some(printed(0, "a")));

    drop(typewriter);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn empty_text_completes_immediately() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("<delay=1></delay>", None);
    assert_eq!(rx.recv().await, Some(TyperEvent::Completed));
    assert_quiet(&mut rx).await;
}

#[tokio::test(start_paused = true)]
async fn requested_delay_is_used() {
    let (typewriter, mut rx) = typewriter(config());
    let start = Instant::now();
    typewriter.type_text("ab", Some(Duration::from_millis(10)));

    rx.recv().await;
    rx.recv().await;
    assert_eq!(start.elapsed(), Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn sprites_signal_the_sentinel() {
    let (typewriter, mut rx) = typewriter(config());
    typewriter.type_text("a<sprite=1>", None);
    assert_eq!(rx.recv().await, Some(printed(0, "a")));
    assert_eq!(rx.recv().await, Some(printed(1, "Sprite")));
}

#[tokio::test(start_paused = true)]
async fn default_clock_keeps_the_configured_pace() {
    let (typewriter, mut rx) = typewriter(TyperConfig::default());
    let start = Instant::now();
    typewriter.type_text("ab", None);

    assert_eq!(rx.recv().await, Some(printed(0, "a")));
    assert_eq!(rx.recv().await, Some(printed(1, "b")));
    assert_eq!(start.elapsed(), Duration::from_millis(50));
    assert_eq!(rx.recv().await, Some(TyperEvent::Completed));
    assert_eq!(start.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn time_scale_stretches_and_pauses() {
    let config = config()
        .with_clock_mode(ClockMode::Scaled)
        .with_frame_interval(Duration::from_millis(10));
    let (typewriter, mut rx) = typewriter(config);
    let scale = typewriter.time_scale();
    scale.set(0.5);

    let start = Instant::now();
    typewriter.type_text("abc", None);
    rx.recv().await;
    assert_eq!(rx.recv().await, Some(printed(1, "b")));
    assert_eq!(start.elapsed(), Duration::from_millis(100));

    scale.set(0.0);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert!(typewriter.is_typing());

    scale.set(1.0);
    assert_eq!(rx.recv().await, Some(printed(2, "c")));
}

#[tokio::test(start_paused = true)]
async fn animation_sink_receives_ranges() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let sink = RecordingSink::default();
    let presets = Presets::new(
        PresetLibrary::new().with(ShakePreset::new("shake")),
        PresetLibrary::new(),
    );
    let typewriter = Typewriter::new(config(), presets, RecordingSurface::default(), tx)
        .unwrap()
        .with_animation_sink(sink.clone());

    let diagnostics = typewriter.type_text("<anim=shake>AB</anim>C<anim=nope>D</anim>", None);
    assert_eq!(diagnostics.len(), 1);

    let loaded = sink.0.lock().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].ranges.len(), 1);
    assert_eq!(loaded[0].delays.len(), 4);
}
