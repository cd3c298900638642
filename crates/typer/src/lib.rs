//! Typewriter-style progressive reveal of tagged text.
//!
//! A typing request turns markup such as
//! `Hello<delay=0.5>...</delay> <anim=wave>world</anim>` into a
//! [`TypingPlan`]: the display text with directives removed, a delay for
//! every printed unit, and the animation ranges. A [`Typewriter`] then
//! reveals the plan on a [`RevealSurface`] one unit at a time.
//!
//! # Usage
//!
//! ```no_run
//! use typer::{Presets, RevealSurface, TyperConfig, TyperEvent, Typewriter};
//!
//! struct Stdout;
//!
//! impl RevealSurface for Stdout {
//!     fn set_text(&mut self, _markup: &str) {}
//!     fn set_visible(&mut self, _visible: usize) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> typer::Result<()> {
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!     let typewriter = Typewriter::new(TyperConfig::default(), Presets::default(), Stdout, tx)?;
//!     typewriter.type_text("<b>Hello</b>, world!", None);
//!
//!     while let Some(event) = rx.recv().await {
//!         match event {
//!             TyperEvent::CharacterPrinted { value, .. } => print!("{value}"),
//!             TyperEvent::Completed => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod log_init;
pub mod plan;
pub mod presets;
pub mod scheduler;
pub mod timing;

pub use animation::{AnimationExtractor, AnimationKind, AnimationRange};
pub use config::{ClockMode, DEFAULT_PUNCTUATION, TyperConfig};
pub use error::{PlanDiagnostic, Result, TyperError};
pub use log_init::init_logger;
pub use plan::{AnimationPlan, TypingPlan};
pub use presets::{Curve, CurvePreset, NamedPreset, Preset, PresetLibrary, Presets, ShakePreset};
pub use scheduler::{AnimationSink, NoAnimations, RevealSurface, TimeScale, TyperEvent, Typewriter};
pub use timing::{SPRITE_SENTINEL, TimingResolver, TypableUnit, UnitKind, parse_delay};
