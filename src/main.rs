//! Types rich-text markup into the terminal, one character at a time.
//!
//! ```text
//! typewriter "Hello, <b>world</b>!<delay=0.5>...</delay> <anim=wave>welcome</anim>"
//! echo "<i>from stdin</i>" | typewriter --delay 0.02
//! ```
//!
//! Space or Enter skips to the end, `q` or Esc quits.

mod error;
mod terminal;

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{LevelFilter, info, trace, warn};
use tokio::sync::mpsc;
use typer::{
    AnimationPlan, AnimationSink, ClockMode, Curve, CurvePreset, PresetLibrary, Presets,
    ShakePreset, TyperConfig, TyperEvent, Typewriter,
};

use crate::error::{Result, TypewriterError};
use crate::terminal::TerminalSurface;

#[derive(Parser, Debug)]
#[command(version, about = "Type rich-text markup into the terminal")]
struct Args {
    /// Markup to type. Read from stdin when omitted.
    text: Option<String>,

    /// Seconds between characters.
    #[arg(long, default_value_t = 0.05)]
    delay: f64,

    /// Delay multiplier for punctuation.
    #[arg(long, default_value_t = 2.0)]
    punctuation_multiplier: f64,

    /// Append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ignore animation directives.
    #[arg(long)]
    no_animations: bool,
}

/// Logs the animation ranges of each request. A terminal cannot move
/// individual characters, so nothing is animated on screen.
struct LogAnimations;

impl AnimationSink for LogAnimations {
    fn load(&mut self, plan: &AnimationPlan) {
        for range in &plan.ranges {
            info!(
                "animate {}..={} with {:?} preset '{}'",
                range.start, range.end, range.kind, range.preset_key
            );
        }
    }
}

fn demo_presets() -> Presets {
    let bob = Curve::new([(0.0, 0.0), (0.25, 1.0), (0.5, 0.0), (0.75, -1.0), (1.0, 0.0)]);
    let hop = Curve::new([(0.0, 0.0), (0.2, 1.0), (0.4, 0.0), (1.0, 0.0)]);

    Presets::new(
        PresetLibrary::new()
            .with(ShakePreset::new("shake").with_offset(2.0, 2.0).with_rotation(5.0))
            .with(ShakePreset::new("jitter").with_offset(0.5, 0.5))
            .with(ShakePreset::new("scream").with_offset(4.0, 4.0).with_scale(0.2)),
        PresetLibrary::new()
            .with(CurvePreset::new("wave").with_time_offset(0.1).with_y_curve(bob, 4.0))
            .with(CurvePreset::new("bounce").with_time_offset(0.05).with_y_curve(hop, 6.0)),
    )
}

fn read_text(args: &Args) -> Result<String> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text.trim_end_matches('\n').to_string()
        }
    };
    if text.is_empty() {
        return Err(TypewriterError::EmptyInput);
    }
    Ok(text)
}

async fn type_in_terminal(config: TyperConfig, text: &str) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let surface = TerminalSurface::new(io::stdout(), config.vocabulary.clone());
    let typewriter =
        Typewriter::new(config, demo_presets(), surface, tx)?.with_animation_sink(LogAnimations);

    for diagnostic in typewriter.type_text(text, None) {
        warn!("{diagnostic}");
    }

    let mut event_stream = EventStream::new();
    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            typewriter.skip();
                        }
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                        _ => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(TypewriterError::Io(e)),
                    None => break, // Stream ended
                }
            }

            Some(event) = rx.recv() => match event {
                TyperEvent::CharacterPrinted { index, value } => trace!("printed {index}: {value:?}"),
                TyperEvent::Completed => break,
            }
        }
    }

    typewriter.dispose();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        typer::init_logger(path, LevelFilter::Debug)?;
    }

    let text = read_text(&args)?;
    let delay =
        Duration::try_from_secs_f64(args.delay).map_err(|_| TypewriterError::InvalidDelay(args.delay))?;
    let config = TyperConfig::default()
        .with_default_delay(delay)
        .with_punctuation_multiplier(args.punctuation_multiplier)
        .with_animations(!args.no_animations)
        .with_clock_mode(ClockMode::Unscaled);

    crossterm::terminal::enable_raw_mode()?;
    let result = type_in_terminal(config, &text).await;
    crossterm::terminal::disable_raw_mode()?;
    println!();

    result
}
