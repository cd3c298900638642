//! Per-unit delay resolution.
//!
//! A running delay starts at the request's default. An opening timing
//! directive overrides it, and any closing timing directive goes back to the
//! default. Overrides do not nest.

use std::time::Duration;

use log::warn;
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit0, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, terminated},
};
use tagtext::{Symbol, Tag};

use crate::config::TyperConfig;
use crate::error::PlanDiagnostic;

/// Printed value reported for sprite units.
pub const SPRITE_SENTINEL: &str = "Sprite";

/// What one reveal step shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Character(char),
    /// A sprite, identified by its tag parameter.
    Sprite(String),
}

/// One reveal step and the pause that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypableUnit {
    pub kind: UnitKind,
    pub delay: Duration,
}

impl TypableUnit {
    pub fn character(c: char, delay: Duration) -> Self {
        Self {
            kind: UnitKind::Character(c),
            delay,
        }
    }

    pub fn sprite(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            kind: UnitKind::Sprite(name.into()),
            delay,
        }
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self.kind, UnitKind::Sprite(_))
    }

    /// The printed value: the character itself, or [`SPRITE_SENTINEL`].
    pub fn value(&self) -> String {
        match &self.kind {
            UnitKind::Character(c) => c.to_string(),
            UnitKind::Sprite(_) => SPRITE_SENTINEL.to_string(),
        }
    }
}

/// Tracks the delay in effect while walking a symbol sequence.
#[derive(Debug)]
pub struct TimingResolver<'c> {
    config: &'c TyperConfig,
    default_delay: Duration,
    override_delay: Option<Duration>,
}

impl<'c> TimingResolver<'c> {
    pub fn new(config: &'c TyperConfig, default_delay: Duration) -> Self {
        Self {
            config,
            default_delay,
            override_delay: None,
        }
    }

    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// The active override, if any.
    pub fn override_delay(&self) -> Option<Duration> {
        self.override_delay
    }

    /// Apply a timing directive.
    pub fn on_directive(&mut self, tag: &Tag) -> Option<PlanDiagnostic> {
        if tag.is_closing() {
            self.override_delay = None;
            return None;
        }

        match parse_delay(tag.parameter()) {
            Some(delay) => {
                self.override_delay = Some(delay);
                None
            }
            None => {
                self.override_delay = None;
                let diagnostic = PlanDiagnostic::InvalidDelay {
                    parameter: tag.parameter().to_string(),
                    fallback: self.default_delay,
                };
                warn!("{diagnostic}");
                Some(diagnostic)
            }
        }
    }

    /// Delay after revealing a unit showing `c` (`None` for sprites).
    ///
    /// An active override wins over the punctuation multiplier.
    pub fn delay_for(&self, c: Option<char>) -> Duration {
        if let Some(delay) = self.override_delay {
            return delay;
        }
        match c {
            Some(c) if self.config.is_punctuation(c) => {
                self.config.punctuation_delay(self.default_delay)
            }
            _ => self.default_delay,
        }
    }

    /// The unit for a printable symbol.
    pub fn unit(&self, symbol: &Symbol) -> Option<TypableUnit> {
        match symbol {
            Symbol::Character(c) => Some(TypableUnit::character(*c, self.delay_for(Some(*c)))),
            Symbol::Sprite(tag) => Some(TypableUnit::sprite(tag.parameter(), self.delay_for(None))),
            Symbol::Passthrough(_) | Symbol::Directive(_) => None,
        }
    }
}

/// Non-negative decimal seconds: `1`, `0.25`, `.5`, optionally suffixed `s`.
fn seconds(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a timing directive parameter.
pub fn parse_delay(parameter: &str) -> Option<Duration> {
    let parameter = parameter.trim().trim_matches('"');
    let (_, secs) = all_consuming(terminated(seconds, opt(char('s'))))(parameter).ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(raw: &str) -> Tag {
        Tag::parse(raw).unwrap()
    }

    #[test]
    fn parses_delay_parameters() {
        assert_eq!(parse_delay("1.0"), Some(Duration::from_secs(1)));
        assert_eq!(parse_delay("2"), Some(Duration::from_secs(2)));
        assert_eq!(parse_delay(".5"), Some(Duration::from_millis(500)));
        assert_eq!(parse_delay("\"0.5s\""), Some(Duration::from_millis(500)));
        assert_eq!(parse_delay("0"), Some(Duration::ZERO));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(parse_delay(""), None);
        assert_eq!(parse_delay("-1"), None);
        assert_eq!(parse_delay("fast"), None);
        assert_eq!(parse_delay("1.0x"), None);
    }

    #[test]
    fn punctuation_uses_multiplier() {
        let config = TyperConfig::default();
        let resolver = TimingResolver::new(&config, Duration::from_millis(50));
        assert_eq!(resolver.delay_for(Some('a')), Duration::from_millis(50));
        assert_eq!(resolver.delay_for(Some('!')), Duration::from_millis(100));
        assert_eq!(resolver.delay_for(None), Duration::from_millis(50));
    }

    #[test]
    fn override_wins_until_closed() {
        let config = TyperConfig::default();
        let mut resolver = TimingResolver::new(&config, Duration::from_millis(50));

        assert_eq!(resolver.on_directive(&tag("<delay=1.0>")), None);
        assert_eq!(resolver.delay_for(Some('.')), Duration::from_secs(1));

        resolver.on_directive(&tag("<speed=0.5>"));
        resolver.on_directive(&tag("</speed>"));
        assert_eq!(resolver.override_delay(), None);
        assert_eq!(resolver.delay_for(Some('x')), Duration::from_millis(50));
    }

    #[test]
    fn invalid_override_falls_back_to_default() {
        let config = TyperConfig::default();
        let mut resolver = TimingResolver::new(&config, Duration::from_millis(50));
        resolver.on_directive(&tag("<delay=1>"));

        let diagnostic = resolver.on_directive(&tag("<delay=soon>"));
        assert_eq!(
            diagnostic,
            Some(PlanDiagnostic::InvalidDelay {
                parameter: "soon".into(),
                fallback: Duration::from_millis(50),
            })
        );
        assert_eq!(resolver.delay_for(Some('x')), Duration::from_millis(50));
    }

    #[test]
    fn sprite_units_report_sentinel() {
        let unit = TypableUnit::sprite("3", Duration::ZERO);
        assert!(unit.is_sprite());
        assert_eq!(unit.value(), SPRITE_SENTINEL);
        assert_eq!(TypableUnit::character('q', Duration::ZERO).value(), "q");
    }
}
