//! Typing plans.
//!
//! Everything a typing request needs is derived up front, in one pass over
//! the parsed markup: the display text, one [`TypableUnit`] per printed unit,
//! and the animation ranges. Nothing is shown before the plan is complete.

use std::time::Duration;

use log::debug;
use tagtext::{DirectiveKind, Symbol, SymbolSequence};

use crate::animation::{AnimationExtractor, AnimationRange};
use crate::config::TyperConfig;
use crate::error::PlanDiagnostic;
use crate::presets::Presets;
use crate::timing::{TimingResolver, TypableUnit};

/// What the animation collaborator receives for one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationPlan {
    pub ranges: Vec<AnimationRange>,
    /// Delay after each printed unit, by printed index.
    pub delays: Vec<Duration>,
}

impl AnimationPlan {
    /// Ranges that animate printed index `index`.
    pub fn ranges_at(&self, index: usize) -> impl Iterator<Item = &AnimationRange> {
        self.ranges.iter().filter(move |range| range.contains(index))
    }
}

/// The fully resolved form of one typing request.
#[derive(Clone, Debug, Default)]
pub struct TypingPlan {
    display_text: String,
    units: Vec<TypableUnit>,
    animations: AnimationPlan,
    diagnostics: Vec<PlanDiagnostic>,
}

impl TypingPlan {
    /// Plan typing `text`.
    ///
    /// `requested_delay` replaces the configured default delay when it is
    /// positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use typer::{Presets, TyperConfig, TypingPlan};
    ///
    /// let plan = TypingPlan::build("<b>Hi</b>!", &TyperConfig::default(), &Presets::default(), None);
    /// assert_eq!(plan.display_text(), "<b>Hi</b>!");
    /// assert_eq!(plan.len(), 3);
    /// assert_eq!(plan.units()[2].delay, Duration::from_millis(100));
    /// ```
    pub fn build(
        text: &str,
        config: &TyperConfig,
        presets: &Presets,
        requested_delay: Option<Duration>,
    ) -> Self {
        let sequence = SymbolSequence::parse(text, &config.vocabulary);
        let mut diagnostics: Vec<PlanDiagnostic> = sequence
            .diagnostics()
            .iter()
            .cloned()
            .map(PlanDiagnostic::from)
            .collect();

        let mut timing = TimingResolver::new(config, config.request_delay(requested_delay));
        let mut extractor = config
            .animations_enabled
            .then(|| AnimationExtractor::new(presets));
        let mut units = Vec::with_capacity(sequence.printable_len());

        for symbol in sequence.symbols() {
            match symbol {
                Symbol::Directive(directive) => match directive.kind {
                    DirectiveKind::Timing => diagnostics.extend(timing.on_directive(&directive.tag)),
                    DirectiveKind::Animation(hint) => {
                        if let Some(extractor) = extractor.as_mut() {
                            extractor.on_directive(&directive.tag, hint, units.len());
                        }
                    }
                },
                other => units.extend(timing.unit(other)),
            }
        }

        let ranges = match extractor {
            Some(extractor) => {
                let (ranges, found) = extractor.finish();
                diagnostics.extend(found);
                ranges
            }
            None => Vec::new(),
        };
        let delays = units.iter().map(|unit| unit.delay).collect();

        debug!(
            "planned {} units, {} animation ranges, {} diagnostics",
            units.len(),
            ranges.len(),
            diagnostics.len()
        );

        Self {
            display_text: sequence.display_text(),
            units,
            animations: AnimationPlan { ranges, delays },
            diagnostics,
        }
    }

    /// Markup handed to the rendering surface, directives removed.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn units(&self) -> &[TypableUnit] {
        &self.units
    }

    /// Number of printed units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn animations(&self) -> &AnimationPlan {
        &self.animations
    }

    pub fn diagnostics(&self) -> &[PlanDiagnostic] {
        &self.diagnostics
    }

    /// Time to type everything, including the pause after the last unit.
    pub fn total_duration(&self) -> Duration {
        self.units.iter().map(|unit| unit.delay).sum()
    }

    pub(crate) fn into_units(self) -> Vec<TypableUnit> {
        self.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationKind;
    use crate::presets::{PresetLibrary, ShakePreset};

    fn presets() -> Presets {
        Presets::new(
            PresetLibrary::new().with(ShakePreset::new("shake")),
            PresetLibrary::new(),
        )
    }

    #[test]
    fn requested_delay_replaces_default() {
        let plan = TypingPlan::build(
            "a.",
            &TyperConfig::default(),
            &Presets::default(),
            Some(Duration::from_millis(10)),
        );
        assert_eq!(
            plan.animations().delays,
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
        assert_eq!(plan.total_duration(), Duration::from_millis(30));
    }

    #[test]
    fn animations_can_be_disabled() {
        let config = TyperConfig::default().with_animations(false);
        let plan = TypingPlan::build("<anim=missing>AB</anim>", &config, &presets(), None);
        assert!(plan.animations().ranges.is_empty());
        assert!(plan.diagnostics().is_empty());
        assert_eq!(plan.display_text(), "AB");
    }

    #[test]
    fn markup_diagnostics_are_carried() {
        let plan = TypingPlan::build("<b><i>x</b></i>", &TyperConfig::default(), &presets(), None);
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan.diagnostics()[0], PlanDiagnostic::Markup(_)));
    }

    #[test]
    fn sprites_take_a_slot_in_ranges() {
        let plan = TypingPlan::build(
            "<shake=shake>a<sprite=0>b</shake>",
            &TyperConfig::default(),
            &presets(),
            None,
        );
        assert_eq!(plan.len(), 3);
        assert!(plan.units()[1].is_sprite());
        assert_eq!(
            plan.animations().ranges,
            vec![AnimationRange::new(0, 2, "shake", AnimationKind::Shake)]
        );
        assert_eq!(plan.animations().ranges_at(1).count(), 1);
    }

    #[test]
    fn empty_text_plans_nothing() {
        let plan = TypingPlan::build("", &TyperConfig::default(), &presets(), None);
        assert!(plan.is_empty());
        assert_eq!(plan.total_duration(), Duration::ZERO);
    }
}
