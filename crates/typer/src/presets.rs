//! Animation preset libraries.
//!
//! Animation directives name a preset by key. Keys are looked up
//! case-insensitively in a shake library and a curve library; the library
//! that holds the key decides the animation kind.

use tagtext::AnimationHint;

use crate::animation::AnimationKind;
use crate::error::PlanDiagnostic;

/// A preset that can be looked up by name.
pub trait NamedPreset {
    fn name(&self) -> &str;
}

/// Random jitter applied to each character in range.
#[derive(Clone, Debug, PartialEq)]
pub struct ShakePreset {
    pub name: String,
    pub x_strength: f32,
    pub y_strength: f32,
    pub rotation_strength: f32,
    pub scale_strength: f32,
}

impl ShakePreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_strength: 0.0,
            y_strength: 0.0,
            rotation_strength: 0.0,
            scale_strength: 0.0,
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x_strength = x;
        self.y_strength = y;
        self
    }

    pub fn with_rotation(mut self, strength: f32) -> Self {
        self.rotation_strength = strength;
        self
    }

    pub fn with_scale(mut self, strength: f32) -> Self {
        self.scale_strength = strength;
        self
    }
}

impl NamedPreset for ShakePreset {
    fn name(&self) -> &str {
        &self.name
    }
}

/// `(time, value)` keyframes of a motion curve. Sampling is left to the
/// animation sink.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    keys: Vec<(f32, f32)>,
}

impl Curve {
    /// Keyframes are sorted by time on construction.
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<_> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// A curve with no keyframes.
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }
}

/// Time-driven motion applied to each character in range.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePreset {
    pub name: String,
    /// Phase offset between consecutive characters, in seconds.
    pub time_offset_per_char: f32,
    pub x_curve: Curve,
    pub y_curve: Curve,
    pub rotation_curve: Curve,
    pub scale_curve: Curve,
    pub x_multiplier: f32,
    pub y_multiplier: f32,
    pub rotation_multiplier: f32,
    pub scale_multiplier: f32,
}

impl CurvePreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_offset_per_char: 0.0,
            x_curve: Curve::flat(),
            y_curve: Curve::flat(),
            rotation_curve: Curve::flat(),
            scale_curve: Curve::flat(),
            x_multiplier: 1.0,
            y_multiplier: 1.0,
            rotation_multiplier: 1.0,
            scale_multiplier: 1.0,
        }
    }

    pub fn with_time_offset(mut self, per_char: f32) -> Self {
        self.time_offset_per_char = per_char;
        self
    }

    pub fn with_y_curve(mut self, curve: Curve, multiplier: f32) -> Self {
        self.y_curve = curve;
        self.y_multiplier = multiplier;
        self
    }

    pub fn with_x_curve(mut self, curve: Curve, multiplier: f32) -> Self {
        self.x_curve = curve;
        self.x_multiplier = multiplier;
        self
    }
}

impl NamedPreset for CurvePreset {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Presets of one kind, keyed case-insensitively by name.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetLibrary<P> {
    presets: Vec<P>,
}

impl<P> Default for PresetLibrary<P> {
    fn default() -> Self {
        Self {
            presets: Vec::new(),
        }
    }
}

impl<P: NamedPreset> PresetLibrary<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a preset, replacing any preset with the same name.
    pub fn insert(&mut self, preset: P) {
        match self
            .presets
            .iter_mut()
            .find(|p| p.name().eq_ignore_ascii_case(preset.name()))
        {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn with(mut self, preset: P) -> Self {
        self.insert(preset);
        self
    }

    pub fn get(&self, key: &str) -> Option<&P> {
        self.presets
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.presets.iter()
    }
}

impl<P: NamedPreset> FromIterator<P> for PresetLibrary<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut library = Self::new();
        for preset in iter {
            library.insert(preset);
        }
        library
    }
}

/// A preset found by a combined lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Preset<'a> {
    Shake(&'a ShakePreset),
    Curve(&'a CurvePreset),
}

impl Preset<'_> {
    pub fn kind(&self) -> AnimationKind {
        match self {
            Preset::Shake(_) => AnimationKind::Shake,
            Preset::Curve(_) => AnimationKind::Curve,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Preset::Shake(p) => p.name(),
            Preset::Curve(p) => p.name(),
        }
    }
}

/// The shake and curve libraries consulted by animation directives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presets {
    pub shake: PresetLibrary<ShakePreset>,
    pub curve: PresetLibrary<CurvePreset>,
}

impl Presets {
    pub fn new(shake: PresetLibrary<ShakePreset>, curve: PresetLibrary<CurvePreset>) -> Self {
        Self { shake, curve }
    }

    /// Find `key` in exactly one library.
    pub fn lookup(&self, key: &str) -> Result<Preset<'_>, PlanDiagnostic> {
        match (self.shake.get(key), self.curve.get(key)) {
            (Some(shake), None) => Ok(Preset::Shake(shake)),
            (None, Some(curve)) => Ok(Preset::Curve(curve)),
            (Some(_), Some(_)) => Err(PlanDiagnostic::AmbiguousPreset(key.to_string())),
            (None, None) => Err(PlanDiagnostic::UnknownPreset(key.to_string())),
        }
    }

    /// Resolve the kind of an animation directive with the given hint.
    ///
    /// Directives that name their kind only consult the matching library.
    pub fn resolve(&self, key: &str, hint: AnimationHint) -> Result<AnimationKind, PlanDiagnostic> {
        match hint {
            AnimationHint::Lookup => self.lookup(key).map(|preset| preset.kind()),
            AnimationHint::Shake if self.shake.contains(key) => Ok(AnimationKind::Shake),
            AnimationHint::Curve if self.curve.contains(key) => Ok(AnimationKind::Curve),
            AnimationHint::Shake | AnimationHint::Curve => {
                Err(PlanDiagnostic::UnknownPreset(key.to_string()))
            }
        }
    }
}
