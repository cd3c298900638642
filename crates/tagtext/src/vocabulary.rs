//! Tag vocabulary: which tag types are forwarded to the rendering surface,
//! which are consumed as directives, and which stand in for sprites.
//!
//! The vocabulary is plain configuration passed to the parser, so tests can
//! use their own without touching shared state.

/// How an animation directive picks its preset kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationHint {
    /// Look the key up in every preset registry (`<anim=key>`).
    Lookup,
    /// The directive itself names a shake animation (`<shake=key>`).
    Shake,
    /// The directive itself names a curve animation (`<curve=key>`).
    Curve,
}

/// Side-channel directives that never reach the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Per-character delay override (`<delay=0.1>`).
    Timing,
    /// Animation range marker (`<anim=wobble>`).
    Animation(AnimationHint),
}

/// Classification of a tag type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagClass {
    Passthrough,
    Directive(DirectiveKind),
    Sprite,
    Unknown,
}

/// Recognized tag types, matched ASCII case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagVocabulary {
    passthrough: Vec<String>,
    timing: Vec<String>,
    animation: Vec<(String, AnimationHint)>,
    sprite: Vec<String>,
    color: Vec<String>,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::empty()
            .with_passthrough("b")
            .with_passthrough("i")
            .with_passthrough("size")
            .with_passthrough("color")
            .with_color_type("color")
            .with_timing("delay")
            .with_timing("speed")
            .with_animation("anim", AnimationHint::Lookup)
            .with_animation("animation", AnimationHint::Lookup)
            .with_animation("shake", AnimationHint::Shake)
            .with_animation("curve", AnimationHint::Curve)
            .with_sprite("sprite")
    }
}

impl TagVocabulary {
    /// A vocabulary that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            passthrough: Vec::new(),
            timing: Vec::new(),
            animation: Vec::new(),
            sprite: Vec::new(),
            color: Vec::new(),
        }
    }

    /// Forward tags of this type to the rendering surface.
    pub fn with_passthrough(mut self, type_name: impl Into<String>) -> Self {
        self.passthrough.push(type_name.into());
        self
    }

    /// Consume tags of this type as delay overrides.
    pub fn with_timing(mut self, type_name: impl Into<String>) -> Self {
        self.timing.push(type_name.into());
        self
    }

    /// Consume tags of this type as animation range markers.
    pub fn with_animation(mut self, type_name: impl Into<String>, hint: AnimationHint) -> Self {
        self.animation.push((type_name.into(), hint));
        self
    }

    /// Treat tags of this type as a printable sprite.
    pub fn with_sprite(mut self, type_name: impl Into<String>) -> Self {
        self.sprite.push(type_name.into());
        self
    }

    /// Mark a passthrough type as a color tag. Color tags cannot be nested
    /// inside the transparent wrapper used for hidden text.
    pub fn with_color_type(mut self, type_name: impl Into<String>) -> Self {
        self.color.push(type_name.into());
        self
    }

    /// Classify a tag type. Directives win over sprites, sprites over
    /// passthrough tags.
    pub fn classify(&self, type_name: &str) -> TagClass {
        if contains(&self.timing, type_name) {
            return TagClass::Directive(DirectiveKind::Timing);
        }
        if let Some((_, hint)) = self
            .animation
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
        {
            return TagClass::Directive(DirectiveKind::Animation(*hint));
        }
        if contains(&self.sprite, type_name) {
            return TagClass::Sprite;
        }
        if contains(&self.passthrough, type_name) {
            return TagClass::Passthrough;
        }
        TagClass::Unknown
    }

    pub fn is_directive(&self, type_name: &str) -> bool {
        matches!(self.classify(type_name), TagClass::Directive(_))
    }

    pub fn is_color_type(&self, type_name: &str) -> bool {
        contains(&self.color, type_name)
    }
}

fn contains(names: &[String], type_name: &str) -> bool {
    names.iter().any(|name| name.eq_ignore_ascii_case(type_name))
}
