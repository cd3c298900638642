//! Typing configuration.

use std::time::Duration;

use tagtext::TagVocabulary;

/// Characters that get a longer pause by default.
pub const DEFAULT_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// Which clock the scheduler waits on between units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockMode {
    /// Host-frame time, multiplied by the scheduler's [`TimeScale`](crate::TimeScale).
    #[default]
    Scaled,
    /// Wall-clock time, unaffected by time scaling.
    Unscaled,
}

/// Options recognized by the typing layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TyperConfig {
    /// Delay between units when no override is active.
    pub default_delay: Duration,
    /// Factor applied to the delay of punctuation characters.
    pub punctuation_multiplier: f64,
    pub punctuation: Vec<char>,
    /// Extract animation ranges from animation directives.
    pub animations_enabled: bool,
    pub clock_mode: ClockMode,
    /// Length of one host frame for [`ClockMode::Scaled`].
    pub frame_interval: Duration,
    pub vocabulary: TagVocabulary,
}

impl Default for TyperConfig {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_millis(50),
            punctuation_multiplier: 2.0,
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            animations_enabled: true,
            clock_mode: ClockMode::Scaled,
            frame_interval: Duration::from_secs(1) / 60,
            vocabulary: TagVocabulary::default(),
        }
    }
}

impl TyperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn with_punctuation_multiplier(mut self, multiplier: f64) -> Self {
        self.punctuation_multiplier = multiplier;
        self
    }

    pub fn with_punctuation(mut self, punctuation: impl IntoIterator<Item = char>) -> Self {
        self.punctuation = punctuation.into_iter().collect();
        self
    }

    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.animations_enabled = enabled;
        self
    }

    pub fn with_clock_mode(mut self, mode: ClockMode) -> Self {
        self.clock_mode = mode;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: TagVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    /// The default delay for one request: `requested` when it is positive,
    /// the configured default otherwise.
    pub fn request_delay(&self, requested: Option<Duration>) -> Duration {
        requested
            .filter(|delay| !delay.is_zero())
            .unwrap_or(self.default_delay)
    }

    /// `delay` scaled by the punctuation multiplier.
    ///
    /// A multiplier that is negative or not finite leaves `delay` unchanged.
    pub fn punctuation_delay(&self, delay: Duration) -> Duration {
        Duration::try_from_secs_f64(delay.as_secs_f64() * self.punctuation_multiplier)
            .unwrap_or(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TyperConfig::default();
        assert_eq!(config.default_delay, Duration::from_millis(50));
        assert_eq!(config.punctuation_multiplier, 2.0);
        assert!(config.is_punctuation('?'));
        assert!(!config.is_punctuation(';'));
        assert_eq!(config.clock_mode, ClockMode::Scaled);
    }

    #[test]
    fn request_delay_prefers_positive_override() {
        let config = TyperConfig::default();
        assert_eq!(
            config.request_delay(Some(Duration::from_millis(10))),
            Duration::from_millis(10)
        );
        assert_eq!(config.request_delay(Some(Duration::ZERO)), config.default_delay);
        assert_eq!(config.request_delay(None), config.default_delay);
    }

    #[test]
    fn punctuation_delay_multiplies() {
        let config = TyperConfig::default().with_punctuation_multiplier(4.0);
        assert_eq!(
            config.punctuation_delay(Duration::from_millis(25)),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn bad_multiplier_is_ignored() {
        let config = TyperConfig::default().with_punctuation_multiplier(-1.0);
        assert_eq!(
            config.punctuation_delay(Duration::from_millis(25)),
            Duration::from_millis(25)
        );
    }
}
