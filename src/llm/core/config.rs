//! Sampling parameters sent with every completion

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Chat completions accept at most this many stop sequences
pub const MAX_STOP_SEQUENCES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on the reply length
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerationConfig {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: None,
            top_p: None,
            stop_sequences: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// An empty list clears the stop sequences
    pub fn with_stop_sequences<I, S>(mut self, stop_sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stops: Vec<String> = stop_sequences.into_iter().map(Into::into).collect();
        self.stop_sequences = if stops.is_empty() { None } else { Some(stops) };
        self
    }

    /// Check the values against the ranges the completions API accepts
    pub fn check(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be at least 1".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("temperature {} is outside 0.0..=2.0", t));
            }
        }
        if let Some(p) = self.top_p {
            if !(p > 0.0 && p <= 1.0) {
                return Err(format!("top_p {} is outside (0.0, 1.0]", p));
            }
        }
        if let Some(stops) = &self.stop_sequences {
            if stops.len() > MAX_STOP_SEQUENCES {
                return Err(format!(
                    "at most {} stop sequences are allowed, got {}",
                    MAX_STOP_SEQUENCES,
                    stops.len()
                ));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_leaves_sampling_to_the_deployment() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.temperature, None);
        assert_eq!(config.top_p, None);
        assert_eq!(config.stop_sequences, None);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_empty_stop_list_is_unset() {
        let config = GenerationConfig::new(64).with_stop_sequences(Vec::<String>::new());
        assert_eq!(config.stop_sequences, None);

        let config = GenerationConfig::new(64).with_stop_sequences(["END", "###"]);
        assert_eq!(
            config.stop_sequences,
            Some(vec!["END".to_string(), "###".to_string()])
        );
    }

    #[test]
    fn test_check_ranges() {
        assert!(GenerationConfig::new(0).check().is_err());
        assert!(GenerationConfig::new(64).with_temperature(2.5).check().is_err());
        assert!(GenerationConfig::new(64).with_top_p(0.0).check().is_err());
        assert!(GenerationConfig::new(64).with_top_p(1.0).check().is_ok());
        assert!(GenerationConfig::new(64)
            .with_stop_sequences(["a", "b", "c", "d", "e"])
            .check()
            .is_err());
    }
}
