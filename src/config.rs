use crate::constants::{DEFAULT_BEAM_THRESHOLD, DEFAULT_WINDOW_SIZE, UNKNOWN_LABEL};
use crate::SpeakerIdError;

/// Indicates how the alignment cost between two sequences is computed.
///
/// Costs are only comparable between alignments run with the same strategy and parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignmentStrategy {
    /// Evaluates the whole grid. Exact, O(M·N).
    Full,
    /// Evaluates the columns around the row index.
    /// The window is widened to twice the length difference when narrower.
    Window { window_size: usize },
    /// Evaluates the columns around the diagonal projection of each row and
    /// drops the cells costing more than the row minimum plus the beam threshold.
    /// Can produce an infinite cost when every path gets pruned.
    Beam {
        window_size: usize,
        beam_threshold: f32,
    },
}
impl AlignmentStrategy {
    pub fn window() -> Self {
        AlignmentStrategy::Window {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
    pub fn beam() -> Self {
        AlignmentStrategy::Beam {
            window_size: DEFAULT_WINDOW_SIZE,
            beam_threshold: DEFAULT_BEAM_THRESHOLD,
        }
    }
    pub(crate) fn validate(&self) -> Result<(), SpeakerIdError> {
        if let AlignmentStrategy::Beam { beam_threshold, .. } = *self {
            if beam_threshold.is_nan() || beam_threshold < 0. {
                return Err(SpeakerIdError::InvalidInput(format!(
                    "beam threshold must be a non negative number, got {}",
                    beam_threshold
                )));
            }
        }
        Ok(())
    }
}
impl Default for AlignmentStrategy {
    fn default() -> Self {
        AlignmentStrategy::Full
    }
}
impl std::fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            AlignmentStrategy::Full => write!(f, "full"),
            AlignmentStrategy::Window { .. } => write!(f, "window"),
            AlignmentStrategy::Beam { .. } => write!(f, "beam"),
        }
    }
}
impl std::str::FromStr for AlignmentStrategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "window" => Ok(Self::window()),
            "beam" => Ok(Self::beam()),
            _ => Err("Unknown alignment strategy".to_string()),
        }
    }
}

/// Configures the template matcher.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Alignment strategy used for every template comparison.
    pub strategy: AlignmentStrategy,
    /// Label reported when no template reaches a finite distance.
    pub unknown_label: String,
}
impl Default for MatcherConfig {
    fn default() -> MatcherConfig {
        MatcherConfig {
            strategy: AlignmentStrategy::Full,
            unknown_label: UNKNOWN_LABEL.to_string(),
        }
    }
}
