mod aligner;
mod config;
mod constants;
mod error;
mod evaluation;
mod internal;
mod matcher;
mod observer;
mod sequence;
mod template;
mod template_directory;
mod template_serde;
mod template_text;
pub use aligner::Aligner;
pub use config::AlignmentStrategy;
pub use config::MatcherConfig;
pub use constants::DEFAULT_BEAM_THRESHOLD;
pub use constants::DEFAULT_WINDOW_SIZE;
pub use constants::FRAME_COEFFICIENTS;
pub use constants::TEMPLATE_DECIMALS;
pub use constants::TEMPLATE_FILE_EXTENSION;
pub use constants::UNKNOWN_LABEL;
pub use error::SpeakerIdError;
pub use evaluation::{concatenate_utterances, evaluate, EvaluationReport};
pub use matcher::{ClosestMatch, TemplateMatcher};
pub use observer::{AlignmentObserver, MatchTimer, NoopObserver, TimingSummary};
pub use sequence::{Frame, Sequence};
pub use template::{Template, TemplateSet};
pub use template_directory::{TemplateDirectory, TemplateEntries};
pub use template_serde::{TemplateLoad, TemplateSave};
pub use template_text::{decode_template, encode_template, DecodedTemplate};
