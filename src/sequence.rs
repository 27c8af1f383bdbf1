use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{constants::FRAME_COEFFICIENTS, internal::euclidean_distance, SpeakerIdError};

/// A single feature vector of `D` coefficients, one time slice of an utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<const D: usize = FRAME_COEFFICIENTS>([f32; D]);

impl<const D: usize> Frame<D> {
    pub fn new(coefficients: [f32; D]) -> Self {
        Frame(coefficients)
    }
    pub fn coefficients(&self) -> &[f32; D] {
        &self.0
    }
    /// Euclidean distance between both coefficient vectors.
    pub fn distance(&self, other: &Frame<D>) -> f32 {
        euclidean_distance(*self, *other)
    }
}
impl<const D: usize> From<[f32; D]> for Frame<D> {
    fn from(coefficients: [f32; D]) -> Self {
        Frame(coefficients)
    }
}
impl<const D: usize> TryFrom<Vec<f32>> for Frame<D> {
    type Error = SpeakerIdError;
    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        let len = values.len();
        let coefficients: [f32; D] = values.try_into().map_err(|_| {
            SpeakerIdError::InvalidInput(format!(
                "frame expects {} coefficients, got {}",
                D, len
            ))
        })?;
        Ok(Frame(coefficients))
    }
}
impl<const D: usize> Serialize for Frame<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
impl<'de, const D: usize> Deserialize<'de> for Frame<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        Frame::try_from(values).map_err(de::Error::custom)
    }
}

/// Ordered, non-empty list of frames representing one utterance or template.
///
/// Sequences are read only once built, the alignment engine never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<const D: usize = FRAME_COEFFICIENTS> {
    frames: Vec<Frame<D>>,
}

impl<const D: usize> Sequence<D> {
    /// Fails with [`SpeakerIdError::InvalidInput`] when no frames are provided.
    pub fn new(frames: Vec<Frame<D>>) -> Result<Self, SpeakerIdError> {
        if frames.is_empty() {
            return Err(SpeakerIdError::InvalidInput(
                "a sequence needs at least one frame".to_string(),
            ));
        }
        Ok(Sequence { frames })
    }
    pub fn from_coefficients(coefficients: Vec<[f32; D]>) -> Result<Self, SpeakerIdError> {
        Sequence::new(coefficients.into_iter().map(Frame::new).collect())
    }
    pub fn frames(&self) -> &[Frame<D>] {
        &self.frames
    }
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    /// Always false, kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
    /// Appends the frames of other at the end of this sequence.
    pub fn concat(&self, other: &Sequence<D>) -> Sequence<D> {
        let mut frames = Vec::with_capacity(self.len() + other.len());
        frames.extend_from_slice(&self.frames);
        frames.extend_from_slice(&other.frames);
        Sequence { frames }
    }
}
impl<const D: usize> TryFrom<Vec<Frame<D>>> for Sequence<D> {
    type Error = SpeakerIdError;
    fn try_from(frames: Vec<Frame<D>>) -> Result<Self, Self::Error> {
        Sequence::new(frames)
    }
}
impl<const D: usize> Serialize for Sequence<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.frames.iter())
    }
}
impl<'de, const D: usize> Deserialize<'de> for Sequence<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let frames = Vec::<Frame<D>>::deserialize(deserializer)?;
        Sequence::new(frames).map_err(de::Error::custom)
    }
}
