use log::warn;

use crate::{
    constants::{FRAME_COEFFICIENTS, TEMPLATE_DECIMALS, TEMPLATE_VALUE_SEPARATOR},
    Sequence, SpeakerIdError, Template,
};

/// Template decoded from its text encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTemplate<const D: usize = FRAME_COEFFICIENTS> {
    pub template: Template<D>,
    /// Values that could not be parsed and were replaced by zero.
    pub malformed_values: usize,
}

/// Encodes the sequence as `D` lines, line `k` holding coefficient `k` of every frame
/// with six decimals, separated by `|`.
pub fn encode_template<const D: usize>(sequence: &Sequence<D>) -> String {
    let mut text = String::new();
    for coefficient_index in 0..D {
        for (frame_index, frame) in sequence.frames().iter().enumerate() {
            if frame_index > 0 {
                text.push(TEMPLATE_VALUE_SEPARATOR);
            }
            text.push_str(&format!(
                "{:.*}",
                TEMPLATE_DECIMALS,
                frame.coefficients()[coefficient_index]
            ));
        }
        text.push('\n');
    }
    text
}

/// Decodes a template encoded by [`encode_template`].
///
/// The frame count is taken from the first line and every coefficient line must match it.
/// Values that do not parse as finite numbers are replaced by zero, logged and counted.
/// Lines after the `D`-th one are ignored.
pub fn decode_template<const D: usize>(
    label: &str,
    text: &str,
) -> Result<DecodedTemplate<D>, SpeakerIdError> {
    let format_error = |reason: String| SpeakerIdError::TemplateFormat {
        label: label.to_string(),
        reason,
    };
    let mut lines = text.lines();
    let mut coefficients: Vec<[f32; D]> = Vec::new();
    let mut malformed_values = 0;
    for coefficient_index in 0..D {
        let line = lines
            .next()
            .map(|line| line.trim_end_matches('\r'))
            .ok_or_else(|| {
                format_error(format!(
                    "expected {} coefficient lines, found {}",
                    D, coefficient_index
                ))
            })?;
        if coefficient_index == 0 {
            if line.trim().is_empty() {
                return Err(format_error("template has no frames".to_string()));
            }
            let frame_count = line.split(TEMPLATE_VALUE_SEPARATOR).count();
            coefficients = vec![[0.; D]; frame_count];
        }
        let mut frame_count = 0;
        for token in line.split(TEMPLATE_VALUE_SEPARATOR) {
            let Some(frame) = coefficients.get_mut(frame_count) else {
                frame_count += 1;
                continue;
            };
            frame[coefficient_index] = match token.trim().parse::<f32>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    warn!(
                        "Unable to parse value '{}' of template '{}' (coefficient {}, frame {}), using 0",
                        token, label, coefficient_index, frame_count
                    );
                    malformed_values += 1;
                    0.
                }
            };
            frame_count += 1;
        }
        if frame_count != coefficients.len() {
            return Err(format_error(format!(
                "coefficient line {} has {} frames, expected {}",
                coefficient_index,
                frame_count,
                coefficients.len()
            )));
        }
    }
    let sequence = Sequence::from_coefficients(coefficients).map_err(|err| format_error(err.to_string()))?;
    Ok(DecodedTemplate {
        template: Template::new(label, sequence),
        malformed_values,
    })
}
