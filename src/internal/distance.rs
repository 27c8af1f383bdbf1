use crate::Frame;

pub(crate) fn euclidean_distance<const D: usize>(frame_a: Frame<D>, frame_b: Frame<D>) -> f32 {
    let mut sum = 0.;
    for (component_a, component_b) in frame_a.coefficients().iter().zip(frame_b.coefficients()) {
        let diff = component_a - component_b;
        sum += diff * diff;
    }
    f32::sqrt(sum)
}
