use std::sync::Arc;

use crate::{
    internal::{euclidean_distance, Corridor, Dtw, RowPruning, Transitions},
    AlignmentObserver, AlignmentStrategy, Frame, NoopObserver, Sequence, SpeakerIdError,
};

/// Computes the alignment cost between an input sequence and a template sequence.
///
/// The aligner keeps no state between calls, the rolling rows live for a single alignment.
/// Pruned strategies are not symmetric, the first argument is always the input utterance.
pub struct Aligner {
    strategy: AlignmentStrategy,
    observer: Arc<dyn AlignmentObserver>,
}
impl Aligner {
    pub fn new(strategy: AlignmentStrategy) -> Result<Self, SpeakerIdError> {
        Aligner::with_observer(strategy, Arc::new(NoopObserver))
    }
    pub fn with_observer(
        strategy: AlignmentStrategy,
        observer: Arc<dyn AlignmentObserver>,
    ) -> Result<Self, SpeakerIdError> {
        strategy.validate()?;
        Ok(Aligner { strategy, observer })
    }
    pub fn strategy(&self) -> AlignmentStrategy {
        self.strategy
    }
    /// Lower is closer. [`f32::INFINITY`] means no warping path survived the strategy constraints.
    pub fn align<const D: usize>(&self, input: &Sequence<D>, template: &Sequence<D>) -> f32 {
        self.observer.on_alignment_start();
        let cost = self
            .build_dtw::<D>()
            .compute_cost(input.frames(), template.frames());
        self.observer.on_alignment_end(cost);
        cost
    }
    pub(crate) fn observer(&self) -> &dyn AlignmentObserver {
        self.observer.as_ref()
    }
    fn build_dtw<const D: usize>(&self) -> Dtw<Frame<D>> {
        let (corridor, transitions, pruning) = match self.strategy {
            AlignmentStrategy::Full => (
                Corridor::FullRow,
                Transitions::TemplateWarp,
                RowPruning::None,
            ),
            AlignmentStrategy::Window { window_size } => (
                Corridor::FixedWindow { window_size },
                Transitions::TemplateWarp,
                RowPruning::None,
            ),
            AlignmentStrategy::Beam {
                window_size,
                beam_threshold,
            } => (
                Corridor::DiagonalWindow { window_size },
                Transitions::TwoRowLookBack,
                RowPruning::Beam {
                    threshold: beam_threshold,
                },
            ),
        };
        Dtw::new(euclidean_distance::<D>, corridor, transitions, pruning)
    }
}
