use std::sync::Arc;

use log::debug;

use crate::{
    template_directory::skip_malformed, Aligner, AlignmentObserver, MatcherConfig, NoopObserver,
    Sequence, SpeakerIdError, Template, TemplateDirectory, TemplateSet,
};

/// Label and distance of the template closest to an input sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestMatch {
    pub label: String,
    pub distance: f32,
}
impl ClosestMatch {
    /// True when no template reached a finite distance, either because there were no templates
    /// or because the strategy pruned every warping path.
    pub fn is_unknown(&self) -> bool {
        !self.distance.is_finite()
    }
}

/// Finds the template closest to an input sequence.
///
/// Templates are scanned in order, a template replaces the current best only with a strictly
/// smaller distance so ties keep the first one seen. Every comparison aligns the input
/// sequence against the template sequence, never the other way around.
pub struct TemplateMatcher {
    aligner: Aligner,
    unknown_label: String,
}
impl TemplateMatcher {
    pub fn new(config: &MatcherConfig) -> Result<Self, SpeakerIdError> {
        TemplateMatcher::with_observer(config, Arc::new(NoopObserver))
    }
    pub fn with_observer(
        config: &MatcherConfig,
        observer: Arc<dyn AlignmentObserver>,
    ) -> Result<Self, SpeakerIdError> {
        Ok(TemplateMatcher {
            aligner: Aligner::with_observer(config.strategy, observer)?,
            unknown_label: config.unknown_label.clone(),
        })
    }
    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }
    /// Fails when no template set is provided, an empty set gives the unknown label.
    pub fn best_match<const D: usize>(
        &self,
        input: &Sequence<D>,
        templates: Option<&TemplateSet<D>>,
    ) -> Result<ClosestMatch, SpeakerIdError> {
        let templates = templates.ok_or_else(|| {
            SpeakerIdError::InvalidInput("no template set provided".to_string())
        })?;
        Ok(self.best_match_in(input, templates))
    }
    pub fn best_match_in<'a, I, const D: usize>(&self, input: &Sequence<D>, templates: I) -> ClosestMatch
    where
        I: IntoIterator<Item = &'a Template<D>>,
    {
        self.aligner.observer().on_search_start();
        let mut best = self.unknown();
        for template in templates {
            self.keep_closest(&mut best, input, template);
        }
        self.finish_search(&best);
        best
    }
    /// Streams the templates from disk, reading one file per comparison.
    /// Files with a broken layout are skipped, a missing directory gives the unknown label.
    pub fn best_match_in_directory<const D: usize>(
        &self,
        input: &Sequence<D>,
        directory: &TemplateDirectory,
    ) -> Result<ClosestMatch, SpeakerIdError> {
        let observer = self.aligner.observer();
        observer.on_search_start();
        let mut best = self.unknown();
        let result = self.scan_directory(&mut best, input, directory);
        self.finish_search(&best);
        result.map(|_| best)
    }
    /// Index of the closest sequence, none when no sequence reaches a finite distance.
    /// Fails on an empty slice.
    pub fn best_match_index<const D: usize>(
        &self,
        input: &Sequence<D>,
        templates: &[Sequence<D>],
    ) -> Result<Option<usize>, SpeakerIdError> {
        if templates.is_empty() {
            return Err(SpeakerIdError::InvalidInput(
                "templates can not be empty".to_string(),
            ));
        }
        let mut min_distance = f32::INFINITY;
        let mut best_match_index = None;
        for (index, template) in templates.iter().enumerate() {
            let distance = self.aligner.align(input, template);
            if distance < min_distance {
                min_distance = distance;
                best_match_index = Some(index);
            }
        }
        Ok(best_match_index)
    }
    fn scan_directory<const D: usize>(
        &self,
        best: &mut ClosestMatch,
        input: &Sequence<D>,
        directory: &TemplateDirectory,
    ) -> Result<(), SpeakerIdError> {
        let observer = self.aligner.observer();
        for label in directory.labels()? {
            observer.on_load_start();
            let entry = directory.load::<D>(&label);
            observer.on_load_end();
            if let Some(template) = skip_malformed(entry)? {
                self.keep_closest(best, input, &template);
            }
        }
        Ok(())
    }
    fn keep_closest<const D: usize>(
        &self,
        best: &mut ClosestMatch,
        input: &Sequence<D>,
        template: &Template<D>,
    ) {
        let distance = self.aligner.align(input, &template.sequence);
        debug!("Template '{}' distance: {}", template.label, distance);
        if distance < best.distance {
            best.distance = distance;
            best.label = template.label.clone();
        }
    }
    fn finish_search(&self, best: &ClosestMatch) {
        debug!(
            "Closest template '{}' (distance {}, strategy {})",
            best.label,
            best.distance,
            self.aligner.strategy()
        );
        self.aligner.observer().on_search_end(best);
    }
    fn unknown(&self) -> ClosestMatch {
        ClosestMatch {
            label: self.unknown_label.clone(),
            distance: f32::INFINITY,
        }
    }
}
