use serde::{Deserialize, Serialize};

use crate::{constants::FRAME_COEFFICIENTS, Sequence, TemplateLoad, TemplateSave};

/// Enrolled reference sequence for a speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template<const D: usize = FRAME_COEFFICIENTS> {
    pub label: String,
    pub sequence: Sequence<D>,
}
impl<const D: usize> Template<D> {
    pub fn new(label: impl Into<String>, sequence: Sequence<D>) -> Self {
        Template {
            label: label.into(),
            sequence,
        }
    }
}

/// Ordered collection of templates. Labels can repeat, a speaker can enroll several samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet<const D: usize = FRAME_COEFFICIENTS> {
    templates: Vec<Template<D>>,
}
impl<const D: usize> TemplateSet<D> {
    pub fn new() -> Self {
        TemplateSet {
            templates: Vec::new(),
        }
    }
    pub fn push(&mut self, template: Template<D>) {
        self.templates.push(template);
    }
    pub fn add(&mut self, label: impl Into<String>, sequence: Sequence<D>) {
        self.push(Template::new(label, sequence));
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Template<D>> {
        self.templates.iter()
    }
    pub fn len(&self) -> usize {
        self.templates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
    /// Distinct labels in enrollment order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for template in &self.templates {
            if !labels.contains(&template.label.as_str()) {
                labels.push(&template.label);
            }
        }
        labels
    }
}
impl<const D: usize> FromIterator<Template<D>> for TemplateSet<D> {
    fn from_iter<I: IntoIterator<Item = Template<D>>>(iter: I) -> Self {
        TemplateSet {
            templates: iter.into_iter().collect(),
        }
    }
}
impl<'a, const D: usize> IntoIterator for &'a TemplateSet<D> {
    type Item = &'a Template<D>;
    type IntoIter = std::slice::Iter<'a, Template<D>>;
    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
impl<const D: usize> TemplateSave for TemplateSet<D> {}
impl<const D: usize> TemplateLoad for TemplateSet<D> {}
