use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    constants::TEMPLATE_FILE_EXTENSION, decode_template, encode_template, DecodedTemplate,
    Sequence, SpeakerIdError, Template, TemplateSet,
};

/// Disk-backed template set, one `<label>.txt` text template per label.
///
/// Labels are enumerated in sorted order so matching against the directory is deterministic.
pub struct TemplateDirectory {
    path: PathBuf,
}
impl TemplateDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TemplateDirectory { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Writes the template for label, replacing any previous one.
    /// The directory is created when missing.
    pub fn save<const D: usize>(
        &self,
        label: &str,
        sequence: &Sequence<D>,
    ) -> Result<(), SpeakerIdError> {
        validate_label(label)?;
        fs::create_dir_all(&self.path).map_err(|err| SpeakerIdError::io(&self.path, err))?;
        let template_path = self.template_path(label);
        fs::write(&template_path, encode_template(sequence))
            .map_err(|err| SpeakerIdError::io(&template_path, err))?;
        debug!(
            "Saved template '{}' ({} frames) to {}",
            label,
            sequence.len(),
            template_path.display()
        );
        Ok(())
    }
    pub fn contains(&self, label: &str) -> bool {
        validate_label(label).is_ok() && self.template_path(label).is_file()
    }
    /// Sorted labels of the stored templates. A missing directory holds no templates.
    pub fn labels(&self) -> Result<Vec<String>, SpeakerIdError> {
        if !self.path.is_dir() {
            warn!(
                "Template directory \"{}\" not found!",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.path).map_err(|err| SpeakerIdError::io(&self.path, err))?;
        let mut labels = Vec::new();
        for entry in entries {
            let entry_path = entry
                .map_err(|err| SpeakerIdError::io(&self.path, err))?
                .path();
            if !entry_path.is_file()
                || entry_path.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_FILE_EXTENSION)
            {
                continue;
            }
            let Some(label) = entry_path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if let Err(err) = validate_label(label) {
                warn!("Ignoring {}: {}", entry_path.display(), err);
                continue;
            }
            labels.push(label.to_string());
        }
        labels.sort();
        Ok(labels)
    }
    pub fn load<const D: usize>(&self, label: &str) -> Result<DecodedTemplate<D>, SpeakerIdError> {
        validate_label(label)?;
        let template_path = self.template_path(label);
        let bytes =
            fs::read(&template_path).map_err(|err| SpeakerIdError::io(&template_path, err))?;
        decode_template(label, &String::from_utf8_lossy(&bytes))
    }
    /// Lazily reads and decodes the templates one file at a time.
    pub fn entries<const D: usize>(&self) -> Result<TemplateEntries<'_, D>, SpeakerIdError> {
        Ok(TemplateEntries {
            directory: self,
            labels: self.labels()?.into_iter(),
        })
    }
    /// Loads every template in memory. Structurally broken files are skipped.
    pub fn load_all<const D: usize>(&self) -> Result<TemplateSet<D>, SpeakerIdError> {
        let mut templates = TemplateSet::new();
        for entry in self.entries::<D>()? {
            if let Some(template) = skip_malformed(entry)? {
                templates.push(template);
            }
        }
        Ok(templates)
    }
    fn template_path(&self, label: &str) -> PathBuf {
        self.path
            .join(format!("{}.{}", label, TEMPLATE_FILE_EXTENSION))
    }
}

/// Iterator over the templates of a [`TemplateDirectory`], in label order.
pub struct TemplateEntries<'a, const D: usize> {
    directory: &'a TemplateDirectory,
    labels: std::vec::IntoIter<String>,
}
impl<'a, const D: usize> Iterator for TemplateEntries<'a, D> {
    type Item = Result<DecodedTemplate<D>, SpeakerIdError>;
    fn next(&mut self) -> Option<Self::Item> {
        let label = self.labels.next()?;
        Some(self.directory.load(&label))
    }
}

/// Drops templates with a broken layout, other errors are propagated.
pub(crate) fn skip_malformed<const D: usize>(
    entry: Result<DecodedTemplate<D>, SpeakerIdError>,
) -> Result<Option<Template<D>>, SpeakerIdError> {
    match entry {
        Ok(decoded) => Ok(Some(decoded.template)),
        Err(err @ SpeakerIdError::TemplateFormat { .. }) => {
            warn!("Skipping template: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn validate_label(label: &str) -> Result<(), SpeakerIdError> {
    if label.is_empty() || label.contains(['/', '\\']) || label == "." || label == ".." {
        return Err(SpeakerIdError::InvalidInput(format!(
            "\"{}\" is not a valid template label",
            label
        )));
    }
    Ok(())
}
