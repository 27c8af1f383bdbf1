use std::{fs::File, io::BufReader, path::Path};

use ciborium::{de, ser};
use serde::{de::DeserializeOwned, Serialize};

use crate::SpeakerIdError;

/// Writes the value as a binary bundle.
pub trait TemplateSave: Serialize {
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SpeakerIdError> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| SpeakerIdError::io(path, err))?;
        ser::into_writer(self, &mut file).map_err(|err| SpeakerIdError::Bundle(err.to_string()))?;
        Ok(())
    }
    fn save_to_buffer(&self) -> Result<Vec<u8>, SpeakerIdError> {
        let mut bytes: Vec<u8> = Vec::new();
        ser::into_writer(self, &mut bytes).map_err(|err| SpeakerIdError::Bundle(err.to_string()))?;
        Ok(bytes)
    }
}
/// Reads the value back from a binary bundle.
pub trait TemplateLoad: DeserializeOwned + Sized {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpeakerIdError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| SpeakerIdError::io(path, err))?;
        let reader = BufReader::new(file);
        de::from_reader(reader).map_err(|err| SpeakerIdError::Bundle(err.to_string()))
    }
    fn load_from_buffer(buffer: &[u8]) -> Result<Self, SpeakerIdError> {
        de::from_reader(buffer).map_err(|err| SpeakerIdError::Bundle(err.to_string()))
    }
}
