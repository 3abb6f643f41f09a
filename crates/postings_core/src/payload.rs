use std::path::PathBuf;

use crate::encoder::CSV_MEDIA_TYPE;

/// Filename used for payloads generated from the form.
pub const FORM_PAYLOAD_FILENAME: &str = "document.csv";

/// Where payload bytes come from.
///
/// `FileHandle` is resolved by whoever executes the upload, once per upload;
/// the core never touches the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Bytes(Vec<u8>),
    FileHandle(PathBuf),
}

/// A file the user picked for upload, as reported by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: Option<String>,
    pub source: PayloadSource,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>, media_type: Option<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            media_type,
            source: PayloadSource::FileHandle(path),
        }
    }

    /// Accepts a declared `text/csv` media type (parameters ignored) or a
    /// `.csv` extension; either is enough.
    pub fn looks_like_csv(&self) -> bool {
        let by_type = self
            .media_type
            .as_deref()
            .map(|mime| {
                let essence = mime.split(';').next().unwrap_or(mime).trim();
                essence.eq_ignore_ascii_case(CSV_MEDIA_TYPE)
            })
            .unwrap_or(false);
        let by_extension = self
            .name
            .rsplit_once('.')
            .map(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        by_type || by_extension
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Only CSV files (.csv or text/csv) can be uploaded.")]
pub struct InvalidFileError {
    pub name: String,
    pub media_type: Option<String>,
}

/// Immutable upload body: exactly one record encoding or one user file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPayload {
    filename: String,
    media_type: &'static str,
    source: PayloadSource,
}

impl CsvPayload {
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Self {
        Self {
            filename: FORM_PAYLOAD_FILENAME.to_string(),
            media_type: CSV_MEDIA_TYPE,
            source: PayloadSource::Bytes(bytes),
        }
    }

    pub(crate) fn from_file(file: SelectedFile) -> Result<Self, InvalidFileError> {
        if !file.looks_like_csv() {
            return Err(InvalidFileError {
                name: file.name,
                media_type: file.media_type,
            });
        }
        Ok(Self {
            filename: file.name,
            media_type: CSV_MEDIA_TYPE,
            source: file.source,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn source(&self) -> &PayloadSource {
        &self.source
    }

    pub fn into_parts(self) -> (String, &'static str, PayloadSource) {
        (self.filename, self.media_type, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: Option<&str>) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            media_type: media_type.map(str::to_string),
            source: PayloadSource::Bytes(Vec::new()),
        }
    }

    #[test]
    fn csv_check_accepts_type_or_extension() {
        assert!(file("report.csv", None).looks_like_csv());
        assert!(file("REPORT.CSV", Some("application/octet-stream")).looks_like_csv());
        assert!(file("export", Some("text/csv; charset=utf-8")).looks_like_csv());
        assert!(file("export", Some("Text/CSV")).looks_like_csv());
    }

    #[test]
    fn csv_check_rejects_everything_else() {
        assert!(!file("report.xlsx", None).looks_like_csv());
        assert!(!file("report.csv.txt", Some("text/plain")).looks_like_csv());
        assert!(!file(".csv", None).looks_like_csv());
        assert!(!file("csv", Some("text/csvx")).looks_like_csv());
    }

    #[test]
    fn from_path_uses_file_name() {
        let selected = SelectedFile::from_path("/tmp/in/report.csv", None);
        assert_eq!(selected.name, "report.csv");
        assert_eq!(
            selected.source,
            PayloadSource::FileHandle(PathBuf::from("/tmp/in/report.csv"))
        );
    }
}
