//! DOCX Document wrapper

use crate::{DocxError, Result};
use regex::Regex;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::sync::OnceLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the main document part inside every WordprocessingML package
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// A single archive entry, kept in its original order
#[derive(Debug, Clone)]
struct Entry {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
}

/// DOCX document held fully in memory
///
/// The archive is read once; parts can then be inspected and replaced
/// before the whole package is written back out. Entry order is preserved
/// so `[Content_Types].xml` stays first when the source had it first.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    entries: Vec<Entry>,
}

impl DocxDocument {
    /// Open a DOCX document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open_from_bytes(&bytes)
    }

    /// Open a DOCX document from raw bytes
    ///
    /// Fails with [`DocxError::OpenError`] when the bytes are not a zip
    /// archive or the archive has no `word/document.xml`.
    pub fn open_from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocxError::OpenError(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            let is_dir = file.is_dir();

            let mut data = Vec::with_capacity(file.size() as usize);
            if !is_dir {
                file.read_to_end(&mut data)?;
            }

            entries.push(Entry { name, data, is_dir });
        }

        let doc = Self { entries };
        if !doc.has_part(MAIN_DOCUMENT_PART) {
            return Err(DocxError::OpenError(format!(
                "archive has no {MAIN_DOCUMENT_PART}"
            )));
        }

        Ok(doc)
    }

    /// Build a document from `(name, bytes)` pairs
    ///
    /// No validation is performed; this is meant for assembling packages
    /// in code (fixtures, generated templates).
    pub fn from_parts<I, N, D>(parts: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Vec<u8>>,
    {
        let entries = parts
            .into_iter()
            .map(|(name, data)| Entry {
                name: name.into(),
                data: data.into(),
                is_dir: false,
            })
            .collect();
        Self { entries }
    }

    /// Names of all file parts in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name.as_str())
    }

    /// Check whether a part exists
    pub fn has_part(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Get the raw bytes of a part
    pub fn part(&self, name: &str) -> Result<&[u8]> {
        self.find(name)
            .map(|e| e.data.as_slice())
            .ok_or_else(|| DocxError::PartNotFound(name.to_string()))
    }

    /// Get a part decoded as UTF-8 text
    pub fn part_text(&self, name: &str) -> Result<&str> {
        let data = self.part(name)?;
        std::str::from_utf8(data).map_err(|e| DocxError::InvalidUtf8(format!("{name}: {e}")))
    }

    /// Replace a part's bytes, appending the part if it does not exist yet
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.data = data;
                entry.is_dir = false;
            }
            None => self.entries.push(Entry {
                name: name.to_string(),
                data,
                is_dir: false,
            }),
        }
    }

    /// Replace a part with UTF-8 text
    pub fn set_part_text(&mut self, name: &str, text: String) {
        self.set_part(name, text.into_bytes());
    }

    /// Parts that carry user-visible WordprocessingML text
    ///
    /// Returns the main document first, followed by headers, footers,
    /// footnotes and endnotes in archive order.
    pub fn text_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if self.has_part(MAIN_DOCUMENT_PART) {
            parts.push(MAIN_DOCUMENT_PART.to_string());
        }

        parts.extend(
            self.part_names()
                .filter(|name| secondary_text_part_regex().is_match(name))
                .map(str::to_string),
        );

        parts
    }

    /// Serialize the document into a deflate-compressed zip buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            if entry.is_dir {
                writer
                    .add_directory(entry.name.as_str(), options)
                    .map_err(|e| DocxError::SaveError(e.to_string()))?;
                continue;
            }

            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| DocxError::SaveError(e.to_string()))?;
            writer.write_all(&entry.data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| DocxError::SaveError(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Save the document to a file path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| !e.is_dir && e.name == name)
    }
}

fn secondary_text_part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^word/(header\d*|footer\d*|footnotes|endnotes)\.xml$")
            .expect("static regex is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DocxDocument {
        DocxDocument::from_parts([
            ("[Content_Types].xml", "<Types/>"),
            ("word/footer1.xml", "<w:ftr/>"),
            (MAIN_DOCUMENT_PART, "<w:document/>"),
            ("word/header2.xml", "<w:hdr/>"),
            ("word/styles.xml", "<w:styles/>"),
        ])
    }

    #[test]
    fn test_text_parts_main_first() {
        let doc = sample();
        assert_eq!(
            doc.text_parts(),
            vec![
                "word/document.xml".to_string(),
                "word/footer1.xml".to_string(),
                "word/header2.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_set_part_replaces_in_place() {
        let mut doc = sample();
        doc.set_part_text(MAIN_DOCUMENT_PART, "<w:document>x</w:document>".to_string());

        assert_eq!(
            doc.part_text(MAIN_DOCUMENT_PART).unwrap(),
            "<w:document>x</w:document>"
        );
        assert_eq!(doc.part_names().count(), 5);
    }

    #[test]
    fn test_set_part_appends_new() {
        let mut doc = sample();
        doc.set_part("word/header3.xml", b"<w:hdr/>".to_vec());
        assert!(doc.has_part("word/header3.xml"));
        assert_eq!(doc.part_names().last(), Some("word/header3.xml"));
    }

    #[test]
    fn test_missing_part() {
        let doc = sample();
        assert!(matches!(
            doc.part("word/missing.xml"),
            Err(DocxError::PartNotFound(_))
        ));
    }

    #[test]
    fn test_roundtrip_preserves_parts() {
        let doc = sample();
        let bytes = doc.to_bytes().unwrap();
        let reopened = DocxDocument::open_from_bytes(&bytes).unwrap();

        let names: Vec<&str> = reopened.part_names().collect();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "word/footer1.xml",
                "word/document.xml",
                "word/header2.xml",
                "word/styles.xml",
            ]
        );
        assert_eq!(reopened.part_text("word/styles.xml").unwrap(), "<w:styles/>");
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let result = DocxDocument::open_from_bytes(b"not a zip file");
        assert!(matches!(result, Err(DocxError::OpenError(_))));
    }

    #[test]
    fn test_open_rejects_zip_without_document() {
        let bytes = DocxDocument::from_parts([("word/styles.xml", "<w:styles/>")])
            .to_bytes()
            .unwrap();
        let result = DocxDocument::open_from_bytes(&bytes);
        assert!(matches!(result, Err(DocxError::OpenError(_))));
    }
}
