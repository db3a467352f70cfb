//! NuGet manifest (`.nuspec`) editing
//!
//! The document is kept as its original text. Loading runs the XML reader once
//! to check well-formedness and to find the byte span of the
//! `package/metadata/version` text; edits splice new text into that span, so
//! every byte outside it is written back exactly as it was read.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::Result;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

const UTF8_BOM: char = '\u{feff}';

const PACKAGE: &[u8] = b"package";
const METADATA: &[u8] = b"metadata";
const VERSION: &[u8] = b"version";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to access manifest: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest {}: {message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },
}

/// Where the version value lives in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
enum VersionSlot {
    /// Byte range between `<version ...>` and `</version>`
    Content(Range<usize>),
    /// A self-closing `<version ... />` tag; `open_tag` is its non-empty form
    Empty { tag: Range<usize>, open_tag: String },
}

/// Progress through the first-match `package/metadata/version` chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Pending,
    Open,
    Done,
}

/// A loaded manifest file
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    source: String,
    slot: Option<VersionSlot>,
    /// Decoded text of the version element
    version: Option<String>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let bytes = fs::read(&path).map_err(|source| ManifestError::FileAccess {
            path: path.clone(),
            source,
        })?;

        let source = String::from_utf8(bytes).map_err(|e| ManifestError::MalformedDocument {
            path: path.clone(),
            message: format!("not valid UTF-8: {}", e),
        })?;

        Ok(Self::from_source(path, source)?)
    }

    /// Parses manifest text that will be saved to `path`
    pub fn from_source(path: impl Into<PathBuf>, source: String) -> Result<Self, ManifestError> {
        let path = path.into();
        let located = locate_version(&source).map_err(|message| ManifestError::MalformedDocument {
            path: path.clone(),
            message,
        })?;
        let (slot, version) = located.unzip();

        Ok(Self {
            path,
            source,
            slot,
            version,
        })
    }

    /// Returns the manifest path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full document text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the `package/metadata/version` element exists
    pub fn has_version(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the current version text, if the version element exists
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Replaces the version text
    ///
    /// Returns false and leaves the document untouched when any element of
    /// the `package/metadata/version` chain is missing.
    pub fn set_version(&mut self, value: &str) -> bool {
        let Some(slot) = self.slot.take() else {
            return false;
        };

        let escaped = escape(value);
        let (replaced, content_start, replacement) = match slot {
            VersionSlot::Content(range) => {
                let start = range.start;
                (range, start, escaped.to_string())
            }
            VersionSlot::Empty { tag, open_tag } => {
                let start = tag.start + open_tag.len();
                (tag, start, format!("{}{}</version>", open_tag, escaped))
            }
        };
        let content_end = content_start + escaped.len();

        self.source.replace_range(replaced, &replacement);
        self.slot = Some(VersionSlot::Content(content_start..content_end));
        self.version = Some(value.to_string());
        true
    }

    /// Overwrites the file with the current document text
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.source).map_err(|source| ManifestError::FileAccess {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Reads every attribute of a tag so duplicates, bad syntax and bad entities surface
fn check_attributes(tag: &BytesStart<'_>, pos: usize) -> Result<(), String> {
    let mut attributes = tag.attributes();
    attributes.with_checks(true);
    for attribute in attributes {
        let attribute = attribute.map_err(|e| format!("{} before byte {}", e, pos))?;
        attribute
            .unescape_value()
            .map_err(|e| format!("{} before byte {}", e, pos))?;
    }
    Ok(())
}

/// Checks that `source` is a well-formed document and finds the version slot
/// along with the decoded version text
fn locate_version(source: &str) -> Result<Option<(VersionSlot, String)>, String> {
    let body = source.strip_prefix(UTF8_BOM).unwrap_or(source);
    let offset = source.len() - body.len();

    let mut reader = Reader::from_str(body);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    let mut root_seen = false;
    let mut package_root = false;
    let mut metadata = Link::Pending;
    let mut version = Link::Pending;
    let mut content_start = 0usize;
    let mut text = String::new();
    let mut slot = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{} at byte {}", e, reader.error_position()))?;
        let pos = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                check_attributes(&e, pos)?;
                let name = e.name();
                match depth {
                    0 => {
                        if root_seen {
                            return Err("multiple root elements".to_string());
                        }
                        root_seen = true;
                        package_root = name.as_ref() == PACKAGE;
                    }
                    1 if package_root && metadata == Link::Pending && name.as_ref() == METADATA => {
                        metadata = Link::Open;
                    }
                    2 if metadata == Link::Open && version == Link::Pending && name.as_ref() == VERSION => {
                        version = Link::Open;
                        content_start = pos;
                    }
                    _ => {}
                }
                depth += 1;
            }

            Event::Empty(e) => {
                check_attributes(&e, pos)?;
                let name = e.name();
                match depth {
                    0 => {
                        if root_seen {
                            return Err("multiple root elements".to_string());
                        }
                        root_seen = true;
                    }
                    1 if package_root && metadata == Link::Pending && name.as_ref() == METADATA => {
                        metadata = Link::Done;
                    }
                    2 if metadata == Link::Open && version == Link::Pending && name.as_ref() == VERSION => {
                        version = Link::Done;
                        let start = body[..pos].rfind('<').unwrap_or(0);
                        let raw = &body[start..pos];
                        let open_tag = format!("{}>", raw.trim_end_matches('>').trim_end_matches('/'));
                        slot = Some((
                            VersionSlot::Empty {
                                tag: start + offset..pos + offset,
                                open_tag,
                            },
                            String::new(),
                        ));
                    }
                    _ => {}
                }
            }

            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unexpected end tag at byte {}", pos))?;
                match depth {
                    2 if version == Link::Open => {
                        version = Link::Done;
                        let end = body[..pos].rfind("</").unwrap_or(pos);
                        let range = content_start + offset..end + offset;
                        slot = Some((VersionSlot::Content(range), std::mem::take(&mut text)));
                    }
                    1 if metadata == Link::Open => metadata = Link::Done,
                    _ => {}
                }
            }

            Event::Text(e) => {
                if depth == 0 && !e.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(format!("text outside the root element at byte {}", pos));
                }
                let decoded = e.unescape().map_err(|e| format!("{} before byte {}", e, pos))?;
                if version == Link::Open {
                    text.push_str(&decoded);
                }
            }

            Event::CData(e) => {
                if depth == 0 {
                    return Err(format!("CDATA outside the root element at byte {}", pos));
                }
                if version == Link::Open {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }

            Event::Eof => break,

            _ => {}
        }
    }

    if !root_seen {
        return Err("no root element".to_string());
    }
    if depth != 0 {
        return Err(format!("{} unclosed element(s) at end of document", depth));
    }

    Ok(slot)
}
