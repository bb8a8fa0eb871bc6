// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use crate::Error;

/// Path of a collection, e.g. `messages` or `fans/{fan}/notifications`. Always has an odd
/// number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Path of a single document, e.g. `messages/{id}`. Always has an even number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

/// Path of a (possibly nested) field inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl CollectionPath {
    pub fn root(name: impl AsRef<str>) -> Result<Self, Error> {
        let name = name.as_ref();
        validate_segment(name, name)?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let segments = split_path(path)?;
        if segments.len() % 2 == 0 {
            return Err(invalid(path, "a collection path needs an odd number of segments"));
        }
        Ok(Self { segments })
    }

    /// The path of the document `id` inside this collection.
    pub fn doc(&self, id: impl AsRef<str>) -> Result<DocumentPath, Error> {
        let id = id.as_ref();
        validate_segment(&format!("{}/{}", self, id), id)?;
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Ok(DocumentPath { segments })
    }

    /// The last segment, i.e. the name of the collection.
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> Option<DocumentPath> {
        if self.segments.len() < 3 {
            return None;
        }
        Some(DocumentPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl DocumentPath {
    pub fn parse(path: &str) -> Result<Self, Error> {
        let segments = split_path(path)?;
        if segments.len() % 2 != 0 {
            return Err(invalid(path, "a document path needs an even number of segments"));
        }
        Ok(Self { segments })
    }

    /// The identifier of the document, i.e. the last segment.
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// The path of the sub-collection `name` below this document.
    pub fn collection(&self, name: impl AsRef<str>) -> Result<CollectionPath, Error> {
        let name = name.as_ref();
        validate_segment(&format!("{}/{}", self, name), name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }
}

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::new([value])
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self::new([value])
    }
}

impl Display for CollectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl Display for DocumentPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

fn split_path(path: &str) -> Result<Vec<String>, Error> {
    let segments = path.split('/').map(ToString::to_string).collect::<Vec<_>>();
    for segment in &segments {
        validate_segment(path, segment)?;
    }
    Ok(segments)
}

fn validate_segment(reference: &str, segment: &str) -> Result<(), Error> {
    if segment.trim().is_empty() {
        return Err(invalid(reference, "path segments must not be empty"));
    }
    if segment.contains('/') {
        return Err(invalid(reference, "path segments must not contain '/'"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid(reference, "path segments must not be '.' or '..'"));
    }
    Ok(())
}

fn invalid(reference: &str, reason: &str) -> Error {
    Error::InvalidReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    }
}
