// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag payloads: typed data keyed by MIME-like type strings.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A single piece of dragged data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragData {
    /// Text encoded data, such as plain text, HTML or JSON.
    Text(String),
    /// Raw binary data.
    Bytes(Vec<u8>),
}

impl DragData {
    /// The text content, if this is [`DragData::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(_) => None,
        }
    }

    /// The raw bytes of either variant.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Bytes(b) => b,
        }
    }
}

/// Data carried by a drag session, keyed by type (for example `"text/plain"`).
///
/// A payload is assembled by the drag source before the session starts and is
/// read-only afterwards: [`DragSession`](crate::DragSession) only hands out
/// shared references to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragPayload {
    entries: BTreeMap<String, DragData>,
}

impl DragPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous data for the same type.
    pub fn with(mut self, mime: impl Into<String>, data: DragData) -> Self {
        self.insert(mime, data);
        self
    }

    /// Add a text entry.
    pub fn with_text(self, mime: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(mime, DragData::Text(text.into()))
    }

    /// Insert an entry, returning the previous data for that type.
    pub fn insert(&mut self, mime: impl Into<String>, data: DragData) -> Option<DragData> {
        self.entries.insert(mime.into(), data)
    }

    /// Data for `mime`, if present.
    pub fn get(&self, mime: &str) -> Option<&DragData> {
        self.entries.get(mime)
    }

    /// Whether data of type `mime` is present.
    pub fn contains(&self, mime: &str) -> bool {
        self.entries.contains_key(mime)
    }

    /// Whether any of `types` is present.
    pub fn contains_any<S: AsRef<str>>(&self, types: &[S]) -> bool {
        types.iter().any(|t| self.contains(t.as_ref()))
    }

    /// Types in the payload, in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
