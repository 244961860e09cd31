//! A single `RESOLV.SRV` registration.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ResolvError;

/// Field holding the dataset group in key=value entries.
pub const GROUP_KEY: &str = "N1";

/// Field holding the dataset descriptor in key=value entries.
pub const DESCRIPTOR_KEY: &str = "N2";

/// In-memory identity of an entry. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parsed content of an entry line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "values", rename_all = "snake_case")]
pub enum EntryBody {
    /// Freshly added entry with nothing filled in yet.
    Empty,
    /// Whitespace-separated tokens; the first token is the group.
    Positional(Vec<String>),
    /// Comma-separated `KEY=VALUE` fields in line order.
    KeyValue(Vec<(String, String)>),
}

impl EntryBody {
    fn parse(line: &str) -> Self {
        if line.is_empty() {
            Self::Empty
        } else if line.contains('=') {
            Self::KeyValue(parse_key_values(line))
        } else {
            Self::Positional(line.split_whitespace().map(str::to_string).collect())
        }
    }
}

/// Split `K=V,K=V,` into fields.
///
/// A segment without `=` continues the previous value, so commas inside a
/// trailing comment survive.
fn parse_key_values(line: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for segment in line.split(',') {
        if let Some((key, value)) = segment.split_once('=') {
            fields.push((key.trim().to_string(), value.trim().to_string()));
            continue;
        }

        if segment.trim().is_empty() {
            continue;
        }

        match fields.last_mut() {
            Some((_, value)) => {
                value.push(',');
                value.push_str(segment.trim_end());
            }
            None => fields.push((segment.trim().to_string(), String::new())),
        }
    }

    fields
}

/// One served dataset registration.
///
/// The original line is kept verbatim and written back unchanged unless one
/// of the editing methods is called, after which the line is re-rendered from
/// the parsed body.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvEntry {
    id: EntryId,
    line: Option<String>,
    body: EntryBody,
    #[serde(skip)]
    edited: bool,
}

impl ResolvEntry {
    /// Parse one configuration line. Surrounding whitespace is dropped.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let body = EntryBody::parse(trimmed);
        let line = (!trimmed.is_empty()).then(|| trimmed.to_string());

        Self {
            id: EntryId::new(),
            line,
            body,
            edited: false,
        }
    }

    /// A new, unfilled entry. It has no serialized form until edited.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: EntryId::new(),
            line: None,
            body: EntryBody::Empty,
            edited: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub const fn body(&self) -> &EntryBody {
        &self.body
    }

    /// Whether the entry changed since it was parsed.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited
    }

    /// Dataset group, if one is filled in.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        let group = match &self.body {
            EntryBody::Empty => None,
            EntryBody::Positional(tokens) => tokens.first().map(String::as_str),
            EntryBody::KeyValue(_) => self.field(GROUP_KEY),
        };
        group.filter(|g| !g.is_empty())
    }

    /// Dataset descriptor, if one is filled in.
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        let descriptor = match &self.body {
            EntryBody::Empty => None,
            EntryBody::Positional(tokens) => tokens.get(1).map(String::as_str),
            EntryBody::KeyValue(_) => self.field(DESCRIPTOR_KEY),
        };
        descriptor.filter(|d| !d.is_empty())
    }

    /// Look up a key=value field. Keys compare case-insensitively.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Key=value fields in line order; empty for other layouts.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        match &self.body {
            EntryBody::KeyValue(fields) => fields,
            _ => &[],
        }
    }

    /// Set the group, creating the field or token if needed.
    pub fn set_group(&mut self, group: &str) {
        match &mut self.body {
            EntryBody::Positional(tokens) => match tokens.first_mut() {
                Some(first) => group.clone_into(first),
                None => tokens.push(group.to_string()),
            },
            EntryBody::Empty | EntryBody::KeyValue(_) => {
                upsert_field(&mut self.body, GROUP_KEY, group);
            }
        }
        self.edited = true;
    }

    /// Set a key=value field. An empty entry becomes a key=value entry.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), ResolvError> {
        if matches!(self.body, EntryBody::Positional(_)) {
            return Err(ResolvError::NotKeyValue(self.id));
        }
        upsert_field(&mut self.body, key.trim(), value.trim());
        self.edited = true;
        Ok(())
    }

    /// Remove a key=value field, returning its previous value.
    pub fn remove_field(&mut self, key: &str) -> Result<Option<String>, ResolvError> {
        let fields = match &mut self.body {
            EntryBody::Empty => return Ok(None),
            EntryBody::Positional(_) => return Err(ResolvError::NotKeyValue(self.id)),
            EntryBody::KeyValue(fields) => fields,
        };

        let Some(pos) = fields.iter().position(|(k, _)| k.eq_ignore_ascii_case(key)) else {
            return Ok(None);
        };
        let (_, value) = fields.remove(pos);
        self.edited = true;
        Ok(Some(value))
    }

    /// Replace the whole entry with a new raw line, kept verbatim.
    pub fn set_line(&mut self, line: &str) {
        let replacement = Self::parse(line);
        self.line = replacement.line;
        self.body = replacement.body;
        self.edited = false;
    }

    /// Serialized form, or `None` when the entry is not complete enough to save.
    #[must_use]
    pub fn to_line(&self) -> Option<String> {
        if self.edited {
            self.render()
        } else {
            self.line.clone()
        }
    }

    fn render(&self) -> Option<String> {
        match &self.body {
            EntryBody::Empty => None,
            EntryBody::Positional(tokens) if tokens.is_empty() => None,
            EntryBody::Positional(tokens) => Some(tokens.join(" ")),
            EntryBody::KeyValue(fields) => {
                self.group()?;
                self.descriptor()?;
                Some(fields.iter().fold(String::new(), |mut out, (k, v)| {
                    out.push_str(k);
                    out.push('=');
                    out.push_str(v);
                    out.push(',');
                    out
                }))
            }
        }
    }
}

fn upsert_field(body: &mut EntryBody, key: &str, value: &str) {
    if matches!(body, EntryBody::Empty) {
        *body = EntryBody::KeyValue(Vec::new());
    }
    let EntryBody::KeyValue(fields) = body else {
        return;
    };

    match fields.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
        Some((_, existing)) => value.clone_into(existing),
        None => fields.push((key.to_string(), value.to_string())),
    }
}

impl PartialEq for ResolvEntry {
    fn eq(&self, other: &Self) -> bool {
        self.to_line() == other.to_line() && self.body == other.body
    }
}

impl Eq for ResolvEntry {}
