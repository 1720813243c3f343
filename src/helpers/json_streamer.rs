use indexmap::IndexMap;
use serde::de::{self, Deserializer as _, MapAccess, SeqAccess, Visitor};
use serde_json::{Deserializer, Value};
use std::{cell::Cell, fmt, io};

use super::Limits;
use crate::error::{InvalidJsonError, Result};

/// Reads a JSON document one top-level entry at a time into an ordered map
///
/// Objects keep their keys, arrays are keyed by position (`"0"`, `"1"`, ...).
/// Anything else at the top level is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStreamer {
    limits: Limits,
}

impl JsonStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        JsonStreamer { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn stream(&self, json: &str) -> Result<IndexMap<String, Value>> {
        if json.len() as u64 > self.limits.max_input_bytes {
            return Err(InvalidJsonError::limit(format!(
                "input is {} bytes, the limit is {}",
                json.len(),
                self.limits.max_input_bytes
            )));
        }

        self.stream_from(Deserializer::from_str(json), &Cell::new(false))
    }

    /// Same as [`JsonStreamer::stream`] but pulls the document from `reader`
    ///
    /// Reads are not buffered here, wrap files and sockets in a [`std::io::BufReader`].
    pub fn from_reader<R: io::Read>(&self, reader: R) -> Result<IndexMap<String, Value>> {
        let exceeded = Cell::new(false);
        let reader = LimitedReader {
            inner: reader,
            remaining: self.limits.max_input_bytes,
            exceeded: &exceeded,
        };

        self.stream_from(Deserializer::from_reader(reader), &exceeded)
    }

    fn stream_from<'de, R>(
        &self,
        mut deserializer: Deserializer<R>,
        exceeded: &Cell<bool>,
    ) -> Result<IndexMap<String, Value>>
    where
        R: serde_json::de::Read<'de>,
    {
        let visitor = EntryVisitor {
            max_entries: self.limits.max_entries,
            exceeded,
        };

        let result = (&mut deserializer)
            .deserialize_any(visitor)
            .and_then(|entries| deserializer.end().map(|_| entries));

        match result {
            Ok(entries) => {
                log::debug!("Streamed {} top-level entries", entries.len());
                Ok(entries)
            }
            Err(err) => {
                let mut err = InvalidJsonError::from(err);
                if exceeded.get() {
                    err.category = crate::error::Category::Limit;
                }
                log::debug!("Rejected document: {err}");
                Err(err)
            }
        }
    }
}

/// Shorthand for [`JsonStreamer::stream`] with the default limits
pub fn stream_to_map(json: &str) -> Result<IndexMap<String, Value>> {
    JsonStreamer::default().stream(json)
}

struct EntryVisitor<'a> {
    max_entries: usize,
    exceeded: &'a Cell<bool>,
}

impl<'a> EntryVisitor<'a> {
    fn check_room<E: de::Error>(&self, count: usize) -> std::result::Result<(), E> {
        if count >= self.max_entries {
            self.exceeded.set(true);
            return Err(E::custom(format!(
                "more than {} top-level entries",
                self.max_entries
            )));
        }
        Ok(())
    }
}

impl<'de, 'a> Visitor<'de> for EntryVisitor<'a> {
    type Value = IndexMap<String, Value>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object or array")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

        while let Some(key) = access.next_key::<String>()? {
            if !entries.contains_key(&key) {
                self.check_room::<A::Error>(entries.len())?;
            }
            let value = access.next_value::<Value>()?;
            log::trace!("Streamed key {key}");
            entries.insert(key, value);
        }

        Ok(entries)
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

        while let Some(value) = access.next_element::<Value>()? {
            let index = entries.len();
            self.check_room::<A::Error>(index)?;
            log::trace!("Streamed element {index}");
            entries.insert(index.to_string(), value);
        }

        Ok(entries)
    }
}

/// Fails the read once more than `remaining` bytes have been pulled
struct LimitedReader<'a, R> {
    inner: R,
    remaining: u64,
    exceeded: &'a Cell<bool>,
}

impl<'a, R: io::Read> io::Read for LimitedReader<'a, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        match self.remaining.checked_sub(read as u64) {
            Some(remaining) => {
                self.remaining = remaining;
                Ok(read)
            }
            None => {
                self.exceeded.set(true);
                Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "input is over the configured size limit",
                ))
            }
        }
    }
}
