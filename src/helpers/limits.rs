/// Upper bounds applied by [`super::JsonStreamer`] while reading a document
///
/// The defaults are far above any real Shopify order (the REST API caps an
/// order at 250 line items) and only stop runaway input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of the whole document in bytes
    pub max_input_bytes: u64,
    /// Maximum number of top-level entries (keys of an object, elements of an array)
    pub max_entries: usize,
}

impl Limits {
    pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

    /// No limits at all
    pub const fn unlimited() -> Self {
        Limits {
            max_input_bytes: u64::MAX,
            max_entries: usize::MAX,
        }
    }

    pub const fn max_input_bytes(mut self, bytes: u64) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    pub const fn max_entries(mut self, entries: usize) -> Self {
        self.max_entries = entries;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_input_bytes: Self::DEFAULT_MAX_INPUT_BYTES,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}
