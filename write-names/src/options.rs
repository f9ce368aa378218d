//! Options controlling how names are compressed

use crate::error::Error;

/// The number of previous entries searched for a shared prefix.
pub const DEFAULT_WINDOW_SIZE: usize = 32;

/// The shortest prefix, in characters, that will be shared.
pub const DEFAULT_MIN_PREFIX_LEN: usize = 3;

/// Options for [`NameTableBuilder`](crate::NameTableBuilder).
///
/// Both values are fixed parts of the compression contract: changing them
/// changes the output tables. Zero is rejected for either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    window_size: usize,
    min_prefix_len: usize,
}

impl BuildOptions {
    pub fn new(window_size: usize, min_prefix_len: usize) -> Result<Self, Error> {
        BuildOptions::default()
            .with_window_size(window_size)?
            .with_min_prefix_len(min_prefix_len)
    }

    /// Builder-style method to set the lookback window size.
    pub fn with_window_size(mut self, window_size: usize) -> Result<Self, Error> {
        if window_size == 0 {
            return Err(Error::InvalidOptions("window size must be at least 1"));
        }
        self.window_size = window_size;
        Ok(self)
    }

    /// Builder-style method to set the minimum shared prefix length.
    pub fn with_min_prefix_len(mut self, min_prefix_len: usize) -> Result<Self, Error> {
        if min_prefix_len == 0 {
            return Err(Error::InvalidOptions(
                "minimum prefix length must be at least 1",
            ));
        }
        self.min_prefix_len = min_prefix_len;
        Ok(self)
    }

    /// The number of previous entries searched for a shared prefix.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The shortest prefix, in characters, that will be shared.
    pub fn min_prefix_len(&self) -> usize {
        self.min_prefix_len
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            window_size: DEFAULT_WINDOW_SIZE,
            min_prefix_len: DEFAULT_MIN_PREFIX_LEN,
        }
    }
}
