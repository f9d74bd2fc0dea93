//! Configuration types for RTF reading.
//!
//! Options are fixed for the lifetime of an [`RtfReader`](super::RtfReader)
//! and apply to every buffer it processes.

use crate::common::encoding::CP_WINDOWS_1252;
use crate::common::unit::DEFAULT_DPI;
use serde::{Deserialize, Serialize};

/// Default limit on nested groups.
pub const DEFAULT_MAX_GROUP_DEPTH: usize = 4096;

/// Configuration options for RTF reading.
///
/// # Examples
///
/// ```rust
/// use rtf_styled::rtf::ReaderOptions;
///
/// // Create with defaults
/// let options = ReaderOptions::default();
///
/// // Or customize
/// let options = ReaderOptions::new()
///     .with_platform_dpi(72)
///     .with_max_group_depth(256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Screen resolution used to convert half-point font sizes to pixels
    pub platform_dpi: u32,
    /// Deepest group nesting accepted before reporting `Overflow`
    pub max_group_depth: usize,
    /// Code page of 8-bit text until the document declares its own
    pub default_codepage: u16,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            platform_dpi: DEFAULT_DPI,
            max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
            default_codepage: CP_WINDOWS_1252,
        }
    }
}

impl ReaderOptions {
    /// Create a new `ReaderOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution used for font sizes.
    ///
    /// Use 72 where one point is one pixel, 96 for typical desktop screens.
    #[inline]
    pub fn with_platform_dpi(mut self, dpi: u32) -> Self {
        self.platform_dpi = dpi;
        self
    }

    /// Set the maximum group nesting depth.
    #[inline]
    pub fn with_max_group_depth(mut self, depth: usize) -> Self {
        self.max_group_depth = depth;
        self
    }

    /// Set the code page assumed before `\ansi`, `\mac`, `\pc`, `\pca` or
    /// `\ansicpg` is seen.
    #[inline]
    pub fn with_default_codepage(mut self, codepage: u16) -> Self {
        self.default_codepage = codepage;
        self
    }
}
