//! Configuration options for decoding and encoding.

/// Limits applied to a single decode or encode call.
///
/// # Example
///
/// ```
/// use sable_core::CodecOptions;
///
/// let options = CodecOptions { max_depth: 32 };
/// assert_eq!(CodecOptions::default().max_depth, 256);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum nesting of type nodes visited on one path (for recursion
    /// protection against self-referential types and hostile input).
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}
