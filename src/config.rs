use std::path::PathBuf;

/// Pick radius around a split point, in pixels.
pub const DEFAULT_PICK_RADIUS: u32 = 5;
/// Directory exported tiles are written to. It must already exist.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration for a splitting session.
///
/// # Example
/// ```
/// use splitter::SplitterConfig;
///
/// let config = SplitterConfig::default();
/// assert_eq!(config.pick_radius, 5);
/// assert_eq!(config.output_dir.to_str(), Some("output"));
/// assert_eq!(config.enable_parallel, false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterConfig {
    /// Distance within which a click hits an existing point (default: 5)
    pub pick_radius: u32,
    /// Directory receiving exported tiles (default: `output`)
    pub output_dir: PathBuf,
    /// Crop and encode tiles on the rayon pool (default: false)
    pub enable_parallel: bool,
}

impl SplitterConfig {
    /// Creates a new `SplitterConfig` with the specified parameters.
    ///
    /// # Example
    /// ```
    /// use splitter::SplitterConfig;
    ///
    /// let config = SplitterConfig::new(0, "tiles", true);
    /// assert_eq!(config.pick_radius, 1);
    /// assert_eq!(config.output_dir.to_str(), Some("tiles"));
    /// assert_eq!(config.enable_parallel, true);
    /// ```
    pub fn new(pick_radius: u32, output_dir: impl Into<PathBuf>, enable_parallel: bool) -> Self {
        Self {
            pick_radius: pick_radius.max(1), // Minimum pick radius
            output_dir: output_dir.into(),
            enable_parallel,
        }
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig::new(DEFAULT_PICK_RADIUS, DEFAULT_OUTPUT_DIR, false)
    }
}
