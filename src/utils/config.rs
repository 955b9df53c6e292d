//! Configuration and constants for the CLI.

/// File suffix that marks a reward trace (compared case-sensitively)
pub const TRACE_SUFFIX: &str = ".log";

/// Token delimiter inside a trace file
pub const FIELD_DELIMITER: char = ',';

/// Everything after this character on a line is ignored
pub const COMMENT_MARKER: char = '#';

/// Default output image, relative to the current working directory
pub const DEFAULT_OUTPUT_FILENAME: &str = "LCT_reward.png";

/// Chart title
pub const DEFAULT_CHART_TITLE: &str = "LCT reward";

/// Chart width in pixels (14 inches at 100 dpi)
pub const DEFAULT_CHART_WIDTH: u32 = 1400;

/// Chart height in pixels (10 inches at 100 dpi)
pub const DEFAULT_CHART_HEIGHT: u32 = 1000;

/// Light (minor) grid lines drawn between two major grid lines
pub const DEFAULT_MINOR_TICKS: usize = 4;

/// Major grid lines (and axis labels) requested per axis
pub const MAJOR_GRID_LINES: usize = 10;

/// Upper bound on either image dimension
pub const MAX_CHART_DIMENSION: u32 = 16_384;

/// Current manifest schema version
pub const MANIFEST_VERSION: &str = "1.0.0";
