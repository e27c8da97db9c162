//! Tunable constants for tankreplay
//!
//! Playback timing, log file naming, and board glyph values live here.

// =============================================================================
// PLAYBACK TIMING
// =============================================================================

pub const MIN_SPEED_MS: u64 = 60; // Tick interval floor
pub const MAX_SPEED_MS: u64 = 2000;
pub const DEFAULT_SPEED_MS: u64 = 500;
pub const SPEED_STEP_MS: u64 = 20; // faster()/slower() increment
pub const DEFAULT_RUNNER_HZ: f32 = 60.0; // Headless app update rate

// =============================================================================
// LOG FILES
// =============================================================================

pub const VIZ_SUFFIX: &str = ".viz.txt";
pub const MOVES_SUFFIX: &str = ".moves.txt";

/// Separator between the parts of a generated log stem
/// (`<manager>__<map>__<alg1>_vs_<alg2>__run<N>__ts<T>`)
pub const STEM_DELIMITER: &str = "__";

// =============================================================================
// BOARD GLYPHS
// =============================================================================

pub const FILLER_GLYPH: char = '.'; // Pads short viz rows, also the empty cell
pub const WALL_GLYPH: char = '#';
pub const DAMAGED_WALL_GLYPH: char = '/';
pub const MINE_GLYPH: char = '@';
pub const SHELL_GLYPH: char = '*';
