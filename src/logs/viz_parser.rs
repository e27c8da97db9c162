//! Viz log parser
//!
//! A viz log is a sequence of board snapshots, each introduced by a step marker:
//!
//! ```text
//! === Game Step 1 ===
//! #####
//! #1.2#
//! #####
//!
//! === Game Step 2 ===
//! ...
//! ```
//!
//! Marker numbers are not validated. Blocks are taken in textual order, so
//! duplicate or out-of-order markers each produce their own frame.

use std::sync::LazyLock;

use super::types::Frame;

static STEP_MARKER_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"===\s*Game\s*Step\s*[0-9]+\s*===").expect("valid step marker regex")
});

/// Parsed viz log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedViz {
    pub frames: Vec<Frame>,
    /// Row count of the first frame (0 when there are no frames)
    pub rows: usize,
    /// Column count of the first frame (0 when there are no frames)
    pub cols: usize,
}

/// Parse viz log content into frames.
///
/// Input without any step marker yields no frames and a `0 x 0` shape.
pub fn parse_frames(text: &str) -> ParsedViz {
    let markers: Vec<_> = STEP_MARKER_RE.find_iter(text).collect();

    let frames: Vec<Frame> = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            parse_block(&text[marker.end()..end])
        })
        .collect();

    let (rows, cols) = frames.first().map(Frame::shape).unwrap_or((0, 0));

    ParsedViz { frames, rows, cols }
}

/// Turn the body of one step block into a rectangular frame
fn parse_block(body: &str) -> Frame {
    let normalized = body.trim().replace('\r', "");
    Frame::new(normalized.split('\n').map(str::to_string).collect())
}
