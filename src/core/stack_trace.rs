//! Stack trace capture for fatal and crash reports
//!
//! Frames are captured fresh on every call and rendered one string per frame
//! as `<address> - <symbol> (<location>)`. Resolution is best effort: a frame
//! without symbol information renders as its raw address.

use std::backtrace::Backtrace;
use std::io::{self, Write};

/// Upper bound on frames kept per trace
#[cfg(target_pointer_width = "64")]
pub const STACK_TRACE_LIMIT: usize = 50;
#[cfg(not(target_pointer_width = "64"))]
pub const STACK_TRACE_LIMIT: usize = 25;

/// Header written before the frames of a fatal-record trace
pub const FATAL_TRACE_HEADER: &str = "*** FATAL Error detected; stack trace: ***";

#[derive(Debug, Clone, Default)]
pub struct StackTrace {
    frames: Vec<String>,
}

impl StackTrace {
    /// Capture the calling thread's stack, regardless of `RUST_BACKTRACE`
    pub fn capture() -> Self {
        let backtrace = Backtrace::force_capture();
        Self {
            // The alternate (full) style keeps every frame's address
            frames: parse_frames(&format!("{:#}", backtrace), STACK_TRACE_LIMIT),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.frames.iter()
    }

    /// Write `header` on its own line, then one `@\t<frame>` line per frame
    pub fn write_report<W: Write + ?Sized>(&self, out: &mut W, header: &str) -> io::Result<()> {
        out.write_all(self.render(header).as_bytes())
    }

    /// The same report as [`write_report`](Self::write_report), as a string
    pub fn render(&self, header: &str) -> String {
        let mut report = String::with_capacity(64 * (self.frames.len() + 1));
        report.push('\n');
        report.push_str(header);
        report.push('\n');
        for frame in &self.frames {
            report.push_str("@\t");
            report.push_str(frame);
            report.push('\n');
        }
        report
    }
}

impl IntoIterator for StackTrace {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

/// Split a rendered backtrace into frame descriptions
///
/// The rendered form numbers each frame (`  3: 0x55d4c2a1 - symbol`) and may
/// follow it with an `at file:line` location line, which is folded into the
/// frame. Symbols inlined into a frame are printed on unnumbered lines with
/// their own locations; only the outermost symbol is kept.
pub(crate) fn parse_frames(rendered: &str, limit: usize) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    let mut located = true;

    for raw in rendered.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(symbol) = frame_symbol(line) {
            if frames.len() == limit {
                break;
            }
            frames.push(symbol.to_string());
            located = false;
        } else if let Some(location) = line.strip_prefix("at ") {
            if located {
                continue;
            }
            if let Some(frame) = frames.last_mut() {
                frame.push_str(" (");
                frame.push_str(location);
                frame.push(')');
                located = true;
            }
        } else {
            // Inlined symbol: its location belongs to it, not the frame
            located = true;
        }
    }

    frames
}

/// `"12: 0x55d4c2a1 - foo::bar"` -> `Some("0x55d4c2a1 - foo::bar")`
///
/// An unresolved frame (`"12: 0x55d4c2a1 - <unknown>"`) keeps only its address.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, rest) = line.split_once(':')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let symbol = rest.trim();
    if symbol.is_empty() {
        return Some("<unknown>");
    }
    Some(
        symbol
            .strip_suffix(" - <unknown>")
            .map_or(symbol, str::trim_end),
    )
}
