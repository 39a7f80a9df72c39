//! Operator-facing surface of the station.

use std::io::Write;

use tracing::warn;

/// What the station shows the operator. Both calls are synchronous: the
/// station does not handle the next scan until they return.
pub trait StationUi {
    /// Blocking acknowledgment of a pallet capture.
    fn acknowledge(&mut self, message: &str);

    /// Reveal the part-scan section. Idempotent.
    fn reveal_part_section(&mut self);
}

/// Line-oriented UI for a terminal.
pub struct ConsoleUi<W: Write> {
    out: W,
    part_section_visible: bool,
}

impl<W: Write> ConsoleUi<W> {
    pub fn new(out: W) -> Self {
        Self { out, part_section_visible: false }
    }

    #[must_use]
    pub fn part_section_visible(&self) -> bool {
        self.part_section_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "console write failed");
        }
    }
}

impl<W: Write> StationUi for ConsoleUi<W> {
    fn acknowledge(&mut self, message: &str) {
        self.write_line(message);
    }

    fn reveal_part_section(&mut self) {
        if self.part_section_visible {
            return;
        }
        self.part_section_visible = true;
        self.write_line("Part scanning enabled");
    }
}

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;
