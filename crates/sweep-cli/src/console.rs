//! Single-line progress meter for interactive runs.

use std::io::{self, Write};

use sweep_engine::{Progress, ProgressSink};

/// Rewrites one status line (`\r`) on each report. Write failures are
/// ignored; progress output never affects the run.
pub struct ConsoleProgress<W: Write + Send> {
    out: W,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write + Send> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn progress_line(p: &Progress) -> String {
    format!(
        "iter={:>12} ({:>6.2}%)  OK_hits={:>12}  NG_hits={:>12}",
        p.iters, p.percent, p.ok_hits, p.ng_hits
    )
}

impl<W: Write + Send> ProgressSink for ConsoleProgress<W> {
    fn report(&mut self, progress: &Progress) {
        let _ = write!(self.out, "\r{}", progress_line(progress));
        let _ = self.out.flush();
    }
}
