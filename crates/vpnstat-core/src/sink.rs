//! Line-oriented output sinks for status reports.

use std::io::Write;

/// Destination for report lines (status tables and change lines)
///
/// Implementations receive one line at a time, without a trailing newline.
pub trait LineSink {
    fn write_line(&mut self, line: &str);
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

/// Writes report lines to stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write report line to stdout");
        }
    }
}

/// Collects report lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Everything written so far, newline-terminated
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    /// Drop collected lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take collected lines, leaving the sink empty
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.write_line("one");
        sink.write_line("two");
        assert_eq!(sink.lines(), &["one".to_string(), "two".to_string()]);
        assert_eq!(sink.text(), "one\ntwo\n");
    }

    #[test]
    fn test_take_empties_sink() {
        let mut sink = MemorySink::new();
        sink.write_line("x");
        assert_eq!(sink.take(), vec!["x".to_string()]);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_boxed_dyn_sink_forwards() {
        let mut inner = MemorySink::new();
        {
            let mut boxed: Box<dyn LineSink + '_> = Box::new(&mut inner);
            boxed.write_line("via box");
        }
        assert_eq!(inner.lines(), &["via box".to_string()]);
    }
}
