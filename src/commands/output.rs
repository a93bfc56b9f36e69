//! User-facing progress messages.
//!
//! These are the tool's conversation with the user, written to stdout with a
//! status indicator. Diagnostics go through `tracing` instead.

use std::io::Write;

/// Status of a progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
    Completed,
}

impl Status {
    pub fn indicator(self) -> &'static str {
        match self {
            Status::Info => "",
            Status::Success => "✅ ",
            Status::Warning => "🟡 ",
            Status::Error => "⛔️ ",
            Status::Completed => "✨ ",
        }
    }
}

/// Writes progress messages to a sink, stdout in the binary.
pub struct Output<'a> {
    sink: &'a mut dyn Write,
}

impl<'a> Output<'a> {
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self { sink }
    }

    pub fn message(&mut self, status: Status, message: impl AsRef<str>) {
        // A closed stdout leaves nobody to tell.
        let _ = writeln!(self.sink, "{}{}", status.indicator(), message.as_ref());
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.message(Status::Info, message);
    }

    pub fn success(&mut self, message: impl AsRef<str>) {
        self.message(Status::Success, message);
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.message(Status::Warning, message);
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.message(Status::Error, message);
    }

    pub fn completed(&mut self, message: impl AsRef<str>) {
        self.message(Status::Completed, message);
    }

    /// An empty line.
    pub fn blank(&mut self) {
        let _ = writeln!(self.sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_indicators() {
        let mut buf = Vec::new();
        {
            let mut out = Output::new(&mut buf);
            out.info("plain");
            out.success("done");
            out.error("broken");
            out.blank();
            out.completed("all good");
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "plain\n✅ done\n⛔️ broken\n\n✨ all good\n");
    }
}
