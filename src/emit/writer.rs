//! Line-continuation aware writer for `make` rules.

/// Builds a single `make` rule whose prerequisites are listed one per line,
/// joined with backslash continuations and indented with a tab.
pub struct RuleWriter {
    buf: String,
}

impl RuleWriter {
    /// Start the rule with `target: `.
    pub fn new(target: &str) -> Self {
        let mut buf = String::with_capacity(256);
        buf.push_str(target);
        buf.push_str(": ");
        Self { buf }
    }

    /// Append one prerequisite on its own continuation line.
    pub fn prerequisite(&mut self, dep: &str) {
        self.buf.push_str(" \\\n\t");
        self.buf.push_str(&escape(dep));
    }

    /// Consume the writer and return the rule text. No trailing newline.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Spaces separate prerequisites in make, so they are backslash-escaped.
fn escape(dep: &str) -> String {
    dep.replace(' ', "\\ ")
}
