/// Append-only text sink for translated blocks and statements.
#[derive(Debug, Clone)]
pub struct Emitter {
    out: String,
    indent: String,
    depth: usize,
}

impl Emitter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            indent: indent.into(),
            depth: 0,
        }
    }

    pub fn open_block(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    pub fn close_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Write one complete statement on its own line at the current depth.
    pub fn statement(&mut self, text: &str) {
        self.line(text);
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(&self.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }
}

/// Join expression fragments, spacing binary operators and commas.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut buf = String::new();
    for fragment in fragments {
        match fragment.as_ref() {
            op @ ("+" | "-" | "*" | "/") => {
                buf.push(' ');
                buf.push_str(op);
                buf.push(' ');
            }
            "," => buf.push_str(", "),
            other => buf.push_str(other),
        }
    }
    buf
}
