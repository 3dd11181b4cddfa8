/// How many context frames an error may accumulate before further pushes
/// collapse into a single `(...)` sentinel.
pub const MAX_ERROR_DEPTH: usize = 5;

/// Result type used throughout the interpreter.
///
/// Every evaluation and execution function returns either a value of type `T`
/// or an [`ErrorStack`] describing the failure and the call chain it crossed.
pub type EvalResult<T> = Result<T, ErrorStack>;

/// A stack of error frames threaded through nested call layers.
///
/// The head frame is the original failure; each frame behind it is a layer of
/// context (usually an `In function "NAME"` marker) added while the error
/// bubbled upward. The chain is bounded: once [`MAX_ERROR_DEPTH`] frames have
/// accumulated, one `(...)` sentinel replaces everything that would follow.
#[derive(Debug, Clone)]
pub struct ErrorStack {
    message: String,
    line:    usize,
    next:    Option<Box<ErrorStack>>,
    depth:   usize,
}

impl ErrorStack {
    /// Creates a new single-frame error stack.
    ///
    /// `error` is rendered once into the frame message; `line` is the 1-based
    /// source line the failure belongs to.
    pub fn new(error: impl std::fmt::Display, line: usize) -> Self {
        Self { message: error.to_string(),
               line,
               next: None,
               depth: 0 }
    }

    /// Pushes a new context frame in front of this stack.
    ///
    /// The pushed frame becomes the new head. When the stack already carries
    /// [`MAX_ERROR_DEPTH`] frames the pushed context is discarded and a single
    /// `(...)` sentinel is installed instead; once the sentinel is in place
    /// further pushes return the stack unchanged.
    #[must_use]
    pub fn wrap(self, error: impl std::fmt::Display, line: usize) -> Self {
        if self.depth == MAX_ERROR_DEPTH {
            return Self { message: "(...)".to_string(),
                          line:    0,
                          next:    Some(Box::new(self)),
                          depth:   MAX_ERROR_DEPTH + 1, };
        }

        if self.depth > MAX_ERROR_DEPTH {
            return self;
        }

        let depth = self.depth + 1;
        Self { message: error.to_string(),
               line,
               next: Some(Box::new(self)),
               depth }
    }

    /// The message of the head frame.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source line of the head frame.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl std::fmt::Display for ErrorStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_frame(f, &self.message, self.line)?;

        let mut current = self.next.as_deref();
        let mut indent = 1;
        while let Some(frame) = current {
            write!(f, "\n{}└", "  ".repeat(indent))?;
            write_frame(f, &frame.message, frame.line)?;
            current = frame.next.as_deref();
            indent += 1;
        }
        Ok(())
    }
}

// The sentinel frame carries no source position, so it renders bare.
fn write_frame(f: &mut std::fmt::Formatter<'_>, message: &str, line: usize) -> std::fmt::Result {
    if line == 0 {
        write!(f, "{message}")
    } else {
        write!(f, "{message} on line {line}.")
    }
}

impl std::error::Error for ErrorStack {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_head_and_nested_frames() {
        let stack = ErrorStack::new("Division by zero", 2).wrap("In function \"div\"", 1);

        assert_eq!(stack.to_string(),
                   "Division by zero on line 2.\n  └In function \"div\" on line 1.");
    }

    #[test]
    fn nested_frames_indent_one_level_per_depth() {
        let stack = ErrorStack::new("boom", 3).wrap("first", 2).wrap("second", 1);
        let rendered = stack.to_string();

        assert!(rendered.contains("\n  └first on line 2."));
        assert!(rendered.contains("\n    └second on line 1."));
    }

    #[test]
    fn collapses_after_max_depth() {
        let mut stack = ErrorStack::new("boom", 9);
        for i in 0..MAX_ERROR_DEPTH {
            stack = stack.wrap(format!("layer {i}"), i + 1);
        }

        // The next push replaces the new context with the sentinel.
        stack = stack.wrap("dropped", 7);
        let rendered = stack.to_string();
        assert!(rendered.starts_with("(...)"));
        assert!(!rendered.contains("dropped"));

        // And once collapsed, further pushes are no-ops.
        let again = stack.clone().wrap("also dropped", 8);
        assert_eq!(again.to_string(), rendered);
    }
}
