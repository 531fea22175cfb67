//! Compile-time configuration and debug tracing.
//!
//! There is no process-wide logging crate in this stack (none of the
//! example repos the diagnostics/span machinery is grounded in pull one in
//! either); `Tracer` fills the same "show me what the parser is doing" role
//! with a minimal stderr writer gated on `CompileConfig::trace`.

/// Options that shape a single compile.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// When set, semantic errors abort the parse instead of being collected
    /// alongside a best-effort tree.
    pub strict: bool,
    /// When set, each grammar production logs its entry to stderr.
    pub trace: bool,
    /// Name to attribute diagnostics to, absent a real file path.
    pub source_name: Option<String>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            strict: true,
            trace: false,
            source_name: None,
        }
    }
}

impl CompileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// Emits one line per grammar production entered, when tracing is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Tracer {
    enabled: bool,
}

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Records entry into the named production.
    pub fn enter(&self, production: &str) {
        if self.enabled {
            eprintln!("enter {production}");
        }
    }
}
