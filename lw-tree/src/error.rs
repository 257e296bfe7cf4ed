use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for entry tree operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the content and filename of a module file so that errors detected
/// after parsing (while grafting augments or resolving identities) can still
/// point into the file that caused them.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        crate::validate::find_name_span(&self.src, name)
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, locating `name` in the source when possible.
    pub fn validation_error(&self, message: impl Into<String>, name: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_span(name),
            message: message.into(),
        })
    }

    /// Create an unknown qualifier error.
    pub fn unknown_qualifier_error(
        &self,
        qualifier: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownQualifier {
            src: self.named_source(),
            span,
            qualifier: qualifier.into(),
            context: context.into(),
        })
    }

    /// Create an unknown identity error.
    pub fn unknown_identity_error(
        &self,
        name: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownIdentity {
            src: self.named_source(),
            span,
            name: name.into(),
        })
    }

    /// Create an unresolved augment error.
    pub fn unresolved_augment_error(
        &self,
        target: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnresolvedAugment {
            src: self.named_source(),
            span: span.into(),
            target: target.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(leafwise::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module file")]
    #[diagnostic(code(leafwise::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("module '{name}' is defined more than once")]
    #[diagnostic(
        code(leafwise::duplicate_module),
        help("first defined in '{first}', remove one of the definitions")
    )]
    DuplicateModule {
        #[source_code]
        src: NamedSource<String>,
        #[label("defined again here")]
        span: Option<SourceSpan>,
        name: String,
        first: String,
    },

    #[error("prefix '{prefix}' is used by both '{first}' and '{second}'")]
    #[diagnostic(code(leafwise::duplicate_prefix))]
    DuplicatePrefix {
        #[source_code]
        src: NamedSource<String>,
        #[label("prefix reused here")]
        span: Option<SourceSpan>,
        prefix: String,
        first: String,
        second: String,
    },

    #[error("{message}")]
    #[diagnostic(code(leafwise::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("unknown prefix or module '{qualifier}' in {context}")]
    #[diagnostic(
        code(leafwise::unknown_qualifier),
        help("qualify names with the prefix or name of a loaded module")
    )]
    UnknownQualifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a loaded module")]
        span: Option<SourceSpan>,
        qualifier: String,
        context: String,
    },

    #[error("unknown identity '{name}'")]
    #[diagnostic(code(leafwise::unknown_identity))]
    UnknownIdentity {
        #[source_code]
        src: NamedSource<String>,
        #[label("no identity with this name")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("augment target '{target}' does not exist")]
    #[diagnostic(
        code(leafwise::unresolved_augment),
        help("targets are absolute paths such as '/prefix:container/prefix:list'")
    )]
    UnresolvedAugment {
        #[source_code]
        src: NamedSource<String>,
        #[label("target not found")]
        span: SourceSpan,
        target: String,
    },

    #[error("module '{name}' not found")]
    #[diagnostic(code(leafwise::module_not_found), help("loaded modules: {loaded}"))]
    ModuleNotFound { name: String, loaded: String },
}
