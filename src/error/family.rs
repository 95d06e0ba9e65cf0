//! Named error families.
//!
//! An `ErrorKind` is a node in a tree of error names rooted at `GoError`.
//! Deriving a kind with [`ErrorKind::suberror`] links it to its parent, and a
//! [`GoError`] built from any kind answers `is(..)` for that kind and every
//! ancestor. Because `GoError` implements `std::error::Error`, it also flows
//! through generic `Box<dyn Error>` handling and downcasts back.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GO_ERROR: OnceLock<ErrorKind> = OnceLock::new();

#[derive(Debug)]
struct KindNode {
    name: String,
    default_message: Option<String>,
    parent: Option<ErrorKind>,
}

/// A named error kind. Cloning is cheap; equality is identity.
#[derive(Debug, Clone)]
pub struct ErrorKind(Arc<KindNode>);

impl ErrorKind {
    /// The process-wide root kind, `GoError`. Every call returns the same kind.
    pub fn root() -> Self {
        GO_ERROR
            .get_or_init(|| {
                Self(Arc::new(KindNode {
                    name: "GoError".to_string(),
                    default_message: None,
                    parent: None,
                }))
            })
            .clone()
    }

    /// Derives a child kind. Instances of the child are also instances of `self`.
    pub fn suberror(&self, name: &str, default_message: Option<&str>) -> Self {
        Self(Arc::new(KindNode {
            name: name.to_string(),
            default_message: default_message.map(str::to_string),
            parent: Some(self.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&ErrorKind> {
        self.0.parent.as_ref()
    }

    /// The nearest default message along the ancestry, if any.
    pub fn default_message(&self) -> Option<&str> {
        self.ancestry().find_map(|kind| kind.0.default_message.as_deref())
    }

    /// Iterates this kind followed by each ancestor up to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &ErrorKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// True if `self` is `other` or derives from it.
    pub fn is_a(&self, other: &ErrorKind) -> bool {
        self.ancestry().any(|kind| kind == other)
    }

    /// Builds an instance of this kind.
    pub fn new_error(&self, message: Option<&str>) -> GoError {
        GoError::new(self, message)
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ErrorKind {}

/// An error instance belonging to an `ErrorKind`.
#[derive(Debug, Clone)]
pub struct GoError {
    kind: ErrorKind,
    message: Option<String>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl GoError {
    /// A non-empty message overrides the kind's default message.
    pub fn new(kind: &ErrorKind, message: Option<&str>) -> Self {
        let message = message
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .or_else(|| kind.default_message().map(str::to_string));
        Self {
            kind: kind.clone(),
            message,
            cause: None,
        }
    }

    /// Attaches an underlying error, exposed through `Error::source`.
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True if this error's kind is `kind` or derives from it.
    pub fn is(&self, kind: &ErrorKind) -> bool {
        self.kind.is_a(kind)
    }
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) if !message.is_empty() => write!(f, "[{}: {}]", self.name(), message),
            _ => write!(f, "[{}]", self.name()),
        }
    }
}

impl Error for GoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
