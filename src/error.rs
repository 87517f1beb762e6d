use thiserror::Error;

use crate::scope::ScopeId;
use crate::{Identifier, TypeKey};

/// Error raised by user constructors and factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors triggered during registration and resolution of beans
#[derive(Error, Debug)]
pub enum WiringError {
    #[error("Duplicate binding: {identifier} is already bound")]
    DuplicateBinding { identifier: Identifier },

    #[error("Type mismatch: a provider of {provided} is not suitable to {identifier}")]
    TypeMismatch {
        identifier: Identifier,
        provided: TypeKey,
    },

    #[error("Ambiguous constructor: {class} declares {count} injectable constructors")]
    AmbiguousConstructor { class: &'static str, count: usize },

    #[error("Missing dependency: no binding for {identifier}{}", required_by_suffix(.required_by))]
    MissingDependency {
        identifier: Identifier,
        required_by: Option<Identifier>,
    },

    #[error("Failed to create bean {identifier}: {source}")]
    BeanCreation {
        identifier: Identifier,
        #[source]
        source: BoxError,
    },

    #[error("Scope {scope} is stopped")]
    ClosedScope { scope: ScopeId },

    #[error("Cyclic dependencies: {}", format_path(.path))]
    CyclicDependency { path: Vec<Identifier> },

    #[error("Resolution depth exceeded {limit} while resolving {identifier}")]
    ResolutionTooDeep {
        identifier: Identifier,
        limit: usize,
    },

    #[error("Bean not found: no binding for {identifier}")]
    BeanNotFound { identifier: Identifier },

    #[error("Bean {identifier} cannot be retrieved as {expected}")]
    BeanTypeMismatch {
        identifier: Identifier,
        expected: TypeKey,
    },
}

impl WiringError {
    pub(crate) fn creation(identifier: &Identifier, source: impl Into<BoxError>) -> Self {
        WiringError::BeanCreation {
            identifier: identifier.clone(),
            source: source.into(),
        }
    }
}

fn required_by_suffix(required_by: &Option<Identifier>) -> String {
    match required_by {
        Some(id) => format!(" (required by {})", id),
        None => String::new(),
    }
}

fn format_path(path: &[Identifier]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
