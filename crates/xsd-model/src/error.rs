//! Object model errors

use thiserror::Error;

/// Result type for object model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the registry and the object graph.
///
/// Most of these describe contract violations: the non-`try_` graph
/// operations panic with the error's message instead of returning it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// No class with the given name is registered
    #[error("Unknown class: {name}")]
    UnknownClass {
        /// Class name that was not found
        name: String,
    },

    /// No feature with the given name on the class
    #[error("Unknown feature '{feature}' on {class}")]
    UnknownFeature {
        /// Class name
        class: String,
        /// Feature name that was not found
        feature: String,
    },

    /// Feature index outside the class's feature table
    #[error("Invalid feature index {index} on {class} (class has {count} features)")]
    InvalidFeatureIndex {
        /// Class name
        class: String,
        /// Offending index
        index: usize,
        /// Number of features declared on the class
        count: usize,
    },

    /// Attempt to instantiate an abstract class
    #[error("Cannot instantiate abstract class {name}")]
    AbstractClass {
        /// Class name
        name: String,
    },

    /// Value incompatible with the feature's declared type
    #[error("Type mismatch on {feature}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Feature name
        feature: String,
        /// Expected type
        expected: String,
        /// Actual value description
        actual: String,
    },

    /// Operation not applicable to the feature's kind
    #[error("Feature {feature} is {kind}, cannot {operation}")]
    KindMismatch {
        /// Feature name
        feature: String,
        /// Feature kind
        kind: String,
        /// Attempted operation
        operation: String,
    },

    /// Node id does not refer to a live node
    #[error("Stale or unknown node {node}")]
    StaleNode {
        /// Node id display form
        node: String,
    },

    /// Containment assignment would make a node its own ancestor
    #[error("Containment cycle: {child} is an ancestor of {owner}")]
    ContainmentCycle {
        /// Node being attached
        child: String,
        /// Would-be owner
        owner: String,
    },

    /// Feature is not a member of the given choice group
    #[error("Feature {feature} is not a member of group {group}")]
    NotGroupMember {
        /// Member feature name
        feature: String,
        /// Group feature name
        group: String,
    },

    /// List index out of bounds
    #[error("Index {index} out of bounds (length: {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current length
        len: usize,
    },

    /// Literal cannot be converted to the data type
    #[error("The value '{literal}' is not a valid {data_type}")]
    InvalidLiteral {
        /// Data type name
        data_type: String,
        /// Offending literal
        literal: String,
    },

    /// Name declared twice within the same scope
    #[error("Duplicate {what}: {name}")]
    Duplicate {
        /// What was duplicated (class, feature, enum, literal)
        what: &'static str,
        /// Duplicated name
        name: String,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ModelError {
    /// Panic with this error's message. Used by the infallible graph API,
    /// where an error means the caller broke the object model contract.
    #[track_caller]
    pub(crate) fn violated(self) -> ! {
        panic!("object model contract violation: {}", self)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Config(err.to_string())
    }
}
