//! Feature descriptors
//!
//! A feature is a named, indexed structural property of a class. The index
//! is the feature's slot offset in every instance of the class and of its
//! subclasses, so dispatch never goes through the name.

use std::fmt;

use crate::value::{ClassId, Value, ValueType};

/// Structural kind of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Single-valued data attribute
    Attribute,
    /// Single-valued containment reference (parent owns child)
    Containment,
    /// Single-valued cross reference (no ownership)
    Reference,
    /// Multi-valued data attribute
    ManyAttribute,
    /// Multi-valued containment reference
    ManyContainment,
    /// Multi-valued cross reference
    ManyReference,
    /// Ordered choice among several member features
    Group,
}

impl FeatureKind {
    /// Check if the feature holds an ordered collection
    #[inline]
    pub fn is_many(self) -> bool {
        matches!(
            self,
            FeatureKind::ManyAttribute
                | FeatureKind::ManyContainment
                | FeatureKind::ManyReference
                | FeatureKind::Group
        )
    }

    /// Check if the feature owns its values
    #[inline]
    pub fn is_containment(self) -> bool {
        matches!(self, FeatureKind::Containment | FeatureKind::ManyContainment)
    }

    /// Check if the feature refers to nodes
    #[inline]
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            FeatureKind::Containment
                | FeatureKind::Reference
                | FeatureKind::ManyContainment
                | FeatureKind::ManyReference
        )
    }

    /// Check if the feature holds data values
    #[inline]
    pub fn is_attribute(self) -> bool {
        matches!(self, FeatureKind::Attribute | FeatureKind::ManyAttribute)
    }

    /// Reference lists never hold the same node twice
    #[inline]
    pub(crate) fn is_unique(self) -> bool {
        matches!(self, FeatureKind::ManyContainment | FeatureKind::ManyReference)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureKind::Attribute => "a single-valued attribute",
            FeatureKind::Containment => "a single-valued containment",
            FeatureKind::Reference => "a single-valued reference",
            FeatureKind::ManyAttribute => "a multi-valued attribute",
            FeatureKind::ManyContainment => "a multi-valued containment",
            FeatureKind::ManyReference => "a multi-valued reference",
            FeatureKind::Group => "a choice group",
        };
        f.write_str(name)
    }
}

/// Metadata for one structural feature of a class
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDescriptor {
    /// Feature name (schema element or attribute name)
    pub name: String,
    /// Slot index, stable for the class and all its subclasses
    pub index: usize,
    /// Structural kind
    pub kind: FeatureKind,
    /// Declared value type
    pub value_type: ValueType,
    /// Default value (`Null` when the schema declares none)
    pub default: Value,
    /// Whether "unset" is distinguished from "explicitly set to default"
    pub unsettable: bool,
    /// Lower bound of 1
    pub required: bool,
    /// Index of the choice group this feature is projected from
    pub group: Option<usize>,
    /// Class that declared the feature (a supertype for inherited features)
    pub declaring_class: ClassId,
}

impl FeatureDescriptor {
    /// Check if this feature is a projection over a choice group
    #[inline]
    pub fn is_group_member(&self) -> bool {
        self.group.is_some()
    }

    /// Check if the feature holds an ordered collection
    #[inline]
    pub fn is_many(&self) -> bool {
        self.kind.is_many()
    }

    /// Check if the feature owns its values
    #[inline]
    pub fn is_containment(&self) -> bool {
        self.kind.is_containment()
    }
}

/// Declaration of a feature, passed to [`ClassBuilder::feature`](super::ClassBuilder::feature)
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    pub(crate) name: String,
    pub(crate) kind: FeatureKind,
    pub(crate) value_type: ValueType,
    pub(crate) default: Value,
    pub(crate) unsettable: bool,
    pub(crate) required: bool,
    pub(crate) group: Option<usize>,
}

impl FeatureSpec {
    fn new(name: &str, kind: FeatureKind, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind,
            value_type,
            default: Value::Null,
            unsettable: false,
            required: false,
            group: None,
        }
    }

    /// Single-valued data attribute
    pub fn attribute(name: &str, value_type: ValueType) -> Self {
        Self::new(name, FeatureKind::Attribute, value_type)
    }

    /// Multi-valued data attribute
    pub fn many_attribute(name: &str, value_type: ValueType) -> Self {
        Self::new(name, FeatureKind::ManyAttribute, value_type)
    }

    /// Single-valued containment of `class`
    pub fn containment(name: &str, class: ClassId) -> Self {
        Self::new(name, FeatureKind::Containment, ValueType::Class(class))
    }

    /// Multi-valued containment of `class`
    pub fn many_containment(name: &str, class: ClassId) -> Self {
        Self::new(name, FeatureKind::ManyContainment, ValueType::Class(class))
    }

    /// Single-valued cross reference to `class`
    pub fn reference(name: &str, class: ClassId) -> Self {
        Self::new(name, FeatureKind::Reference, ValueType::Class(class))
    }

    /// Multi-valued cross reference to `class`
    pub fn many_reference(name: &str, class: ClassId) -> Self {
        Self::new(name, FeatureKind::ManyReference, ValueType::Class(class))
    }

    /// Ordered choice group; members are declared with [`FeatureSpec::in_group`]
    pub fn group(name: &str) -> Self {
        Self::new(name, FeatureKind::Group, ValueType::Entries)
    }

    /// Set the default value
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Distinguish "unset" from "set to the default"
    pub fn unsettable(mut self) -> Self {
        self.unsettable = true;
        self
    }

    /// Mark the feature as required (lower bound 1)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Project the feature over the choice group at `group`
    pub fn in_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }
}
