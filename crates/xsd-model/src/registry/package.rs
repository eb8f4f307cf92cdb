//! Packages: the feature descriptor registry
//!
//! A [`Package`] is the immutable table of every class and enumeration of
//! one schema. It is built once through [`PackageBuilder`] and then shared
//! read-only (typically behind an `Arc` in a process-wide lazy cell) by
//! every graph that instantiates the schema.

use rustc_hash::FxHashMap;

use super::class::{ClassBuilder, ClassDescriptor};
use super::descriptor::{FeatureDescriptor, FeatureKind};
use crate::error::{ModelError, ModelResult};
use crate::value::{ClassId, EnumId, EnumValue, Value, ValueType};

/// An enumeration data type
#[derive(Debug, Clone)]
pub struct EnumDescriptor {
    /// Enumeration ID
    pub id: EnumId,
    /// Data type name
    pub name: String,
    /// Literal names, by ordinal
    pub literals: Vec<String>,
}

impl EnumDescriptor {
    /// Find a literal's ordinal by name
    pub fn ordinal(&self, literal: &str) -> Option<u32> {
        self.literals
            .iter()
            .position(|l| l == literal)
            .map(|pos| pos as u32)
    }

    /// Get a literal's name by ordinal
    pub fn literal(&self, ordinal: u32) -> Option<&str> {
        self.literals.get(ordinal as usize).map(String::as_str)
    }

    /// Value for the literal `name`
    pub fn value_of(&self, literal: &str) -> Option<EnumValue> {
        self.ordinal(literal).map(|ordinal| EnumValue::new(self.id, ordinal))
    }
}

/// Registry of the classes and enumerations of one schema
#[derive(Debug)]
pub struct Package {
    /// Package name (schema prefix)
    pub name: String,
    /// Namespace URI
    pub ns_uri: String,
    /// Classes indexed by class ID
    classes: Vec<ClassDescriptor>,
    /// Class name to ID mapping
    class_indices: FxHashMap<String, ClassId>,
    /// Enumerations indexed by enum ID
    enums: Vec<EnumDescriptor>,
    /// Enumeration name to ID mapping
    enum_indices: FxHashMap<String, EnumId>,
}

impl Package {
    /// Start declaring a package
    pub fn builder(name: &str, ns_uri: &str) -> PackageBuilder {
        PackageBuilder::new(name, ns_uri)
    }

    /// Get class metadata
    #[inline]
    pub fn class(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id.index())
    }

    /// Lookup a class by name
    pub fn class_by_name(&self, name: &str) -> Option<&ClassDescriptor> {
        self.class_indices.get(name).and_then(|&id| self.class(id))
    }

    /// All classes, by ID
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    /// Ordered feature table of a class, inherited features first
    pub fn describe(&self, id: ClassId) -> &[FeatureDescriptor] {
        self.class(id).map(ClassDescriptor::features).unwrap_or_default()
    }

    /// Get a feature by class and index in O(1)
    #[inline]
    pub fn feature(&self, class: ClassId, index: usize) -> Option<&FeatureDescriptor> {
        self.class(class).and_then(|c| c.feature(index))
    }

    /// Get enumeration metadata
    pub fn enumeration(&self, id: EnumId) -> Option<&EnumDescriptor> {
        self.enums.get(id.index())
    }

    /// Lookup an enumeration by name
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enum_indices.get(name).and_then(|&id| self.enumeration(id))
    }

    /// Name of an enum literal, if the value is valid for its type
    pub fn literal_name(&self, value: EnumValue) -> Option<&str> {
        self.enumeration(value.ty)?.literal(value.ordinal)
    }

    /// Supertype chain of a class, starting with the class itself
    pub fn superclasses(&self, id: ClassId) -> impl Iterator<Item = &ClassDescriptor> {
        let mut current = self.class(id);
        std::iter::from_fn(move || {
            let class = current?;
            current = class.supertype.and_then(|parent| self.class(parent));
            Some(class)
        })
    }

    /// Check if `sub` is `sup` or inherits from it
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        self.superclasses(sub).any(|class| class.id == sup)
    }

    /// Human-readable name of a value type
    pub fn type_name(&self, ty: ValueType) -> String {
        match ty {
            ValueType::Bool => "boolean".to_string(),
            ValueType::Int => "integer".to_string(),
            ValueType::Double => "double".to_string(),
            ValueType::String => "string".to_string(),
            ValueType::DoubleList => "doubleList".to_string(),
            ValueType::Enum(id) => self
                .enumeration(id)
                .map_or_else(|| id.index().to_string(), |e| e.name.clone()),
            ValueType::Class(id) => self
                .class(id)
                .map_or_else(|| id.to_string(), |c| c.name.clone()),
            ValueType::Entries => "group".to_string(),
        }
    }

    /// Check a non-node value against a data type. Node values need the
    /// graph to know their class and are checked there.
    pub(crate) fn conforms_data(&self, ty: ValueType, value: &Value) -> bool {
        match (ty, value) {
            (_, Value::Null) => true,
            (ValueType::Bool, Value::Bool(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::Double, Value::Double(_))
            | (ValueType::String, Value::String(_))
            | (ValueType::DoubleList, Value::DoubleList(_)) => true,
            (ValueType::Enum(id), Value::Enum(e)) => {
                e.ty == id && self.literal_name(*e).is_some()
            }
            _ => false,
        }
    }
}

/// Builder for a [`Package`]
///
/// Declaration problems (duplicate names, unknown supertypes, group members
/// pointing at a non-group feature) are collected and reported by
/// [`PackageBuilder::build`].
#[derive(Debug)]
pub struct PackageBuilder {
    name: String,
    ns_uri: String,
    classes: Vec<ClassDescriptor>,
    enums: Vec<EnumDescriptor>,
    errors: Vec<ModelError>,
}

impl PackageBuilder {
    fn new(name: &str, ns_uri: &str) -> Self {
        Self {
            name: name.to_string(),
            ns_uri: ns_uri.to_string(),
            classes: Vec::new(),
            enums: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Declare an enumeration data type
    pub fn enumeration(&mut self, name: &str, literals: &[&str]) -> EnumId {
        let id = EnumId(self.enums.len() as u32);
        for (pos, literal) in literals.iter().enumerate() {
            if literals[..pos].contains(literal) {
                self.record_error(ModelError::Duplicate {
                    what: "enum literal",
                    name: format!("{}.{}", name, literal),
                });
            }
        }
        self.enums.push(EnumDescriptor {
            id,
            name: name.to_string(),
            literals: literals.iter().map(|l| l.to_string()).collect(),
        });
        id
    }

    /// Declare a root class
    pub fn class(&mut self, name: &str) -> ClassBuilder<'_> {
        let id = ClassId(self.classes.len() as u32);
        ClassBuilder::new(self, id, name)
    }

    /// Declare a class inheriting every feature of `parent`
    pub fn subclass(&mut self, name: &str, parent: ClassId) -> ClassBuilder<'_> {
        let id = ClassId(self.classes.len() as u32);
        ClassBuilder::with_parent(self, id, name, parent)
    }

    pub(crate) fn class_descriptor(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id.index())
    }

    pub(crate) fn record_error(&mut self, error: ModelError) {
        self.errors.push(error);
    }

    pub(crate) fn push_class(&mut self, class: ClassDescriptor) {
        self.classes.push(class);
    }

    /// Validate the declarations and freeze the package
    pub fn build(mut self) -> ModelResult<Package> {
        let mut class_indices = FxHashMap::default();
        for class in &self.classes {
            if class_indices.insert(class.name.clone(), class.id).is_some() {
                self.errors.push(ModelError::Duplicate {
                    what: "class",
                    name: class.name.clone(),
                });
            }
        }

        let mut enum_indices = FxHashMap::default();
        for e in &self.enums {
            if enum_indices.insert(e.name.clone(), e.id).is_some() {
                self.errors.push(ModelError::Duplicate {
                    what: "enumeration",
                    name: e.name.clone(),
                });
            }
        }

        let mut package = Package {
            name: self.name,
            ns_uri: self.ns_uri,
            classes: self.classes,
            class_indices,
            enums: self.enums,
            enum_indices,
        };

        for class in &package.classes {
            for feature in class.features() {
                if let Some(err) = check_feature(&package, class, feature) {
                    self.errors.push(err);
                }
            }
        }

        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }

        package.classes.shrink_to_fit();
        tracing::debug!(
            "Built package {} ({} classes, {} enumerations)",
            package.name,
            package.classes.len(),
            package.enums.len()
        );
        Ok(package)
    }
}

fn check_feature(
    package: &Package,
    class: &ClassDescriptor,
    feature: &FeatureDescriptor,
) -> Option<ModelError> {
    match feature.value_type {
        ValueType::Class(id) if package.class(id).is_none() => {
            return Some(ModelError::UnknownClass {
                name: id.to_string(),
            });
        }
        ValueType::Enum(id) if package.enumeration(id).is_none() => {
            return Some(ModelError::UnknownFeature {
                class: class.name.clone(),
                feature: format!("{} (enumeration {})", feature.name, id.index()),
            });
        }
        _ => {}
    }

    if let Some(group) = feature.group {
        let is_group = class
            .feature(group)
            .is_some_and(|g| g.kind == FeatureKind::Group);
        if !is_group || feature.kind == FeatureKind::Group {
            return Some(ModelError::NotGroupMember {
                feature: feature.name.clone(),
                group: group.to_string(),
            });
        }
    }

    if !feature.is_many() && !package.conforms_data(feature.value_type, &feature.default) {
        return Some(ModelError::TypeMismatch {
            feature: format!("{}.{} default", class.name, feature.name),
            expected: package.type_name(feature.value_type),
            actual: feature.default.type_name().to_string(),
        });
    }
    None
}
