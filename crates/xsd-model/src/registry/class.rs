//! Class descriptors
//!
//! A class owns its full feature table: inherited features first, in the
//! order the supertype chain declared them, then its own.

use rustc_hash::FxHashMap;

use super::descriptor::{FeatureDescriptor, FeatureSpec};
use super::package::PackageBuilder;
use crate::value::ClassId;

/// Metadata for a single schema class
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Class ID (position in the package)
    pub id: ClassId,
    /// Class name
    pub name: String,
    /// Direct supertype (None for root classes)
    pub supertype: Option<ClassId>,
    /// Abstract classes cannot be instantiated
    pub is_abstract: bool,
    /// Features by index, inherited ones first
    features: Vec<FeatureDescriptor>,
    /// Feature name to index mapping
    feature_indices: FxHashMap<String, usize>,
}

impl ClassDescriptor {
    pub(crate) fn new(id: ClassId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            supertype: None,
            is_abstract: false,
            features: Vec::new(),
            feature_indices: FxHashMap::default(),
        }
    }

    /// All features, ordered by index
    #[inline]
    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    /// Get a feature by index
    #[inline]
    pub fn feature(&self, index: usize) -> Option<&FeatureDescriptor> {
        self.features.get(index)
    }

    /// Get feature index by name
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_indices.get(name).copied()
    }

    /// Get a feature by name
    pub fn feature_by_name(&self, name: &str) -> Option<&FeatureDescriptor> {
        self.feature_index(name).map(|index| &self.features[index])
    }

    /// Number of features, including inherited ones
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Features declared by this class itself
    pub fn declared_features(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.features
            .iter()
            .filter(move |f| f.declaring_class == self.id)
    }

    /// Members of the choice group at `group`, in index order
    pub fn group_members(&self, group: usize) -> impl Iterator<Item = &FeatureDescriptor> {
        self.features
            .iter()
            .filter(move |f| f.group == Some(group))
    }

    pub(crate) fn push_feature(&mut self, feature: FeatureDescriptor) -> bool {
        if self.feature_indices.contains_key(&feature.name) {
            return false;
        }
        self.feature_indices
            .insert(feature.name.clone(), feature.index);
        self.features.push(feature);
        true
    }
}

/// Declares one class of a package under construction.
///
/// Obtained from [`PackageBuilder::class`] or [`PackageBuilder::subclass`];
/// inherited features are already in place. [`ClassBuilder::finish`]
/// registers the class and returns its id.
pub struct ClassBuilder<'p> {
    package: &'p mut PackageBuilder,
    descriptor: ClassDescriptor,
}

impl<'p> ClassBuilder<'p> {
    pub(crate) fn new(package: &'p mut PackageBuilder, id: ClassId, name: &str) -> Self {
        Self {
            package,
            descriptor: ClassDescriptor::new(id, name),
        }
    }

    pub(crate) fn with_parent(
        package: &'p mut PackageBuilder,
        id: ClassId,
        name: &str,
        parent: ClassId,
    ) -> Self {
        let mut descriptor = ClassDescriptor::new(id, name);
        match package.class_descriptor(parent) {
            Some(parent_desc) => {
                descriptor.supertype = Some(parent);
                for feature in parent_desc.features() {
                    descriptor.push_feature(feature.clone());
                }
            }
            None => package.record_error(crate::ModelError::UnknownClass {
                name: parent.to_string(),
            }),
        }
        Self {
            package,
            descriptor,
        }
    }

    /// Id the class will be registered under, for self-referencing features
    pub fn id(&self) -> ClassId {
        self.descriptor.id
    }

    /// Mark the class abstract
    pub fn abstract_class(mut self) -> Self {
        self.descriptor.is_abstract = true;
        self
    }

    /// Declare a feature and return its index. A name declared twice
    /// returns the index of the first declaration and fails the build.
    pub fn feature(&mut self, spec: FeatureSpec) -> usize {
        let index = self.descriptor.features.len();
        let name = spec.name.clone();
        let descriptor = FeatureDescriptor {
            name: spec.name,
            index,
            kind: spec.kind,
            value_type: spec.value_type,
            default: spec.default,
            unsettable: spec.unsettable,
            required: spec.required,
            group: spec.group,
            declaring_class: self.descriptor.id,
        };
        if self.descriptor.push_feature(descriptor) {
            return index;
        }
        self.package.record_error(crate::ModelError::Duplicate {
            what: "feature",
            name: format!("{}.{}", self.descriptor.name, name),
        });
        self.descriptor.feature_index(&name).unwrap_or(index)
    }

    /// Register the class with the package
    pub fn finish(self) -> ClassId {
        let id = self.descriptor.id;
        self.package.push_class(self.descriptor);
        id
    }
}
