//! Feature values and identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a node in a [`ModelGraph`](crate::ModelGraph) arena.
///
/// The generation makes handles to deleted nodes detectable: a slot that
/// has been freed and reused carries a newer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Arena slot index
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Identifier of a class in a [`Package`](crate::Package)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    /// Position of the class in its package
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Identifier of an enumeration data type in a [`Package`](crate::Package)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnumId(pub(crate) u32);

impl EnumId {
    /// Position of the enumeration in its package
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A literal of an enumeration data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Enumeration the literal belongs to
    pub ty: EnumId,
    /// Literal position within the enumeration
    pub ordinal: u32,
}

impl EnumValue {
    /// Create an enum value
    pub fn new(ty: EnumId, ordinal: u32) -> Self {
        Self { ty, ordinal }
    }
}

/// Declared type of a feature's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Boolean
    Bool,
    /// Signed integer
    Int,
    /// IEEE 754 double
    Double,
    /// Text
    String,
    /// Whitespace-separated list of doubles (e.g. `gml:doubleList`)
    DoubleList,
    /// Literal of an enumeration
    Enum(EnumId),
    /// Node whose class is the given class or one of its subclasses
    Class(ClassId),
    /// Ordered, tagged entries of a choice group
    Entries,
}

impl ValueType {
    /// Check whether values of this type are graph nodes
    pub fn is_class(self) -> bool {
        matches!(self, ValueType::Class(_))
    }
}

/// One entry of a choice group: the member feature it is tagged with,
/// and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Feature index of the group member
    pub feature: usize,
    /// Entry value
    pub value: Value,
}

impl GroupEntry {
    /// Create a group entry
    pub fn new(feature: usize, value: Value) -> Self {
        Self { feature, value }
    }
}

/// Dynamically typed feature value
///
/// Single-valued features hold one scalar or node reference, multi-valued
/// features read back as [`Value::List`] and choice groups as
/// [`Value::Entries`]. `Null` is the absent value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Double
    Double(f64),
    /// Text
    String(String),
    /// List of doubles
    DoubleList(Vec<f64>),
    /// Enumeration literal
    Enum(EnumValue),
    /// Reference to a node
    Node(NodeId),
    /// Snapshot of a multi-valued feature
    List(Vec<Value>),
    /// Snapshot of a choice group
    Entries(Vec<GroupEntry>),
}

impl Value {
    /// Check if the value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer, if this is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the double, if this is one
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the double list, if this is one
    pub fn as_double_list(&self) -> Option<&[f64]> {
        match self {
            Value::DoubleList(values) => Some(values),
            _ => None,
        }
    }

    /// Get the enum literal, if this is one
    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(e) => Some(*e),
            _ => None,
        }
    }

    /// Get the node reference, if this is one
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// Get the list items, if this is a list snapshot
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the group entries, if this is a group snapshot
    pub fn as_entries(&self) -> Option<&[GroupEntry]> {
        match self {
            Value::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short name of the value's runtime type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::DoubleList(_) => "double list",
            Value::Enum(_) => "enum",
            Value::Node(_) => "node",
            Value::List(_) => "list",
            Value::Entries(_) => "entries",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::DoubleList(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
