//! Data-type conversion between lexical forms and values
//!
//! Deserializers hand attribute text to [`Package::create_from_string`];
//! serializers read it back with [`Package::convert_to_string`].

use crate::error::{ModelError, ModelResult};
use crate::registry::Package;
use crate::value::{Value, ValueType};

impl Package {
    /// Parse the lexical form of a data value
    pub fn create_from_string(&self, ty: ValueType, literal: &str) -> ModelResult<Value> {
        let invalid = || ModelError::InvalidLiteral {
            data_type: self.type_name(ty),
            literal: literal.to_string(),
        };
        let text = literal.trim();
        match ty {
            ValueType::Bool => match text {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
            ValueType::Int => text.parse().map(Value::Int).map_err(|_| invalid()),
            ValueType::Double => parse_double(text).map(Value::Double).ok_or_else(invalid),
            ValueType::String => Ok(Value::String(literal.to_string())),
            ValueType::DoubleList => text
                .split_whitespace()
                .map(parse_double)
                .collect::<Option<Vec<f64>>>()
                .map(Value::DoubleList)
                .ok_or_else(invalid),
            ValueType::Enum(id) => {
                let enumeration = self.enumeration(id).ok_or_else(invalid)?;
                enumeration
                    .value_of(text)
                    .map(Value::Enum)
                    .ok_or_else(|| ModelError::InvalidLiteral {
                        data_type: format!("enumerator of '{}'", enumeration.name),
                        literal: literal.to_string(),
                    })
            }
            ValueType::Class(_) | ValueType::Entries => Err(invalid()),
        }
    }

    /// Lexical form of a data value; `None` for null, nodes and snapshots
    pub fn convert_to_string(&self, value: &Value) -> Option<String> {
        match value {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Double(d) => Some(format_double(*d)),
            Value::String(s) => Some(s.clone()),
            Value::DoubleList(values) => Some(
                values
                    .iter()
                    .map(|d| format_double(*d))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Value::Enum(e) => self.literal_name(*e).map(str::to_string),
            Value::Null | Value::Node(_) | Value::List(_) | Value::Entries(_) => None,
        }
    }
}

/// XML Schema double, including the special values
fn parse_double(text: &str) -> Option<f64> {
    match text {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => text.parse().ok(),
    }
}

pub(crate) fn format_double(d: f64) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d.is_infinite() {
        if d > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        d.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumValue;

    fn package() -> (Package, ValueType) {
        let mut b = Package::builder("t", "urn:t");
        let show = b.enumeration("ShowType", &["new", "replace", "embed", "other", "none"]);
        (b.build().unwrap(), ValueType::Enum(show))
    }

    #[test]
    fn test_scalars() {
        let (p, _) = package();
        assert_eq!(p.create_from_string(ValueType::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(p.create_from_string(ValueType::Int, " 42 ").unwrap(), Value::Int(42));
        assert_eq!(
            p.create_from_string(ValueType::Double, "-INF").unwrap(),
            Value::Double(f64::NEG_INFINITY)
        );
        assert!(matches!(
            p.create_from_string(ValueType::Int, "4.2"),
            Err(ModelError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn test_double_list() {
        let (p, _) = package();
        let value = p.create_from_string(ValueType::DoubleList, "1.5 2\n-3").unwrap();
        assert_eq!(value, Value::DoubleList(vec![1.5, 2.0, -3.0]));
        assert_eq!(p.convert_to_string(&value).as_deref(), Some("1.5 2 -3"));
        assert_eq!(
            p.create_from_string(ValueType::DoubleList, "").unwrap(),
            Value::DoubleList(vec![])
        );
    }

    #[test]
    fn test_enum_literals() {
        let (p, show) = package();
        let ValueType::Enum(id) = show else { unreachable!() };
        let value = p.create_from_string(show, "embed").unwrap();
        assert_eq!(value, Value::Enum(EnumValue::new(id, 2)));
        assert_eq!(p.convert_to_string(&value).as_deref(), Some("embed"));

        let err = p.create_from_string(show, "popup").unwrap_err();
        assert_eq!(err.to_string(), "The value 'popup' is not a valid enumerator of 'ShowType'");
    }

    #[test]
    fn test_no_lexical_form_for_nodes() {
        let (p, _) = package();
        assert_eq!(p.convert_to_string(&Value::Null), None);
        assert_eq!(p.convert_to_string(&Value::List(vec![])), None);
    }
}
