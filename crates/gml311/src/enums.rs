//! GML and XLink enumerations
//!
//! Each enumeration is also declared in the package as a data type with
//! the same literals in the same order, so the Rust discriminant is the
//! literal's ordinal.

use xsd_model::{EnumId, EnumValue, Value};

use crate::schema::{schema, Enums};

macro_rules! gml_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:ident {
            $($(#[$vmeta:meta])* $variant:ident = $literal:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Schema literals in ordinal order
            pub const LITERALS: &'static [&'static str] = &[$($literal,)+];

            const VARIANTS: &'static [$name] = &[$($name::$variant,)+];

            /// Schema literal
            pub fn literal(self) -> &'static str {
                Self::LITERALS[self as usize]
            }

            /// Parse a schema literal
            pub fn from_literal(literal: &str) -> Option<Self> {
                let ordinal = Self::LITERALS.iter().position(|l| *l == literal)?;
                Some(Self::VARIANTS[ordinal])
            }

            fn enum_id(enums: &Enums) -> EnumId {
                enums.$field
            }

            /// Feature value for this literal
            pub fn to_value(self) -> Value {
                self.to_value_in(Self::enum_id(&schema().enums))
            }

            pub(crate) fn to_value_in(self, id: EnumId) -> Value {
                Value::Enum(EnumValue::new(id, self as u32))
            }

            /// Literal held by a feature value
            pub fn from_value(value: &Value) -> Option<Self> {
                let e = value.as_enum()?;
                if e.ty != Self::enum_id(&schema().enums) {
                    return None;
                }
                Self::VARIANTS.get(e.ordinal as usize).copied()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.literal())
            }
        }
    };
}

gml_enum! {
    /// `xlink:actuate`
    ActuateType, actuate {
        OnLoad = "onLoad",
        OnRequest = "onRequest",
        Other = "other",
        None = "none",
    }
}

gml_enum! {
    /// `xlink:show`
    ShowType, show {
        New = "new",
        Replace = "replace",
        Embed = "embed",
        Other = "other",
        None = "none",
    }
}

gml_enum! {
    /// `xlink:type`
    TypeType, type_type {
        Simple = "simple",
        Extended = "extended",
        Title = "title",
        Resource = "resource",
        Locator = "locator",
        Arc = "arc",
    }
}

gml_enum! {
    /// Interpolation method of a curve segment
    CurveInterpolationType, curve_interpolation {
        Linear = "linear",
        Geodesic = "geodesic",
        CircularArc3Points = "circularArc3Points",
        CircularArc2PointWithBulge = "circularArc2PointWithBulge",
        CircularArcCenterPointWithRadius = "circularArcCenterPointWithRadius",
        Elliptical = "elliptical",
        Clothoid = "clothoid",
        Conic = "conic",
        PolynomialSpline = "polynomialSpline",
        CubicSpline = "cubicSpline",
        RationalSpline = "rationalSpline",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_match_package() {
        let package = &schema().package;
        let show = package.enum_by_name("ShowType").unwrap();
        assert_eq!(show.literals, ShowType::LITERALS);
        assert_eq!(ShowType::Embed.literal(), "embed");
        assert_eq!(ShowType::from_literal("replace"), Some(ShowType::Replace));
        assert_eq!(ShowType::from_literal("popup"), None);
    }

    #[test]
    fn test_value_round_trip() {
        let value = CurveInterpolationType::Geodesic.to_value();
        assert_eq!(
            CurveInterpolationType::from_value(&value),
            Some(CurveInterpolationType::Geodesic)
        );
        // Same ordinal, different enumeration
        assert_eq!(ShowType::from_value(&value), None);
        assert_eq!(ActuateType::from_value(&Value::Null), None);
    }
}
