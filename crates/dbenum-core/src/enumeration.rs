//! Enumerated-value capability
//!
//! An enumerated type is a closed set of members, each declared with a unique
//! underlying value. Members are `&'static` singletons: looking up the same
//! value twice yields the same reference.
//!
//! The registry stores codecs for many enum types side by side, so the typed
//! capability (`Enumerated`) is erased into `EnumClass` trait objects and
//! members into `EnumInstance` handles.
//!
//! # Declaring an enum
//!
//! ```
//! use dbenum_core::enumerated;
//! use dbenum_core::{Enumerated, ScalarValue};
//!
//! enumerated! {
//!     pub enum Action: str {
//!         Create = "create",
//!         Read = "read",
//!     }
//! }
//!
//! assert_eq!(Action::NAME, "Action");
//! assert!(Action::is_valid(&ScalarValue::from("read")));
//! assert_eq!(Action::of(&ScalarValue::from("create")), Some(&Action::Create));
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::errors::{DbEnumError, Result};
use crate::value::{EnumValue, ScalarValue};

/// Name of the capability a registered type must provide
pub const ENUMERATED_CAPABILITY: &str = "Enumerated";

/// A closed set of named members with unique underlying values
pub trait Enumerated: fmt::Debug + PartialEq + Send + Sync + Sized + 'static {
    /// Type identifier, used as the default registry key
    const NAME: &'static str;

    /// All members in declaration order
    fn values() -> &'static [Self];

    /// Underlying value of this member
    fn value(&self) -> EnumValue;

    /// The canonical singleton for this member
    fn member(&self) -> &'static Self;

    /// Whether `raw` is the underlying value of some member
    fn is_valid(raw: &ScalarValue) -> bool {
        Self::values().iter().any(|m| m.value().matches(raw))
    }

    /// The member whose underlying value is `raw`
    fn of(raw: &ScalarValue) -> Option<&'static Self> {
        Self::values().iter().find(|m| m.value().matches(raw))
    }

    /// Like [`Enumerated::of`], failing with the list of accepted values
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnumValue` when `raw` matches no member.
    fn try_of(raw: &ScalarValue) -> Result<&'static Self> {
        Self::of(raw).ok_or_else(|| DbEnumError::InvalidEnumValue {
            value: raw.to_text(),
            enum_name: Self::NAME.to_string(),
            expected: Self::values().iter().map(|m| m.value().to_string()).collect(),
        })
    }

    /// Type-erased handle to this member
    fn instance(&self) -> EnumInstance {
        EnumInstance::new(self.member())
    }
}

/// Declare a fieldless enum implementing [`Enumerated`]
///
/// Backing values are either string literals (`: str`) or integer
/// literals (`: int`). `NAME` is the enum's identifier.
///
/// ```
/// use dbenum_core::enumerated;
/// use dbenum_core::{Enumerated, EnumValue};
///
/// enumerated! {
///     pub enum Level: int {
///         Low = 1,
///         High = 10,
///     }
/// }
///
/// assert_eq!(Level::High.value(), EnumValue::Int(10));
/// ```
///
/// Backing values must be unique within the enum:
///
/// ```compile_fail
/// use dbenum_core::enumerated;
///
/// enumerated! {
///     enum Twice: str {
///         First = "x",
///         Second = "x",
///     }
/// }
/// ```
#[macro_export]
macro_rules! enumerated {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : str {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $crate::enumerated!(@emit [$(#[$meta])*] $vis $name Str {
            $($(#[$vmeta])* $variant = $value),+
        });
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : int {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $crate::enumerated!(@emit [$(#[$meta])*] $vis $name Int {
            $($(#[$vmeta])* $variant = $value),+
        });
    };
    (@emit [$($meta:tt)*] $vis:vis $name:ident $kind:ident {
        $($(#[$vmeta:meta])* $variant:ident = $value:literal),+
    }) => {
        $($meta)*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::enumeration::Enumerated for $name {
            const NAME: &'static str = stringify!($name);

            fn values() -> &'static [Self] {
                static VALUES: &[$name] = &[$($name::$variant),+];
                VALUES
            }

            fn value(&self) -> $crate::value::EnumValue {
                match self {
                    $($name::$variant => $crate::value::EnumValue::$kind($value)),+
                }
            }

            fn member(&self) -> &'static Self {
                // Variants carry no explicit discriminant, so `as usize` is the declaration index
                &<Self as $crate::enumeration::Enumerated>::values()[*self as usize]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$crate::enumeration::Enumerated::value(self), f)
            }
        }

        const _: () = {
            let values: &[$crate::value::EnumValue] =
                &[$($crate::value::EnumValue::$kind($value)),+];
            let mut i = 0;
            while i < values.len() {
                let mut j = i + 1;
                while j < values.len() {
                    if values[i].const_eq(&values[j]) {
                        panic!(concat!("duplicate backing value in enum ", stringify!($name)));
                    }
                    j += 1;
                }
                i += 1;
            }
        };
    };
}

/// Object-safe view of an [`Enumerated`] type
pub trait EnumClass: Send + Sync + fmt::Debug {
    /// Type identifier
    fn name(&self) -> &'static str;

    /// All members in declaration order
    fn values(&self) -> Vec<EnumInstance>;

    /// Whether `raw` is a valid underlying value
    fn is_valid(&self, raw: &ScalarValue) -> bool;

    /// The member for `raw`, if any
    fn of(&self, raw: &ScalarValue) -> Option<EnumInstance>;
}

struct ClassOf<E>(PhantomData<fn() -> E>);

/// Erase an enumerated type into an [`EnumClass`]
pub fn class_of<E: Enumerated>() -> Arc<dyn EnumClass> {
    Arc::new(ClassOf::<E>(PhantomData))
}

impl<E: Enumerated> fmt::Debug for ClassOf<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumClass").field(&E::NAME).finish()
    }
}

impl<E: Enumerated> EnumClass for ClassOf<E> {
    fn name(&self) -> &'static str {
        E::NAME
    }

    fn values(&self) -> Vec<EnumInstance> {
        E::values().iter().map(EnumInstance::new).collect()
    }

    fn is_valid(&self, raw: &ScalarValue) -> bool {
        E::is_valid(raw)
    }

    fn of(&self, raw: &ScalarValue) -> Option<EnumInstance> {
        E::of(raw).map(EnumInstance::new)
    }
}

/// Type-erased handle to an enum member
///
/// Equality compares the enum name and underlying value. Use
/// [`EnumInstance::same_member`] for identity.
#[derive(Clone, Copy)]
pub struct EnumInstance {
    enum_name: &'static str,
    value: EnumValue,
    member: &'static (dyn Any + Send + Sync),
}

impl EnumInstance {
    pub fn new<E: Enumerated>(member: &'static E) -> Self {
        Self {
            enum_name: E::NAME,
            value: member.value(),
            member,
        }
    }

    pub fn enum_name(&self) -> &'static str {
        self.enum_name
    }

    pub fn value(&self) -> EnumValue {
        self.value
    }

    /// Recover the typed member
    pub fn downcast<E: Enumerated>(&self) -> Option<&'static E> {
        let member: &'static (dyn Any + Send + Sync) = self.member;
        member.downcast_ref::<E>()
    }

    pub fn is<E: Enumerated>(&self) -> bool {
        self.member.is::<E>()
    }

    /// Whether both handles point at the same singleton
    pub fn same_member(&self, other: &EnumInstance) -> bool {
        std::ptr::eq(
            self.member as *const (dyn Any + Send + Sync) as *const (),
            other.member as *const (dyn Any + Send + Sync) as *const (),
        )
    }
}

impl PartialEq for EnumInstance {
    fn eq(&self, other: &Self) -> bool {
        self.enum_name == other.enum_name && self.value == other.value
    }
}

impl fmt::Debug for EnumInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.enum_name, self.value)
    }
}

impl fmt::Display for EnumInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// A type handed to registration by name
///
/// Descriptors built with [`TypeDescriptor::of`] carry the enumerated
/// capability. Opaque descriptors name a type without it and are rejected
/// at registration.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    class: Option<Arc<dyn EnumClass>>,
}

impl TypeDescriptor {
    /// Descriptor for an enumerated type
    pub fn of<E: Enumerated>() -> Self {
        Self {
            name: E::NAME.to_string(),
            class: Some(class_of::<E>()),
        }
    }

    /// Descriptor for a named type without the enumerated capability
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
        }
    }

    /// Opaque descriptor named after a Rust type
    pub fn of_type<T: ?Sized>() -> Self {
        Self::opaque(std::any::type_name::<T>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enumerated(&self) -> bool {
        self.class.is_some()
    }

    /// The enum class, if this type provides the capability
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnumType` naming the type and the required capability.
    pub fn require_enumerated(&self) -> Result<Arc<dyn EnumClass>> {
        self.class
            .clone()
            .ok_or_else(|| DbEnumError::InvalidEnumType {
                type_name: self.name.clone(),
                capability: ENUMERATED_CAPABILITY.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::enumerated! {
        enum Shade: str {
            Light = "light",
            Dark = "dark",
        }
    }

    crate::enumerated! {
        enum Weight: int {
            Light = 1,
            Heavy = 20,
        }
    }

    #[test]
    fn test_values_in_declaration_order() {
        assert_eq!(Shade::values(), &[Shade::Light, Shade::Dark]);
        assert_eq!(Shade::NAME, "Shade");
    }

    #[test]
    fn test_member_is_the_values_singleton() {
        let member = Shade::Dark.member();
        let looked_up = Shade::of(&ScalarValue::from("dark")).unwrap();
        assert!(std::ptr::eq(member, looked_up));
    }

    #[test]
    fn test_every_member_looks_up_to_itself() {
        for member in Shade::values() {
            let raw = ScalarValue::from(member.to_string());
            assert!(std::ptr::eq(Shade::of(&raw).unwrap(), member));
        }
        for member in Weight::values() {
            let raw = ScalarValue::Integer(member.to_string().parse().unwrap());
            assert!(std::ptr::eq(Weight::of(&raw).unwrap(), member));
        }
    }

    #[test]
    fn test_int_backed_lookup() {
        assert_eq!(Weight::of(&ScalarValue::Integer(20)), Some(&Weight::Heavy));
        assert_eq!(Weight::of(&ScalarValue::from("1")), Some(&Weight::Light));
        assert!(!Weight::is_valid(&ScalarValue::Integer(2)));
        assert_eq!(Weight::Heavy.to_string(), "20");
    }

    #[test]
    fn test_try_of_lists_expected_values() {
        let err = Weight::try_of(&ScalarValue::Integer(3)).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"The value "3" is not valid for the enum "Weight". Expected one of ["1", "20"]"#
        );
    }

    #[test]
    fn test_instance_downcast() {
        let instance = Shade::Light.instance();
        assert_eq!(instance.downcast::<Shade>(), Some(&Shade::Light));
        assert!(instance.downcast::<Weight>().is_none());
        assert!(instance.is::<Shade>());
    }

    #[test]
    fn test_instance_identity() {
        let a = Shade::Dark.instance();
        let b = EnumInstance::new(Shade::of(&ScalarValue::from("dark")).unwrap());
        assert_eq!(a, b);
        assert!(a.same_member(&b));
        assert!(!a.same_member(&Shade::Light.instance()));
    }

    #[test]
    fn test_same_name_variants_differ_across_enums() {
        assert_ne!(Shade::Light.instance(), Weight::Light.instance());
    }

    #[test]
    fn test_descriptor_capability_check() {
        assert!(TypeDescriptor::of::<Shade>().require_enumerated().is_ok());

        let err = TypeDescriptor::opaque("Plain")
            .require_enumerated()
            .unwrap_err();
        assert_eq!(
            err,
            DbEnumError::InvalidEnumType {
                type_name: "Plain".into(),
                capability: "Enumerated".into(),
            }
        );
    }

    #[test]
    fn test_erased_class_values() {
        let class = TypeDescriptor::of::<Weight>().require_enumerated().unwrap();
        let values: Vec<String> = class.values().iter().map(|v| v.to_string()).collect();
        assert_eq!(values, vec!["1", "20"]);
        assert_eq!(class.name(), "Weight");
        assert!(class.of(&ScalarValue::Real(20.0)).is_some());
    }
}
