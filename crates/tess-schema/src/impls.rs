//! `Describe` for std, `serde_json`, chrono, uuid, and semver types.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::catalog::Scalar;
use crate::shape::{Describe, TypeRef, TypeShape};

macro_rules! leaf {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeShape {
                    TypeShape::Leaf(Scalar::$scalar)
                }
            }
        )*
    };
}

leaf! {
    bool => Bool,
    char => Char,
    String => String,
    str => String,
    () => Unit,
    serde_json::Value => Any,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    NaiveDate => Date,
    DateTime<Utc> => DateTime,
    NaiveDateTime => LocalDateTime,
    NaiveTime => TimeOfDay,
    uuid::Uuid => Uuid,
    semver::Version => Version,
    [u8] => Binary,
}

// Smart pointers are invisible on the wire.
macro_rules! transparent {
    ($($ptr:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ptr<T> {
                fn type_name() -> Option<Cow<'static, str>> {
                    T::type_name()
                }

                fn describe() -> TypeShape {
                    T::describe()
                }

                fn type_identity() -> TypeId {
                    T::type_identity()
                }

                fn rust_name() -> &'static str {
                    T::rust_name()
                }
            }
        )*
    };
}

transparent!(Box, Rc, Arc);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeShape {
        TypeShape::Nullable(TypeRef::of::<T>())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeShape {
        TypeShape::Array(TypeRef::of::<T>())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeShape {
        TypeShape::Array(TypeRef::of::<T>())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeShape {
        TypeShape::Tuple(vec![TypeRef::of::<T>(); N])
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeShape {
        TypeShape::Set(TypeRef::of::<T>())
    }
}

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe() -> TypeShape {
        TypeShape::Set(TypeRef::of::<T>())
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe() -> TypeShape {
        TypeShape::Map(TypeRef::of::<V>())
    }
}

impl<V: Describe, S: 'static> Describe for HashMap<String, V, S> {
    fn describe() -> TypeShape {
        TypeShape::Map(TypeRef::of::<V>())
    }
}

macro_rules! tuple {
    ($($name:ident),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn describe() -> TypeShape {
                TypeShape::Tuple(vec![$(TypeRef::of::<$name>()),+])
            }
        }
    };
}

tuple!(A, B);
tuple!(A, B, C);
tuple!(A, B, C, D);
tuple!(A, B, C, D, E);
tuple!(A, B, C, D, E, F);
