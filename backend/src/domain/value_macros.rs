//! Helper macros for domain value types.
//!
//! Roles, module identifiers, and the shipment status/type columns are all
//! stored as text and exchanged as `snake_case` strings.
//! [`define_text_enum!`] generates such an enum, its `as_str`/`Display`/
//! `FromStr` implementations, an `ALL` slice, and a `Parse<Name>Error` carrying
//! the rejected input. [`define_uuid_id!`] generates UUID-backed identifiers.

macro_rules! define_text_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident ($label:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        ::paste::paste! {
            $(#[$outer])*
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                ::serde::Serialize,
                ::serde::Deserialize,
            )]
            pub enum $name {
                $(
                    $(#[$variant_meta])*
                    #[serde(rename = $text)]
                    $variant,
                )+
            }

            impl $name {
                /// Every variant in declaration order.
                pub const ALL: &'static [Self] = &[$(Self::$variant),+];

                /// Stable storage and wire representation.
                pub fn as_str(&self) -> &'static str {
                    match self {
                        $(Self::$variant => $text,)+
                    }
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            #[doc = concat!("Parse error for [`", stringify!($name), "`].")]
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct [<Parse $name Error>] {
                /// The rejected input.
                pub input: String,
            }

            impl ::std::fmt::Display for [<Parse $name Error>] {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, concat!("invalid ", $label, ": {}"), self.input)
                }
            }

            impl ::std::error::Error for [<Parse $name Error>] {}

            impl ::std::str::FromStr for $name {
                type Err = [<Parse $name Error>];

                fn from_str(value: &str) -> Result<Self, Self::Err> {
                    match value {
                        $($text => Ok(Self::$variant),)+
                        _ => Err([<Parse $name Error>] {
                            input: value.to_owned(),
                        }),
                    }
                }
            }
        }
    };
}

pub(crate) use define_text_enum;

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

pub(crate) use define_uuid_id;
