//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`] from its fields.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LookupPortError {
            Unreachable => "store unreachable",
            Connection { message: String } => "connection failed: {message}",
            Duplicate { key: String, attempts: u32 } => "duplicate {key} after {attempts} attempts",
        }
    }

    #[rstest]
    fn unit_variant_constructor_has_no_arguments() {
        assert_eq!(LookupPortError::unreachable(), LookupPortError::Unreachable);
        assert_eq!(LookupPortError::unreachable().to_string(), "store unreachable");
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let err = LookupPortError::connection("refused");
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = LookupPortError::duplicate("abc", 3_u32);
        assert_eq!(
            err,
            LookupPortError::Duplicate {
                key: "abc".to_owned(),
                attempts: 3,
            }
        );
        assert_eq!(err.to_string(), "duplicate abc after 3 attempts");
    }
}
