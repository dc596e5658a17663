//! Macros for declaring state enums.

/// Declare a fieldless state enum and implement [`State`](crate::core::State) for it.
///
/// Besides the trait impl, the macro generates an `ALL` constant listing every
/// variant in declaration order and a `Display` impl that prints the variant name.
///
/// # Example
///
/// ```
/// use pattern_recall::state_enum;
/// use pattern_recall::core::State;
///
/// state_enum! {
///     pub enum Light {
///         Off,
///         On,
///         Broken,
///     }
///     final: [Broken]
///     error: [Broken]
/// }
///
/// assert_eq!(Light::ALL.len(), 3);
/// assert!(Light::Broken.is_final());
/// assert_eq!(Light::On.to_string(), "On");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum Door {
            Open,
            Closed,
            Jammed,
        }
        final: [Jammed]
        error: [Jammed]
    }

    #[test]
    fn macro_generates_trait_impl() {
        assert_eq!(Door::Open.name(), "Open");
        assert!(!Door::Closed.is_final());
        assert!(Door::Jammed.is_final());
        assert!(Door::Jammed.is_error());
        assert!(!Door::Open.is_error());
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(Door::ALL, &[Door::Open, Door::Closed, Door::Jammed]);
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Door::Closed.to_string(), "Closed");
    }

    #[test]
    fn works_without_final_or_error_lists() {
        state_enum! {
            enum Toggle {
                A,
                B,
            }
        }

        assert!(!Toggle::A.is_final());
        assert!(!Toggle::B.is_error());
    }
}
