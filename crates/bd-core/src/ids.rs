//! Dense registry indices.
//!
//! Plants, farms and zones are numbered in registry order as they are
//! loaded.  The external string ids (`STP_03`, `F_1042`, …) stay in the
//! registries; everything downstream of loading works on these indices so
//! ledgers and distance rows are plain `Vec`s.
//!
//! The all-ones value of each inner type is reserved as `INVALID` and is
//! never handed out by [`from_index`][PlantId::from_index].

use std::fmt;

use crate::{CoreError, CoreResult};

macro_rules! dense_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $prefix:literal, $plural:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The id for registry position `n`.
            ///
            /// # Errors
            /// [`CoreError::Capacity`] if `n` does not fit below the
            /// `INVALID` sentinel.
            pub fn from_index(n: usize) -> CoreResult<Self> {
                match <$inner>::try_from(n) {
                    Ok(v) if v != <$inner>::MAX => Ok($name(v)),
                    _ => Err(CoreError::Capacity($plural)),
                }
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        /// `P3`, `F1042`, `Z0`; `P?` for the sentinel.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "{}"), self.0)
                } else {
                    f.write_str(concat!($prefix, "?"))
                }
            }
        }
    };
}

dense_id! {
    /// Position of a treatment plant in the plant registry.
    PlantId(u32), "P", "plants"
}

dense_id! {
    /// Position of a farm in the farm registry.
    FarmId(u32), "F", "farms"
}

dense_id! {
    /// A rainfall zone, interned in first-seen order while the farm registry
    /// is built.
    ZoneId(u16), "Z", "zones"
}
