//! Accumulation policies for per-bin state
//!
//! A bin state decides how an observation updates it by implementing
//! [`Accumulate`] for the argument shape it accepts. Primitive numbers come
//! with two policies:
//!
//! - `Accumulate<()>` increments by one (plain counting)
//! - `Accumulate<T>` adds a scalar of the same type (weighted sums)
//!
//! Composite states implement `Accumulate<(A, B, ..)>` for the tuple of
//! extra arguments they consume. The binner forwards the tuple unchanged.

/// Update a bin state with one observation's extra arguments
pub trait Accumulate<A> {
    /// Fold `args` into this state
    fn accumulate(&mut self, args: A);
}

/// Combine two independently accumulated states of the same type
pub trait Merge {
    /// Fold `other` into `self`
    fn merge(&mut self, other: &Self);
}

macro_rules! impl_numeric_accumulate {
    ($one:expr => $($t:ty),*) => {
        $(
            impl Accumulate<()> for $t {
                #[inline]
                fn accumulate(&mut self, _args: ()) {
                    *self += $one;
                }
            }

            impl Accumulate<$t> for $t {
                #[inline]
                fn accumulate(&mut self, x: $t) {
                    *self += x;
                }
            }

            impl Merge for $t {
                #[inline]
                fn merge(&mut self, other: &Self) {
                    *self += *other;
                }
            }
        )*
    };
}

impl_numeric_accumulate!(1 => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_numeric_accumulate!(1.0 => f32, f64);
