use core::cmp::Reverse;
use core::mem;

/// A key that can be decomposed into a big-endian sequence of digits.
///
/// Comparing two keys digit by digit, starting at position 0, must yield the same result as
/// their natural order. Implementations that break this produce unsorted output, but never
/// undefined behavior.
///
/// Digit values must lie in `0..Self::RADIX`. `digit` must be total, for positions past the
/// last digit of a key it returns 0.
pub trait Lexicographic {
    /// Number of distinct digit values.
    const RADIX: usize = 256;

    /// Returns the digit at big-endian `position`, where 0 is the most significant digit.
    fn digit(&self, position: usize) -> usize;

    /// Returns `true` if the digit at `position` is the final digit of `self`.
    ///
    /// Two keys that agree on every digit up to and including `position`, and are both exhausted
    /// at `position`, must be equal.
    fn exhausted(&self, position: usize) -> bool;
}

/// A key with the same number of digits for every value of the type.
pub trait FixedWidth: Lexicographic {
    const DIGITS: usize;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Lexicographic for $t {
            #[inline]
            fn digit(&self, position: usize) -> usize {
                if position < <$t as FixedWidth>::DIGITS {
                    let shift = (<$t as FixedWidth>::DIGITS - 1 - position) * 8;
                    ((*self >> shift) & 0xFF) as usize
                } else {
                    0
                }
            }

            #[inline]
            fn exhausted(&self, position: usize) -> bool {
                position >= <$t as FixedWidth>::DIGITS - 1
            }
        }

        impl FixedWidth for $t {
            const DIGITS: usize = mem::size_of::<$t>();
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);

// Flipping the sign bit maps two's complement order onto unsigned order.
macro_rules! impl_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl Lexicographic for $t {
            #[inline]
            fn digit(&self, position: usize) -> usize {
                ((*self as $u) ^ !(<$u>::MAX >> 1)).digit(position)
            }

            #[inline]
            fn exhausted(&self, position: usize) -> bool {
                position >= <$t as FixedWidth>::DIGITS - 1
            }
        }

        impl FixedWidth for $t {
            const DIGITS: usize = mem::size_of::<$t>();
        }
    )*};
}

impl_signed!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize
);

impl Lexicographic for char {
    #[inline]
    fn digit(&self, position: usize) -> usize {
        (*self as u32).digit(position)
    }

    #[inline]
    fn exhausted(&self, position: usize) -> bool {
        position >= <char as FixedWidth>::DIGITS - 1
    }
}

impl FixedWidth for char {
    const DIGITS: usize = 4;
}

impl Lexicographic for bool {
    const RADIX: usize = 2;

    #[inline]
    fn digit(&self, position: usize) -> usize {
        if position == 0 {
            *self as usize
        } else {
            0
        }
    }

    #[inline]
    fn exhausted(&self, _position: usize) -> bool {
        true
    }
}

impl FixedWidth for bool {
    const DIGITS: usize = 1;
}

// Byte strings have no fixed width. Digit 0 marks the end of the key, so a string sorts before
// every longer string it is a prefix of.
const BYTE_STRING_RADIX: usize = 257;

#[inline]
fn byte_string_digit(bytes: &[u8], position: usize) -> usize {
    match bytes.get(position) {
        Some(&b) => b as usize + 1,
        None => 0,
    }
}

macro_rules! impl_byte_string {
    ($($t:ty),*) => {$(
        impl Lexicographic for $t {
            const RADIX: usize = BYTE_STRING_RADIX;

            #[inline]
            fn digit(&self, position: usize) -> usize {
                byte_string_digit(AsRef::<[u8]>::as_ref(self), position)
            }

            #[inline]
            fn exhausted(&self, position: usize) -> bool {
                position >= AsRef::<[u8]>::as_ref(self).len()
            }
        }
    )*};
}

impl_byte_string!(Vec<u8>, String, &[u8], &str);

/// Digits of `A` followed by the digits of `B`.
impl<A: FixedWidth, B: Lexicographic> Lexicographic for (A, B) {
    const RADIX: usize = if A::RADIX > B::RADIX {
        A::RADIX
    } else {
        B::RADIX
    };

    #[inline]
    fn digit(&self, position: usize) -> usize {
        if position < A::DIGITS {
            self.0.digit(position)
        } else {
            self.1.digit(position - A::DIGITS)
        }
    }

    #[inline]
    fn exhausted(&self, position: usize) -> bool {
        position >= A::DIGITS && self.1.exhausted(position - A::DIGITS)
    }
}

impl<A: FixedWidth, B: FixedWidth> FixedWidth for (A, B) {
    const DIGITS: usize = A::DIGITS + B::DIGITS;
}

impl<K: Lexicographic> Lexicographic for Reverse<K> {
    const RADIX: usize = K::RADIX;

    #[inline]
    fn digit(&self, position: usize) -> usize {
        K::RADIX - 1 - self.0.digit(position)
    }

    #[inline]
    fn exhausted(&self, position: usize) -> bool {
        self.0.exhausted(position)
    }
}

impl<K: FixedWidth> FixedWidth for Reverse<K> {
    const DIGITS: usize = K::DIGITS;
}
