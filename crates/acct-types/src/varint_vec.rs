//! Codecable vec with varint length tag.
//!
//! The varints are optimized to short lengths, since most payloads will be
//! small.  Below are the permitted layouts, always encoded big-endian.
//!
//! ```
//! 0bbbbbbb
//! 10bbbbbb_bbbbbbbb
//! 11bbbbbb_bbbbbbbb_bbbbbbbb_bbbbbbbb
//! ```

use strata_codec::{Codec, CodecError, Decoder, Encoder};

/// The max value one of these varints can have, which is about 1 billion.
pub const VARINT_MAX: u32 = 0x3fffffff;

type VarintInner = u32;

/// Internal varint type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct Varint(VarintInner);

impl Varint {
    fn new_unchecked(v: VarintInner) -> Self {
        Self(v)
    }

    fn new(v: VarintInner) -> Option<Self> {
        if v > VARINT_MAX {
            return None;
        }

        Some(Self(v as VarintInner))
    }

    fn new_usize(v: usize) -> Option<Self> {
        if v > VARINT_MAX as usize {
            return None;
        }

        Some(Self(v as VarintInner))
    }

    fn inner(self) -> VarintInner {
        self.0
    }

    fn width(&self) -> VarintWidth {
        if self.0 < 128 {
            VarintWidth::U8
        } else if self.0 < 16384 {
            VarintWidth::U16
        } else {
            VarintWidth::U32
        }
    }

    /// # Panics
    ///
    /// If out of bounds.
    fn sanity_check(&self) {
        assert!(self.0 <= VARINT_MAX, "varint_vec: varint out of bounds");
    }
}

impl Codec for Varint {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let first_byte = u8::decode(dec)?;

        let value = match first_byte >> 6 {
            // 0b00xxxxxx or 0b01xxxxxx: single byte encoding
            0 | 1 => first_byte as u32,

            // 0b10xxxxxx: two-byte encoding
            2 => {
                let second_byte = u8::decode(dec)?;
                let bytes = [first_byte & 0x3f, second_byte];
                u16::from_be_bytes(bytes) as u32
            }

            // 0b11xxxxxx: four-byte encoding
            3 => {
                let mut bytes = [first_byte & 0x3f, 0, 0, 0];
                dec.read_buf(&mut bytes[1..4])?;
                u32::from_be_bytes(bytes)
            }

            _ => unreachable!(),
        };

        let vi = Varint::new_unchecked(value);

        #[cfg(test)]
        vi.sanity_check();

        Ok(vi)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        #[cfg(test)]
        self.sanity_check();

        match self.width() {
            VarintWidth::U8 => (self.0 as u8).encode(enc),
            VarintWidth::U16 => {
                let val = (self.0 as u16) | 0x8000;
                let bytes = val.to_be_bytes();
                enc.write_buf(&bytes)
            }
            VarintWidth::U32 => {
                let val = self.0 | 0xc0000000;
                let bytes = val.to_be_bytes();
                enc.write_buf(&bytes)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum VarintWidth {
    U8,
    U16,
    U32,
}

/// Vec that ensures capacity stays within bounds of a simple varint.  In
/// practice, this means it has a max capacity of 0x3fffffff, or about 1
/// billion.  It will never reach this size for our purposes.  This
/// exposes most of the same functions as `Vec` does, but with the bounds
/// checking needed to ensure we stay under this size limit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VarVec<T> {
    inner: Vec<T>,
}

impl<T> VarVec<T> {
    /// Convenience function to construct a new instance without doing the
    /// bounds checking.
    fn new_unchecked(inner: Vec<T>) -> Self {
        Self { inner }
    }

    /// Constructs a new empty varvec.
    pub fn new() -> Self {
        Self::new_unchecked(Vec::new())
    }

    /// Constructs a new empty varvec with enough preallocated space to store
    /// the provided number of entries, if it's in bounds.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        if capacity > VARINT_MAX as usize {
            return None;
        }

        Some(Self::new_unchecked(Vec::with_capacity(capacity)))
    }

    /// Constructs a new empty varvec by wrapping another vec, but only if it's
    /// in bounds.
    pub fn from_vec(inner: Vec<T>) -> Option<Self> {
        if inner.len() > VARINT_MAX as usize {
            return None;
        }

        Some(Self::new_unchecked(inner))
    }

    pub fn inner(&self) -> &[T] {
        &self.inner
    }

    pub fn into_inner(self) -> Vec<T> {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    fn len_varint(&self) -> Varint {
        Varint::new_usize(self.inner().len()).expect("varint_vec: internal vec oversized")
    }

    pub fn is_empty(&self) -> bool {
        self.inner().is_empty()
    }

    /// Pushes a new element, if there's space for it.
    pub fn push(&mut self, v: T) -> bool {
        if self.inner.len() + 1 > VARINT_MAX as usize {
            return false;
        }

        self.inner.push(v);
        true
    }

    /// Pushes a new element by calling a constructor fn, if there's space for
    /// it.
    pub fn push_with(&mut self, f: impl Fn() -> T) -> bool {
        if self.inner.len() + 1 > VARINT_MAX as usize {
            return false;
        }

        self.inner.push(f());
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn reserve(&mut self, additional: usize) -> bool {
        if self.inner.len() + additional > VARINT_MAX as usize {
            return false;
        }

        self.inner.reserve(additional);
        true
    }

    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    pub fn resize(&mut self, new_len: usize, value: T) -> bool
    where
        T: Clone,
    {
        if new_len > VARINT_MAX as usize {
            return false;
        }

        self.inner.resize(new_len, value);
        true
    }

    pub fn resize_with<F>(&mut self, new_len: usize, f: F) -> bool
    where
        F: FnMut() -> T,
    {
        if new_len > VARINT_MAX as usize {
            return false;
        }

        self.inner.resize_with(new_len, f);
        true
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.inner.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.inner.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.inner.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.inner
    }
}

impl<T> Default for VarVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Deref for VarVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> std::ops::DerefMut for VarVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T> AsRef<[T]> for VarVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.inner
    }
}

impl<T> AsMut<[T]> for VarVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.inner
    }
}

impl<T: Codec> Codec for VarVec<T> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let len = Varint::decode(dec)?;
        let len_usize = len.inner() as usize;

        let mut vec = Vec::with_capacity(len_usize);
        for _ in 0..len_usize {
            vec.push(T::decode(dec)?);
        }

        Ok(Self { inner: vec })
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        self.len_varint().encode(enc)?;

        for item in &self.inner {
            item.encode(enc)?;
        }

        Ok(())
    }
}
