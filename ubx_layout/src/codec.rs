//! Traits tying an owned layout type to its borrowed view

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::error::LayoutError;

pub(crate) mod private {
    /// Only this crate can make one, and only after a length check.
    #[derive(Debug, Clone, Copy)]
    pub struct LenChecked(pub(crate) ());
}

pub(crate) use private::LenChecked;

/// Anything that can be laid over a byte slice without copying.
///
/// Views produced by the layout macros index into the slice, so they are
/// only built after the slice was checked against `LEN`. Outside this
/// crate go through [`decode_fixed_body`], `Xxx::decode` or
/// [`RepeatedIter`](crate::RepeatedIter).
pub trait ByteView<'a>: Sized {
    /// Fewest bytes the view reads from
    const MIN_LEN: usize;

    fn from_bytes(bytes: &'a [u8], checked: private::LenChecked) -> Self;
}

impl<'a> ByteView<'a> for &'a [u8] {
    const MIN_LEN: usize = 0;

    #[inline]
    fn from_bytes(bytes: &'a [u8], _: private::LenChecked) -> Self {
        bytes
    }
}

/// Borrowed view over a fixed body
pub trait FixedView<'a>: ByteView<'a> + Copy {
    type Owned: FixedLayout;

    /// Whole slice the view was built from, repeated part included
    fn payload(&self) -> &'a [u8];

    /// Only the bytes covered by the fixed body
    #[inline]
    fn fixed_bytes(&self) -> &'a [u8] {
        &self.payload()[..<Self::Owned as FixedLayout>::LEN]
    }

    /// Copy every field out into the owned value
    fn into_owned(self) -> Self::Owned;
}

/// A fixed-size little-endian structure: a message's fixed body or one
/// of its repeated records.
pub trait FixedLayout: Sized {
    const NAME: &'static str;
    /// Sum of the field widths, no padding
    const LEN: usize;
    type Ref<'a>: FixedView<'a, Owned = Self>;

    /// Write the fields into `out[..Self::LEN]`. Panics if `out` is shorter.
    fn write_fields(&self, out: &mut [u8]);

    /// Append the encoded body, returns the number of bytes written
    fn extend_to<E: Extend<u8>>(&self, buf: &mut E) -> usize;

    fn encode_into(&self, out: &mut [u8]) -> Result<usize, LayoutError> {
        let got = out.len();
        match out.get_mut(..Self::LEN) {
            Some(out) => {
                self.write_fields(out);
                Ok(Self::LEN)
            }
            None => Err(LayoutError::LengthMismatch {
                message: Self::NAME,
                expect: Self::LEN,
                got,
            }),
        }
    }

    #[cfg(feature = "alloc")]
    fn encode(&self) -> Vec<u8> {
        let mut ret = alloc::vec![0; Self::LEN];
        self.write_fields(&mut ret);
        ret
    }
}

/// Overlay the view of `L` on the start of `payload`. Anything after the
/// fixed body is left for the repeated iterator.
pub fn decode_fixed_body<L: FixedLayout>(payload: &[u8]) -> Result<L::Ref<'_>, LayoutError> {
    if payload.len() < L::LEN {
        log::debug!(
            "{}: payload of {} bytes is shorter than the {}-byte fixed body",
            L::NAME,
            payload.len(),
            L::LEN
        );
        return Err(LayoutError::LengthMismatch {
            message: L::NAME,
            expect: L::LEN,
            got: payload.len(),
        });
    }
    Ok(<L::Ref<'_> as ByteView<'_>>::from_bytes(payload, LenChecked(())))
}
