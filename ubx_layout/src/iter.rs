use core::{fmt, iter::FusedIterator, marker::PhantomData, slice::ChunksExact};

use crate::{
    codec::{ByteView, FixedView, LenChecked},
    descriptor::MessageDescriptor,
    error::LayoutError,
};

/// Iterator over the records following a message's fixed body.
///
/// The payload is validated when the iterator is built, so every record it
/// yields is complete. Records come out in payload order.
pub struct RepeatedIter<'a, R> {
    records: ChunksExact<'a, u8>,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: ByteView<'a>> RepeatedIter<'a, R> {
    /// Iterate the records of a complete message payload
    pub fn new(payload: &'a [u8], descriptor: &MessageDescriptor) -> Result<Self, LayoutError> {
        if descriptor.has_records() && descriptor.record_len < R::MIN_LEN {
            log::debug!(
                "{}: {}-byte records are too short for views reading {} bytes",
                descriptor.name,
                descriptor.record_len,
                R::MIN_LEN
            );
            return Err(LayoutError::LengthMismatch {
                message: descriptor.name,
                expect: R::MIN_LEN,
                got: descriptor.record_len,
            });
        }
        let count = descriptor.repeat_count(payload.len())?;
        let records = &payload[descriptor.fixed_len..descriptor.size(count)];
        Ok(Self::over(records, descriptor.record_len))
    }

    /// Iterate the records of a message whose fixed body was already
    /// decoded. `total_len` is the payload length of the message, which
    /// may be shorter than the buffer the view was taken from.
    pub fn from_body<V: FixedView<'a>>(
        body: V,
        total_len: usize,
        descriptor: &MessageDescriptor,
    ) -> Result<Self, LayoutError> {
        let buf = body.payload();
        let payload = buf.get(..total_len).ok_or(LayoutError::LengthMismatch {
            message: descriptor.name,
            expect: total_len,
            got: buf.len(),
        })?;
        Self::new(payload, descriptor)
    }

    fn over(records: &'a [u8], record_len: usize) -> Self {
        // chunks_exact(0) panics
        let records = if record_len == 0 {
            records[..0].chunks_exact(1)
        } else {
            records.chunks_exact(record_len)
        };
        Self {
            records,
            _record: PhantomData,
        }
    }
}

impl<'a, R: ByteView<'a>> Iterator for RepeatedIter<'a, R> {
    type Item = R;

    #[inline]
    fn next(&mut self) -> Option<R> {
        self.records.next().map(|record| R::from_bytes(record, LenChecked(())))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<R> {
        self.records.nth(n).map(|record| R::from_bytes(record, LenChecked(())))
    }
}

impl<'a, R: ByteView<'a>> DoubleEndedIterator for RepeatedIter<'a, R> {
    #[inline]
    fn next_back(&mut self) -> Option<R> {
        self.records.next_back().map(|record| R::from_bytes(record, LenChecked(())))
    }
}

impl<'a, R: ByteView<'a>> ExactSizeIterator for RepeatedIter<'a, R> {}

impl<'a, R: ByteView<'a>> FusedIterator for RepeatedIter<'a, R> {}

impl<R> Clone for RepeatedIter<'_, R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            _record: PhantomData,
        }
    }
}

impl<'a, R: ByteView<'a> + fmt::Debug> fmt::Debug for RepeatedIter<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for record in self.clone() {
            list.entry(&record);
        }
        list.finish()
    }
}
