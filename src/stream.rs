use crate::compat::Vec;

/// Read-only byte view over a serialized [`ParamList`](crate::ParamList).
///
/// The bytes are captured when the view is created. Mutating the list
/// afterwards does not change what the view yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamView {
    bytes: Vec<u8>,
    pos: usize,
}

impl StreamView {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Total byte length of the snapshot
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Current cursor. May exceed [`size`](Self::size) after a seek past the end.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Read up to `max_bytes` from the cursor, or everything left when `None`.
    ///
    /// Returns `None` once the cursor has reached the end, on every call.
    pub fn read(&mut self, max_bytes: Option<usize>) -> Option<&[u8]> {
        let rest = self.bytes.get(self.pos..).filter(|rest| !rest.is_empty())?;
        let len = max_bytes.map_or(rest.len(), |max| max.min(rest.len()));
        self.pos += len;
        Some(&rest[..len])
    }

    /// Like [`read`](Self::read), but replaces the contents of `out` with the
    /// bytes read and returns how many there were. `out` is left empty at end
    /// of data.
    pub fn read_into(&mut self, max_bytes: Option<usize>, out: &mut Vec<u8>) -> Option<usize> {
        out.clear();
        let chunk = self.read(max_bytes)?;
        out.extend_from_slice(chunk);
        Some(chunk.len())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(feature = "std")]
impl std::io::Read for StreamView {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = StreamView::read(self, Some(buf.len())).map_or(0, |chunk| {
            buf[..chunk.len()].copy_from_slice(chunk);
            chunk.len()
        });
        Ok(len)
    }
}

#[cfg(feature = "std")]
impl std::io::BufRead for StreamView {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Ok(self.bytes.get(self.pos..).unwrap_or_default())
    }

    fn consume(&mut self, amt: usize) {
        self.pos = self.pos.saturating_add(amt);
    }
}

#[cfg(feature = "std")]
impl std::io::Seek for StreamView {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::{Error, ErrorKind, SeekFrom};

        let target = match pos {
            SeekFrom::Start(offset) => usize::try_from(offset).ok(),
            SeekFrom::End(offset) => isize::try_from(offset)
                .ok()
                .and_then(|offset| self.bytes.len().checked_add_signed(offset)),
            SeekFrom::Current(offset) => isize::try_from(offset)
                .ok()
                .and_then(|offset| self.pos.checked_add_signed(offset)),
        };

        let target = target.ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.pos = target;
        Ok(target as u64)
    }

    fn stream_position(&mut self) -> std::io::Result<u64> {
        Ok(self.pos as u64)
    }
}
