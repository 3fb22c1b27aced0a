//! Selector-tagged request buffer.

/// Contiguous request buffer: the selector byte followed by the payload.
///
/// Allocated once with its final size and owned by a single call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestBuffer {
    buf: Vec<u8>,
}

impl RequestBuffer {
    /// Tags `payload` with `selector`.
    pub fn new(selector: u8, payload: &[u8]) -> Self {
        Self::from_parts(selector, &[payload])
    }

    /// Tags the concatenation of `parts` with `selector`.
    pub fn from_parts(selector: u8, parts: &[&[u8]]) -> Self {
        let len = 1 + parts.iter().map(|part| part.len()).sum::<usize>();
        let mut buf = Vec::with_capacity(len);
        buf.push(selector);
        for part in parts {
            buf.extend_from_slice(part);
        }
        debug_assert_eq!(buf.len(), len);
        Self { buf }
    }

    /// Selector byte.
    #[inline]
    pub fn selector(&self) -> u8 {
        self.buf[0]
    }

    /// Everything after the selector.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.buf[1..]
    }

    /// Whole tagged buffer, as handed to the backend.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Length including the selector byte.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always `false`: a request carries at least its selector.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the request and returns the raw buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl AsRef<[u8]> for RequestBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_precedes_payload() {
        let request = RequestBuffer::new(0x03, b"abc");
        assert_eq!(request.as_slice(), b"\x03abc");
        assert_eq!(request.selector(), 0x03);
        assert_eq!(request.payload(), b"abc");
        assert_eq!(request.len(), 4);
        assert!(!request.is_empty());
    }

    #[test]
    fn empty_payload_keeps_selector() {
        let request = RequestBuffer::new(0x00, &[]);
        assert_eq!(request.as_slice(), [0x00]);
        assert!(request.payload().is_empty());
    }

    #[test]
    fn parts_are_concatenated_in_order() {
        let request = RequestBuffer::from_parts(0x10, &[b"cfg", b"", b"msg"]);
        assert_eq!(request.into_vec(), b"\x10cfgmsg");
    }
}
