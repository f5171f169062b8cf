//! Self-delimiting label frames.
//!
//! A label is a short UTF-8 string (host, session or command name) sent as its
//! own frame, terminated by a single `0x00` byte. The terminator lets a
//! subscriber register the encoded host as a byte prefix without also matching
//! longer host names that share the same leading characters.
//!
//! Labels must not contain the terminator themselves. This is not enforced on
//! encode; a label with an embedded `0x00` is indistinguishable on the bus from
//! the shorter label before it.

/// Byte appended to every encoded label.
pub const TERMINATOR: u8 = 0;

/// Encodes `label` as its UTF-8 bytes followed by [`TERMINATOR`].
pub fn encode(label: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(label.len() + 1);
    frame.extend_from_slice(label.as_bytes());
    frame.push(TERMINATOR);
    frame
}

/// Decodes a label frame.
///
/// Returns `None` when the frame is empty, does not end with [`TERMINATOR`],
/// or the bytes before the terminator are not valid UTF-8.
pub fn decode(frame: &[u8]) -> Option<String> {
    let (&last, body) = frame.split_last()?;
    if last != TERMINATOR {
        return None;
    }
    std::str::from_utf8(body).ok().map(str::to_owned)
}
