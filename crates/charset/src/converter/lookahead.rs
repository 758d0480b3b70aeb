/// Supplies raw bytes past the end of the current chunk.
///
/// After a chunk is decoded the converter hands the last decoded character to
/// [`more_bytes`](Lookahead::more_bytes). Returning bytes pulls them into the
/// same conversion pass, which lets a caller settle boundary-dependent
/// decisions such as whether a trailing `\r` is followed by `\n`. Returning
/// `None` or an empty buffer ends the lookahead.
pub trait Lookahead {
    /// Returns additional source bytes, given the last decoded character.
    fn more_bytes(&mut self, last: char) -> Option<Vec<u8>>;
}

impl<F> Lookahead for F
where
    F: FnMut(char) -> Option<Vec<u8>>,
{
    fn more_bytes(&mut self, last: char) -> Option<Vec<u8>> {
        self(last)
    }
}
