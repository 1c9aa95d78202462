/// Forward-only character cursor over a markup string.
///
/// `peek(1)` is the current character, `peek(2)` the one after it, and so on.
/// Reading past the end yields `None` for as long as the caller keeps asking.
/// A single mark records where a lexeme starts; [`extract`](Self::extract)
/// returns the text between the mark and the cursor.
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    src: &'s str,
    /// Byte offset of the current character.
    pos: usize,
    mark: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, mark: 0 }
    }

    /// The character `offset - 1` places past the cursor; `None` past the end
    /// or for `offset == 0`.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.remaining().chars().nth(offset.checked_sub(1)?)
    }

    /// Moves past the current character. A no-op at end of input.
    pub fn advance(&mut self) {
        if let Some(ch) = self.peek(1) {
            self.pos += ch.len_utf8();
        }
    }

    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Text from the mark to the cursor; empty when the mark is not behind it.
    pub fn extract(&self) -> &'s str {
        if self.mark < self.pos { &self.src[self.mark..self.pos] } else { "" }
    }

    /// Input from the cursor on.
    pub fn remaining(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_is_one_based() {
        let s = Scanner::new("ab");
        assert_eq!(s.peek(1), Some('a'));
        assert_eq!(s.peek(2), Some('b'));
        assert_eq!(s.peek(3), None);
        assert_eq!(s.peek(0), None);
    }

    #[test]
    fn advancing_past_end_is_harmless() {
        let mut s = Scanner::new("a");
        s.advance();
        s.advance();
        s.advance();
        assert!(s.is_at_end());
        assert_eq!(s.peek(1), None);
        assert_eq!(s.peek(1), None);
    }

    #[test]
    fn mark_and_extract() {
        let mut s = Scanner::new("[bold]text");
        s.advance();
        s.mark();
        for _ in 0..4 {
            s.advance();
        }
        assert_eq!(s.extract(), "bold");
    }

    #[test]
    fn extract_without_progress_is_empty() {
        let mut s = Scanner::new("abc");
        s.advance();
        s.mark();
        assert_eq!(s.extract(), "");
    }

    #[test]
    fn multibyte_characters() {
        let mut s = Scanner::new("héllo");
        s.mark();
        s.advance();
        s.advance();
        assert_eq!(s.peek(1), Some('l'));
        assert_eq!(s.extract(), "hé");
        assert_eq!(s.position(), 3);
    }
}
