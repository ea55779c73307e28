use crate::lexer::external::{ExternalScanner, ExternalToken};

const PAREN_NO_SPACE: usize = 0;
const PAREN_SPACE: usize = 1;

/// Pyret tells `f(x)` (application) from `f (x)` (a parenthesized
/// expression) by whether whitespace precedes the paren.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParenScanner;

/// Bytes that can end an expression, so a paren right after them applies it.
fn ends_expression(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'\'' | b'"' | b'`' | b')' | b']' | b'}')
}

impl ExternalScanner for ParenScanner {
    fn scan(&self, text: &[u8], offset: usize, valid: &[bool]) -> Option<ExternalToken> {
        if text.get(offset) != Some(&b'(') {
            return None;
        }
        let previous = offset.checked_sub(1).and_then(|i| text.get(i)).copied();
        let index = match previous {
            Some(byte) if ends_expression(byte) => PAREN_NO_SPACE,
            _ => PAREN_SPACE,
        };
        if valid.get(index).copied().unwrap_or(false) {
            Some(ExternalToken { index, len: 1 })
        } else {
            None
        }
    }
}
