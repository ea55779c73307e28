/// Token produced by an [`ExternalScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalToken {
    /// Index into the table's external token list.
    pub index: usize,
    /// Length in bytes, at least one.
    pub len: usize,
}

/// Hand-written tokenizer for tokens a DFA cannot express, such as tokens
/// that depend on the bytes before them.
///
/// Scanners are stateless and shared between threads through the language
/// handle.
pub trait ExternalScanner: Send + Sync {
    /// Try to produce a token starting at `offset` (separators already
    /// skipped). `valid[i]` tells whether external token `i` is acceptable in
    /// the current parse state; tokens that are not valid must not be returned.
    fn scan(&self, text: &[u8], offset: usize, valid: &[bool]) -> Option<ExternalToken>;
}
