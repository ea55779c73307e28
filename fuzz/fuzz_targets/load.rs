#![no_main]
use libfuzzer_sys::fuzz_target;
use pyret_sitter::{GrammarTable, Language, Parser};

fuzz_target!(|data: &[u8]| {
    // Decoding and validating arbitrary artifacts must fail cleanly, and
    // anything that validates must be safe to parse with.
    let Ok(table) = GrammarTable::from_bytes(data) else {
        return;
    };
    if let Ok(language) = Language::load(table) {
        let _ = Parser::new(&language).parse(b"x = 1 ( ) @");
    }
});
