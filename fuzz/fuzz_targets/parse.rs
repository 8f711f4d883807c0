#![no_main]

use cppdom::events::EventLog;
use cppdom::{DomBuilder, lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the lexer
        if let Ok(tokens) = lexer::lex(s) {
            // The event log accepts anything the parser emits
            let _ = parser::parse(&tokens, &mut EventLog::new());
            // The builder must reject, never panic on, what the parser emits
            let mut builder = DomBuilder::new(s);
            if parser::parse(&tokens, &mut builder).is_ok() {
                let _ = builder.finish();
            }
        }
    }
});
