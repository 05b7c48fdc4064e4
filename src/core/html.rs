// src/core/html.rs
use scraper::{ElementRef, Selector};

/// Text of every element under `scope` matching `sel`, concatenated in
/// document order and trimmed. No match gives an empty string.
pub fn child_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    let mut out = s!();
    for el in scope.select(sel) {
        for t in el.text() {
            out.push_str(t);
        }
    }
    out.trim().to_string()
}
