//! Lexical normalization shared by the assembler and the VM translator.

/// Strips a trailing `//` comment and surrounding spaces, tabs and carriage returns.
/// An empty result means the line carries no code.
pub fn normalize(raw: &str) -> &str {
    let code = match raw.find("//") {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    code.trim_matches(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Yields `(line_no, raw, code)` for every line with code. `line_no` is 1-based.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, &str, &str)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let code = normalize(raw);
        (!code.is_empty()).then_some((idx + 1, raw, code))
    })
}
