//! Whitespace normalization for extracted text

/// Collapse every run of three or more `\n` into exactly two.
///
/// Idempotent: the output never contains a run longer than two, so a
/// second pass changes nothing.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }

    out
}

/// Collapse every run of two or more spaces into a single space.
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_space = false;

    for c in text.chars() {
        if c == ' ' {
            if !previous_space {
                out.push(c);
            }
            previous_space = true;
        } else {
            previous_space = false;
            out.push(c);
        }
    }

    out
}
