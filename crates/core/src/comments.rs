//! Comment removal over a single string, blind to line boundaries.

/// Drop `//` and `/* … */` comment text from `text`.
///
/// A `//` cuts everything after it. Otherwise each closed `/* … */` span is removed
/// (text on both sides is kept) until none remain, and an unterminated `/*` cuts the
/// rest of the string.
pub fn strip_comments(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        if let Some(i) = out.find("//") {
            out.truncate(i);
            return out;
        }
        let Some(open) = out.find("/*") else {
            return out;
        };
        match out[open + 2..].find("*/") {
            Some(rel) => {
                let close = open + 2 + rel + 2;
                out.replace_range(open..close, "");
            }
            None => {
                out.truncate(open);
                return out;
            }
        }
    }
}
