/// Split a command line into words, honoring single and double quotes
/// and backslash escapes. An unbalanced quote falls back to plain
/// whitespace splitting rather than rejecting the line.
pub fn split_line(line: &str) -> Vec<String> {
    match split_quoted(line) {
        Some(words) => words,
        None => line.split_whitespace().map(str::to_string).collect(),
    }
}

/// Strict splitter; None on an unterminated quote or trailing escape.
fn split_quoted(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                in_word = true;
                let quote = c;
                loop {
                    match chars.next() {
                        Some(q) if q == quote => break,
                        // Backslash only escapes inside double quotes
                        Some('\\') if quote == '"' => current.push(chars.next()?),
                        Some(other) => current.push(other),
                        None => return None,
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next()?);
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}
