/// Characters the Solr standard query parser gives a meaning to.
const SPECIAL_CHARACTERS: &[char] = &[
    '\\', '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':',
];

/// Escapes user input so that Solr reads it as literal text.
///
/// Every special character gets a backslash in front of it. This is not
/// idempotent: escaping an already escaped string escapes the backslashes
/// again, so each value must go through here exactly once.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
