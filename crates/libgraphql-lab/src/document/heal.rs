/// Stand-in selection for an empty top-level block while text goes through
/// the parser, which does not accept `{}`. Names starting with `__` are
/// reserved for introspection, so user documents never select it.
pub(crate) const EMPTY_BODY_PLACEHOLDER: &str = "__graphqlLabEmptyBody";

/// Removes empty blocks (`{}`, or braces holding only whitespace/commas)
/// from operation text so that it can be handed to the parser.
///
/// An empty block nested inside a selection set is vestigial and is dropped.
/// An empty block at the top level is the body of an emptied operation
/// (`query Name {}`); it is kept as a placeholder selection that
/// [`QueryDocument::parse`](crate::QueryDocument::parse) strips again after
/// parsing. Braces inside argument or variable-definition parentheses are
/// object literals and are never touched, nor is anything inside strings or
/// comments.
pub fn heal(text: &str) -> String {
    let mut healed = String::with_capacity(text.len());
    let mut brace_depth: usize = 0;
    let mut paren_depth: usize = 0;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '"' => {
                let len = string_literal_len(rest);
                healed.push_str(&rest[..len]);
                rest = &rest[len..];
                continue;
            },

            '#' => {
                let len = rest.find('\n').unwrap_or(rest.len());
                healed.push_str(&rest[..len]);
                rest = &rest[len..];
                continue;
            },

            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),

            '{' if paren_depth == 0 => {
                if let Some(len) = empty_block_len(rest) {
                    if brace_depth == 0 {
                        healed.push_str("{ ");
                        healed.push_str(EMPTY_BODY_PLACEHOLDER);
                        healed.push_str(" }");
                    }
                    rest = &rest[len..];
                    continue;
                }
                brace_depth += 1;
            },

            '}' if paren_depth == 0 => brace_depth = brace_depth.saturating_sub(1),

            _ => (),
        }

        healed.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    healed
}

/// `rest` starts with `{`. Returns the byte length of the block if nothing
/// but insignificant characters separate it from its closing `}`.
fn empty_block_len(rest: &str) -> Option<usize> {
    let inner = rest[1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    if inner.starts_with('}') {
        Some(rest.len() - inner.len() + 1)
    } else {
        None
    }
}

/// `rest` starts with `"`. Returns the byte length of the string literal
/// (block or regular). Unterminated literals run to the end of the line (or
/// text) and are left for the parser to report.
fn string_literal_len(rest: &str) -> usize {
    if let Some(body) = rest.strip_prefix("\"\"\"") {
        let mut offset = 0;
        while offset < body.len() {
            let tail = &body[offset..];
            if tail.starts_with("\\\"\"\"") {
                offset += 4;
            } else if tail.starts_with("\"\"\"") {
                return 3 + offset + 3;
            } else {
                offset += tail.chars().next().map_or(1, char::len_utf8);
            }
        }
        return rest.len();
    }

    let mut escaped = false;
    for (idx, ch) in rest.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return idx + 1,
            '\n' => return idx,
            _ => (),
        }
    }
    rest.len()
}
