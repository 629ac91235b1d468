use serde::Serialize;
use sheaf_common::warning::warn_once;

/// One `name: value` pair read from a declaration block, before lexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDeclaration {
    /// Property name, lowercased unless it is a custom property.
    pub name: String,
    /// Value text with the priority suffix removed.
    pub value: String,
    /// Whether the declaration ended in `!important`.
    pub important: bool,
    /// Whether the value carried a browser-hack marker (`!ie` or `\9`).
    pub priority_compat: bool,
}

/// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
///
/// Split the contents of a declaration block (or a `style` attribute) into
/// raw declarations. Semicolons inside strings, functions and comments do
/// not end a declaration. A piece without a colon is dropped with a warning.
#[must_use]
pub fn parse_declaration_list(text: &str) -> Vec<RawDeclaration> {
    split_top_level(text)
        .into_iter()
        .filter_map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                return None;
            }
            let Some((name, value)) = piece.split_once(':') else {
                let _ = warn_once("parser", &format!("declaration without ':' ignored: {piece}"));
                return None;
            };
            let name = name.trim();
            let name = if name.starts_with("--") {
                name.to_string()
            } else {
                name.to_ascii_lowercase()
            };
            let (value, important, priority_compat) = split_priority(value);
            Some(RawDeclaration {
                name,
                value: value.to_string(),
                important,
                priority_compat,
            })
        })
        .collect()
}

/// Split a value into `(value, important, priority_compat)`.
///
/// Recognizes `!important` (any case, optional space after `!`), the
/// `!ie` hack and a trailing `\9`. A `\9` value keeps its marker in the
/// returned text because it is stored verbatim as a compat value.
#[must_use]
pub fn split_priority(value: &str) -> (&str, bool, bool) {
    let value = value.trim();
    if let Some(bang) = value.rfind('!') {
        let flag = value[bang + 1..].trim();
        let head = value[..bang].trim_end();
        if flag.eq_ignore_ascii_case("important") {
            return (head, true, false);
        }
        if flag.eq_ignore_ascii_case("ie") {
            return (head, false, true);
        }
    }
    if value.ends_with("\\9") {
        return (value, false, true);
    }
    (value, false, false)
}

/// Split on `;` outside strings, parentheses and comments.
fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '/' if chars.peek() == Some(&'*') => {
                let _ = chars.next();
                let mut previous = '\0';
                for inner in chars.by_ref() {
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
                current.push(' ');
            }
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ';' if depth == 0 => pieces.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    pieces.push(current);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_priority() {
        assert_eq!(split_priority("1px !important"), ("1px", true, false));
        assert_eq!(split_priority("1px ! IMPORTANT"), ("1px", true, false));
        assert_eq!(split_priority("1px!ie"), ("1px", false, true));
        assert_eq!(split_priority("1px\\9"), ("1px\\9", false, true));
        assert_eq!(split_priority("1px"), ("1px", false, false));
    }

    #[test]
    fn test_semicolon_inside_string_and_function() {
        let declarations =
            parse_declaration_list("content: 'a;b'; background: url(x;y.png) /* ; */; Color: red");
        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0].value, "'a;b'");
        assert_eq!(declarations[1].name, "background");
        assert_eq!(declarations[2].name, "color");
    }
}
