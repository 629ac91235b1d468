use thiserror::Error;

use super::unit::LexicalUnit;

/// Failure to lex a property value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quoted string ran to the end of the input.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    /// A function had no closing parenthesis.
    #[error("missing ')' for function '{0}'")]
    UnclosedFunction(String),
    /// A `[` line-name group had no closing bracket.
    #[error("missing ']' in line-name list")]
    UnclosedLineNames,
    /// A line-name group contained something other than identifiers.
    #[error("line-name list may only contain identifiers")]
    InvalidLineName,
    /// A character that cannot start any value unit.
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Its offset, in characters.
        offset: usize,
    },
}

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Lexer for a single declaration value. It follows the consume-a-token
/// steps of CSS Syntax Level 3 but folds tokens straight into
/// [`LexicalUnit`]s: functions carry their arguments, whitespace is dropped
/// and `[...]` groups become line-name lists.
pub struct ValueLexer {
    /// The input string being lexed
    input: Vec<char>,
    /// Current position in the input
    position: usize,
}

/// Lex a complete property value.
///
/// # Errors
///
/// Returns a [`LexError`] for unterminated strings, unbalanced
/// parentheses or brackets, and characters that cannot start a unit.
pub fn lex_value(text: &str) -> Result<Vec<LexicalUnit>, LexError> {
    ValueLexer::new(text).run()
}

impl ValueLexer {
    /// Create a new lexer over `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
        }
    }

    /// Consume the whole input.
    ///
    /// # Errors
    ///
    /// See [`lex_value`].
    pub fn run(mut self) -> Result<Vec<LexicalUnit>, LexError> {
        let mut units = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.peek().is_none() {
                return Ok(units);
            }
            if let Some(unit) = self.consume_unit(false)? {
                units.push(unit);
            }
        }
    }

    /// Consume one unit. `in_function` allows a bare `-` operator.
    fn consume_unit(&mut self, in_function: bool) -> Result<Option<LexicalUnit>, LexError> {
        let offset = self.position;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        match c {
            '"' | '\'' => {
                self.position += 1;
                self.consume_string(c, offset).map(|s| Some(LexicalUnit::String(s)))
            }
            '#' => {
                self.position += 1;
                if self.peek().is_some_and(is_name_code_point) {
                    Ok(Some(LexicalUnit::Hash(self.consume_name())))
                } else {
                    Err(LexError::UnexpectedCharacter {
                        character: '#',
                        offset,
                    })
                }
            }
            ',' => {
                self.position += 1;
                Ok(Some(LexicalUnit::Comma))
            }
            '/' => {
                self.position += 1;
                Ok(Some(LexicalUnit::Slash))
            }
            '[' => {
                self.position += 1;
                self.consume_line_names().map(Some)
            }
            '+' | '-' | '.' if self.would_start_number() => Ok(Some(self.consume_numeric())),
            '-' if self.would_start_ident() => Ok(Some(self.consume_ident_like()?)),
            '+' | '*' => {
                self.position += 1;
                Ok(Some(LexicalUnit::Operator(c)))
            }
            '-' if in_function => {
                self.position += 1;
                Ok(Some(LexicalUnit::Operator('-')))
            }
            c if c.is_ascii_digit() => Ok(Some(self.consume_numeric())),
            _ if self.would_start_ident() => Ok(Some(self.consume_ident_like()?)),
            _ => Err(LexError::UnexpectedCharacter {
                character: c,
                offset,
            }),
        }
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string(&mut self, ending: char, start: usize) -> Result<String, LexError> {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == ending => return Ok(value),
                // "newline: This is a parse error. Reconsume the current input
                // code point, create a <bad-string-token>, and return it."
                None | Some('\n') => return Err(LexError::UnterminatedString(start)),
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => self.position += 1,
                    Some(_) => value.push(self.consume_escape()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called after the backslash has been consumed.
    fn consume_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            if let Some(c) = self.consume() {
                hex.push(c);
            }
        }
        if hex.is_empty() {
            return self.consume().unwrap_or('\u{FFFD}');
        }
        // "If the next input code point is whitespace, consume it as well."
        if self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    #[allow(clippy::cast_possible_truncation)]
    fn consume_numeric(&mut self) -> LexicalUnit {
        let (value, is_integer) = self.consume_number();

        if self.peek() == Some('%') {
            self.position += 1;
            return LexicalUnit::Percentage(value);
        }
        if self.would_start_ident() {
            let unit = self.consume_name();
            return LexicalUnit::Dimension { value, unit };
        }
        if is_integer {
            return LexicalUnit::Integer(value as i64);
        }
        LexicalUnit::Real(value)
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> (f64, bool) {
        let mut repr = String::new();
        let mut is_integer = true;

        // STEP 2: sign
        if let Some(sign @ ('+' | '-')) = self.peek() {
            repr.push(sign);
            self.position += 1;
        }
        // STEP 3: integer digits
        self.consume_digits(&mut repr);
        // STEP 4: fraction
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            repr.push('.');
            self.position += 1;
            self.consume_digits(&mut repr);
            is_integer = false;
        }
        // STEP 5: exponent
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_digit = match self.peek_at(1) {
                Some('+' | '-') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exponent_digit {
                repr.push('e');
                self.position += 1;
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    repr.push(sign);
                    self.position += 1;
                }
                self.consume_digits(&mut repr);
                is_integer = false;
            }
        }

        (repr.parse().unwrap_or(0.0), is_integer)
    }

    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            repr.push(c);
            self.position += 1;
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like(&mut self) -> Result<LexicalUnit, LexError> {
        let name = self.consume_name();
        if self.peek() != Some('(') {
            return Ok(LexicalUnit::Ident(name));
        }
        self.position += 1;

        if name.eq_ignore_ascii_case("url") {
            self.skip_whitespace_and_comments();
            if !matches!(self.peek(), Some('"' | '\'')) {
                return self.consume_unquoted_url();
            }
            let arguments = self.consume_arguments(&name)?;
            if let [LexicalUnit::String(uri)] = arguments.as_slice() {
                return Ok(LexicalUnit::Uri(uri.clone()));
            }
            return Ok(LexicalUnit::Function { name, arguments });
        }

        let arguments = self.consume_arguments(&name)?;
        Ok(LexicalUnit::Function { name, arguments })
    }

    /// Arguments up to the matching `)`, which is consumed.
    fn consume_arguments(&mut self, name: &str) -> Result<Vec<LexicalUnit>, LexError> {
        let mut arguments = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                None => return Err(LexError::UnclosedFunction(name.to_string())),
                Some(')') => {
                    self.position += 1;
                    return Ok(arguments);
                }
                Some(_) => {
                    if let Some(unit) = self.consume_unit(true)? {
                        arguments.push(unit);
                    }
                }
            }
        }
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_unquoted_url(&mut self) -> Result<LexicalUnit, LexError> {
        let mut uri = String::new();
        loop {
            match self.consume() {
                None => return Err(LexError::UnclosedFunction("url".to_string())),
                Some(')') => return Ok(LexicalUnit::Uri(uri.trim_end().to_string())),
                Some('\\') => uri.push(self.consume_escape()),
                Some(c) => uri.push(c),
            }
        }
    }

    /// `[name name ...]`, after the `[`.
    fn consume_line_names(&mut self) -> Result<LexicalUnit, LexError> {
        let mut names = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                None => return Err(LexError::UnclosedLineNames),
                Some(']') => {
                    self.position += 1;
                    return Ok(LexicalUnit::LineNames(names));
                }
                Some(_) if self.would_start_ident() => names.push(self.consume_name()),
                Some(_) => return Err(LexError::InvalidLineName),
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(c) if is_name_code_point(c) => {
                    name.push(c);
                    self.position += 1;
                }
                Some('\\') if self.peek_at(1).is_some_and(|c| c != '\n') => {
                    self.position += 1;
                    name.push(self.consume_escape());
                }
                _ => return name,
            }
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident(&self) -> bool {
        let starts_escape = |first: Option<char>, second: Option<char>| {
            first == Some('\\') && second.is_some_and(|c| c != '\n')
        };
        match self.peek() {
            Some('-') => {
                self.peek_at(1).is_some_and(|c| is_name_start_code_point(c) || c == '-')
                    || starts_escape(self.peek_at(1), self.peek_at(2))
            }
            Some(c) if is_name_start_code_point(c) => true,
            first => starts_escape(first, self.peek_at(1)),
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        let digit = |offset: usize| self.peek_at(offset).is_some_and(|c| c.is_ascii_digit());
        match self.peek() {
            Some('+' | '-') => digit(1) || (self.peek_at(1) == Some('.') && digit(2)),
            Some('.') => digit(1),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.position += 1;
            }
            // [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comments)
            if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
                self.position += 2;
                while self.peek().is_some()
                    && !(self.peek() == Some('*') && self.peek_at(1) == Some('/'))
                {
                    self.position += 1;
                }
                self.position = (self.position + 2).min(self.input.len());
            } else {
                return;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_name_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_name_code_point(c: char) -> bool {
    is_name_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
