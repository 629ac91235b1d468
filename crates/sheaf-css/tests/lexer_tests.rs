//! Integration tests for the value lexer and declaration reader.

use sheaf_css::lexical::{LexError, LexicalUnit, lex_value, parse_declaration_list};

fn lex(input: &str) -> Vec<LexicalUnit> {
    lex_value(input).unwrap()
}

fn px(value: f64) -> LexicalUnit {
    LexicalUnit::Dimension {
        value,
        unit: "px".to_string(),
    }
}

#[test]
fn test_border_value() {
    assert_eq!(
        lex("1px solid #fff"),
        vec![
            px(1.0),
            LexicalUnit::Ident("solid".to_string()),
            LexicalUnit::Hash("fff".to_string()),
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        lex("0 1.5 -2 50% .5em"),
        vec![
            LexicalUnit::Integer(0),
            LexicalUnit::Real(1.5),
            LexicalUnit::Integer(-2),
            LexicalUnit::Percentage(50.0),
            LexicalUnit::Dimension {
                value: 0.5,
                unit: "em".to_string(),
            },
        ]
    );
}

#[test]
fn test_slash_without_spaces() {
    assert_eq!(
        lex("12px/1.5"),
        vec![px(12.0), LexicalUnit::Slash, LexicalUnit::Real(1.5)]
    );
}

#[test]
fn test_top_level_commas() {
    let units = lex("fade 1s, slide 2s");
    assert_eq!(units.len(), 5);
    assert_eq!(units[2], LexicalUnit::Comma);
}

#[test]
fn test_function_keeps_operators() {
    let units = lex("calc(100% - 2px)");
    let [LexicalUnit::Function { name, arguments }] = units.as_slice() else {
        panic!("expected one function, got {units:?}");
    };
    assert_eq!(name, "calc");
    assert_eq!(
        arguments,
        &vec![
            LexicalUnit::Percentage(100.0),
            LexicalUnit::Operator('-'),
            px(2.0),
        ]
    );
}

#[test]
fn test_urls() {
    assert_eq!(lex("url(a.png)"), vec![LexicalUnit::Uri("a.png".to_string())]);
    assert_eq!(
        lex("url( 'b c.png' )"),
        vec![LexicalUnit::Uri("b c.png".to_string())]
    );
}

#[test]
fn test_strings_and_escapes() {
    assert_eq!(
        lex(r#""a\"b" 'c'"#),
        vec![
            LexicalUnit::String("a\"b".to_string()),
            LexicalUnit::String("c".to_string()),
        ]
    );
}

#[test]
fn test_line_names() {
    assert_eq!(
        lex("[header-start main] 1fr"),
        vec![
            LexicalUnit::LineNames(vec!["header-start".to_string(), "main".to_string()]),
            LexicalUnit::Dimension {
                value: 1.0,
                unit: "fr".to_string(),
            },
        ]
    );
}

#[test]
fn test_var_detection() {
    let units = lex("calc(var(--gap) * 2)");
    assert!(units[0].contains_var());
    assert!(!lex("calc(1px * 2)")[0].contains_var());
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(lex("1px /* two */ 2px"), vec![px(1.0), px(2.0)]);
}

#[test]
fn test_errors() {
    assert_eq!(lex_value("'open"), Err(LexError::UnterminatedString(0)));
    assert_eq!(
        lex_value("rgb(0 0 0"),
        Err(LexError::UnclosedFunction("rgb".to_string()))
    );
    assert_eq!(lex_value("[a"), Err(LexError::UnclosedLineNames));
    assert!(matches!(
        lex_value("1px ; 2px"),
        Err(LexError::UnexpectedCharacter { character: ';', .. })
    ));
}

#[test]
fn test_declaration_list_priorities() {
    let declarations =
        parse_declaration_list("margin: 0 !important; color: red !ie; width: 1px\\9; --Custom: x");
    assert_eq!(declarations.len(), 4);
    assert!(declarations[0].important);
    assert_eq!(declarations[0].value, "0");
    assert!(declarations[1].priority_compat);
    assert_eq!(declarations[1].value, "red");
    assert!(declarations[2].priority_compat);
    assert_eq!(declarations[2].value, "1px\\9");
    assert_eq!(declarations[3].name, "--Custom");
}
