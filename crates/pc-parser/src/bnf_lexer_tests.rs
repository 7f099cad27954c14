use super::*;

fn toks(src: &str) -> Vec<BnfTok> {
    BnfLexer::new(src)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|s| s.tok)
        .collect()
}

#[test]
fn tokenizes_a_simple_production() {
    let t = toks("S => A b | c\n");
    assert_eq!(
        t,
        vec![
            BnfTok::Word("S".into()),
            BnfTok::Prodsym,
            BnfTok::Word("A".into()),
            BnfTok::Word("b".into()),
            BnfTok::Pipe,
            BnfTok::Word("c".into()),
            BnfTok::Eol,
            BnfTok::Eof,
        ]
    );
}

#[test]
fn tokenizes_epsilon_and_dollar_terminator() {
    let t = toks("A => \u{03B5}\n$");
    assert_eq!(
        t,
        vec![
            BnfTok::Word("A".into()),
            BnfTok::Prodsym,
            BnfTok::Epsilon,
            BnfTok::Eol,
            BnfTok::Dollar,
            BnfTok::Eof,
        ]
    );
}

#[test]
fn tokenizes_trailing_annotation_block() {
    let t = toks("S => a { x.v := 1 }\n");
    assert!(matches!(t[3], BnfTok::Annotation(_)));
}
