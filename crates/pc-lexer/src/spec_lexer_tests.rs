use super::*;

fn toks(src: &str) -> Vec<SpecTok> {
    SpecLexer::new(src)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|s| s.tok)
        .collect()
}

#[test]
fn tokenizes_machine_header_and_body() {
    let t = toks("<assignop> => \\:\\=\n");
    assert_eq!(
        t,
        vec![
            SpecTok::MachineRef("assignop".into()),
            SpecTok::Prodsym,
            SpecTok::Terminal(':'),
            SpecTok::Terminal('='),
            SpecTok::Eol,
            SpecTok::Eof,
        ]
    );
}

#[test]
fn tokenizes_epsilon_and_closures() {
    let t = toks("(a|\u{03B5})*?+");
    assert_eq!(
        t,
        vec![
            SpecTok::LParen,
            SpecTok::Terminal('a'),
            SpecTok::Pipe,
            SpecTok::Epsilon,
            SpecTok::RParen,
            SpecTok::Star,
            SpecTok::Question,
            SpecTok::Plus,
            SpecTok::Eof,
        ]
    );
}

#[test]
fn tokenizes_annotation_block() {
    let t = toks("{attribute = 3, attcount}");
    assert_eq!(
        t,
        vec![
            SpecTok::Annotation(" attribute = 3, attcount".into()),
            SpecTok::Eof,
        ]
    );
}

#[test]
fn unterminated_annotation_is_an_error() {
    let err = SpecLexer::new("{attribute = 3").tokenize().unwrap_err();
    assert!(matches!(err, SpecError::UnterminatedAnnotation { .. }));
}
