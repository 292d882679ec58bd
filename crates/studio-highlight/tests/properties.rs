use proptest::prelude::*;
use studio_highlight::{LexState, Tokenizer};
use studio_schema::SchemaTables;

fn tokenizer() -> Tokenizer {
    Tokenizer::new(&SchemaTables::builtin().unwrap()).unwrap()
}

// Biased towards the characters both grammars care about.
const YAMLISH: &str = "[a-z_ :{}%#!'\"\\-+|>\\[\\],.&*0-9\t]{0,48}";

fn check_coverage(tokenizer: &Tokenizer, line: &str, state: LexState) -> LexState {
    let (tokens, next) = tokenizer.tokenize(line, state);
    let mut column = 0;
    let mut rebuilt = String::new();
    for token in &tokens {
        assert_eq!(token.span.start, column, "gap before {token:?} in {line:?}");
        assert!(!token.span.is_empty(), "empty token {token:?} in {line:?}");
        rebuilt.push_str(token.text(line));
        column = token.span.end;
    }
    assert_eq!(column, line.chars().count());
    assert_eq!(rebuilt, line);
    next
}

proptest! {
    #[test]
    fn test_tokens_cover_line_exactly(line in YAMLISH) {
        check_coverage(&tokenizer(), &line, LexState::start());
    }

    #[test]
    fn test_arbitrary_text_never_stalls(line in "\\PC*") {
        check_coverage(&tokenizer(), &line, LexState::start());
        check_coverage(&Tokenizer::host_only(), &line, LexState::start());
    }

    #[test]
    fn test_tokenize_is_deterministic(lines in prop::collection::vec(YAMLISH, 1..8)) {
        let tokenizer = tokenizer();
        let mut a = LexState::start();
        let mut b = LexState::start();
        for line in &lines {
            let (tokens_a, next_a) = tokenizer.tokenize(line, a);
            let (tokens_b, next_b) = tokenizer.tokenize(line, b);
            prop_assert_eq!(tokens_a, tokens_b);
            prop_assert_eq!(next_a, next_b);
            a = next_a;
            b = check_coverage(&tokenizer, line, next_b);
        }
    }
}
