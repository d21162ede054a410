use fathom_parser::tokenize;

#[test]
fn words_lowercased_and_split() {
    let words: Vec<String> = tokenize("Take the Red BALL")
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(words, vec!["take", "the", "red", "ball"]);
}

#[test]
fn punctuation_tokens_are_single_chars() {
    let tokens = tokenize("wait, then look.");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["wait", ",", "then", "look", "."]);
    assert!(!tokens[1].is_word());
    assert!(tokens[2].is_word());
}

#[test]
fn spans_index_the_original_bytes() {
    let input = "ask Guard about the Old War";
    let tokens = tokenize(input);
    for token in &tokens {
        assert_eq!(
            input[token.start..token.end].to_lowercase(),
            token.text,
            "span mismatch for {:?}",
            token.text
        );
    }
    // A multi-token span recovers the original casing.
    let span = &input[tokens[3].start..tokens[5].end];
    assert_eq!(span, "the Old War");
}

#[test]
fn hyphen_and_apostrophe_words() {
    let words: Vec<String> = tokenize("it's a jack-o-lantern")
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(words, vec!["it's", "a", "jack-o-lantern"]);
}
