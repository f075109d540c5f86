/// Tokenize text into lowercase, whitespace-delimited terms.
///
/// Punctuation is kept as part of the term and no stemming is applied.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Running, runner's  RUN!");
        assert_eq!(t, vec!["running,", "runner's", "run!"]);
    }

    #[test]
    fn blank_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }
}
