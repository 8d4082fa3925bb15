fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
/// Strips `search` from the start of `src` only when it stands as a whole
/// whitespace-delimited token.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
