/// Parse a target classes list shaped like `[12, 32, 23]`.
///
/// Brackets are removed, the list is split on commas and every non-digit
/// character is stripped from each token. Tokens left empty are dropped.
pub fn parse_target_classes(classes: &str) -> Vec<String> {
    classes
        .replace(['[', ']'], "")
        .split(',')
        .map(|tok| tok.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|tok| !tok.is_empty())
        .collect()
}
