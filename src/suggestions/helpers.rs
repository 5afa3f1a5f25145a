use super::data::DICTIONARY;

pub fn suggestions_for(input: &str) -> &'static [&'static str] {
    let input = input.trim().to_lowercase();
    let key = input.split_whitespace().next().unwrap_or_default();

    DICTIONARY
        .iter()
        .find(|(keyword, _)| *keyword == key)
        .map(|(_, completions)| *completions)
        .unwrap_or(&[])
}

pub fn apply_suggestion(text: &str, suggestion: &str) -> String {
    if text.ends_with(' ') {
        format!("{}{}", text, suggestion)
    } else {
        format!("{} {}", text, suggestion)
    }
}
