pub mod dates;
pub mod facts;

/// A single extraction rule: a pure function from text to an optional match.
pub type Rule = fn(&str) -> Option<String>;

/// Try rules in priority order; the first rule that matches wins, and within
/// a rule the first match in scan order wins.
pub fn first_match(rules: &[Rule], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule(text))
}
