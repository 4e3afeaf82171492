use crate::env::Environment;
use regex::Captures;
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is a valid regex")
    })
}

/// Replaces every `{{key}}` in `text` with the environment's value for
/// `key`. Placeholders without a value are left in place, braces and all,
/// so the missing names stay visible.
pub fn interpolate(text: &str, env: &Environment) -> String {
    placeholder_pattern()
        .replace_all(text, |caps: &Captures| match env.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
