//! Inflection helpers used to derive table and column names.

/// Returns the plural form of `word`, e.g. `project` -> `projects`.
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}

/// Returns the singular form of `word`, e.g. `users` -> `user`.
pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}
