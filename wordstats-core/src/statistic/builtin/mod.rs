mod count;
mod frequency;
mod top_letters;
mod top_words;

pub use count::Count;
pub use top_letters::TopLetters;
pub use top_words::TopWords;

/// Entries kept by the ranked statistics.
pub const TOP_LIMIT: usize = 5;
