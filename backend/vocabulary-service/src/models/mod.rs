/// Data models for vocabulary entries and statistics
pub mod vocabulary;

pub use vocabulary::{
    parse_date, ListFilter, NewVocabulary, Vocabulary, VocabularyChanges, VocabularyPage,
    VocabularyStats, DATE_FORMAT, DEFAULT_STATUS,
};
