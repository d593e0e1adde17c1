/// Vocabulary storage, held in process memory
pub mod vocabularies;

pub use vocabularies::VocabularyStore;
