pub mod normalizer;
pub mod phrase_comparer;
pub mod phrase_matcher;
pub mod phrase_occurrence;
pub mod word_timeline;
