pub mod levenshtein_comparer;
