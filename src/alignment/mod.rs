pub mod classifier;
pub mod kana;
pub mod lexicon;
pub mod mapping;
pub mod normalization;
pub mod phoneme;
pub mod words;
