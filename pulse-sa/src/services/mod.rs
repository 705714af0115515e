//! Domain services for sentiment classification and analysis

pub mod emotion;
pub mod huggingface;
pub mod keywords;
pub mod lexicon;
pub mod resolver;
