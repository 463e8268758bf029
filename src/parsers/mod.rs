pub mod quiz_text;

pub use quiz_text::{clean_question_text, parse_options, ParsedOption};
