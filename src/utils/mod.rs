pub mod inspect_parser;
pub mod snippet;
