pub mod name_parser;
pub mod name_sampler;
