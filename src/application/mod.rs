pub mod use_cases;

pub use use_cases::name_parser::NameParser;
pub use use_cases::name_sampler::NameSampler;
