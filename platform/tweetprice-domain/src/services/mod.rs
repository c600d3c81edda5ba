pub mod assembler;
pub mod join;
pub mod normalizer;
pub mod price_change;
pub mod price_index;
pub mod price_quality;
pub mod resolver;
