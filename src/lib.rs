pub mod output;
pub mod pipeline;
pub mod rates;
pub mod resolver;
pub mod tables;
