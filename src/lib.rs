pub mod fetch;
pub mod load;
pub mod output;
pub mod parser;
