pub mod analyzers;
pub mod fetch;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;
pub mod style;
pub mod view;
