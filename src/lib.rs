pub mod clock;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod output;
pub mod overlay;
pub mod parser;
pub mod projection;
pub mod render;
pub mod scale;
pub mod svg;
pub mod traffic;
