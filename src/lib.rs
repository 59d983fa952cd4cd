pub mod clock;
pub mod config;
pub mod config_parser;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod render;
pub mod schedule;

pub use clock::*;
pub use self::config::*;
pub use config_parser::*;
pub use domain::*;
pub use error::*;
pub use metrics::*;
pub use render::*;
pub use schedule::*;
