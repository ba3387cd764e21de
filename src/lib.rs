pub mod companion;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod pipeline;
pub mod record;
pub mod table;
pub mod write;

pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use pipeline::run;
pub use record::CardRecord;
