mod contents;
mod generate;
mod health;
mod metrics;

pub use contents::{
    delete_content_handler, export_content_handler, get_content_handler, list_contents_handler,
};
pub use generate::generate_handler;
pub use health::{health_handler, options_handler};
pub use metrics::metrics_handler;
