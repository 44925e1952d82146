mod config_gen;
mod links;
mod open;
mod stats;

pub use config_gen::config_generate;
pub use links::{batch_shorten, shorten};
pub use open::open_link;
pub use stats::{list_clicks, show_stats};
