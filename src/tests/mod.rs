pub mod common;

mod config_loading;
mod dispatch_ordering;
mod token_refresh;
