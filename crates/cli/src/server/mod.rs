pub mod web;

pub use web::{spawn_signal_listener, start_web_server};
