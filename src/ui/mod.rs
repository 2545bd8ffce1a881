//! Terminal front end: the event loop and feed rendering.
//!
//! - `loop_runner` - event loop and the one-shot `run_until_idle`
//! - `events` - applying background task results to the app
//! - `output` - text and JSON rendering

mod events;
mod loop_runner;
mod output;

pub use events::handle_app_event;
pub use loop_runner::{run, run_until_idle};
pub use output::{write_json, write_text, EMPTY_FEED_MESSAGE};
