mod flatten;
pub use flatten::{flatten, flatten_map};

mod json_streamer;
pub use json_streamer::{stream_to_map, JsonStreamer};

mod limits;
pub use limits::Limits;

pub mod numeric;
