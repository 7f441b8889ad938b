pub mod transcript;

pub use transcript::{TranscriptError, parse_reader, parse_transcript};
