pub mod config;
pub mod event;
pub mod reader;

pub use config::ReaderConfig;
pub use event::ReaderEvent;
pub use reader::{wpm_to_milliseconds, Reader};
