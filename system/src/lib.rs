mod canvas;
mod engine;
mod message;
mod registry;
mod room;

pub use canvas::*;
pub use engine::*;
pub use message::*;
pub use registry::*;
pub use room::*;

pub extern crate serde;
pub extern crate serde_json;
