// Library interface for gordon-cli, so command parsing and rendering can be
// tested without a terminal.

pub mod commands;
pub mod render;

pub use commands::{handle_command, CommandResult};
pub use render::render_message;
