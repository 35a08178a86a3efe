use gordon_core::{Message, MessageContent, Role};

pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Model => "gordon",
    }
}

/// One transcript line as shown in the terminal.
pub fn render_message(message: &Message) -> String {
    let time = message.created_at().format("%H:%M");
    let who = speaker(message.role());
    match message.content() {
        MessageContent::Text(text) => format!("[{time}] {who}: {text}"),
        MessageContent::Image(bytes) => format!("[{time}] {who}: [image, {} KB]", bytes.len().div_ceil(1024)),
    }
}
