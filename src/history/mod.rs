mod types;

pub use types::*;

/// Copies the caller's history and appends the new user message.
pub fn with_user_message(history: &[Turn], message: &str) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.extend_from_slice(history);
    turns.push(Turn::user(message));
    turns
}

/// Collapses turns into the newline-joined `role: content` text the
/// inference endpoint consumes. Content is not escaped, so a turn containing
/// `"\nuser: "` reads like a turn boundary on the other side.
pub fn flatten(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}
