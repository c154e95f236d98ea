//! Conversation flattening for the primary backend.

use super::{Message, MessageRole};

/// Prompt label for each conversation role.
fn role_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "System",
        MessageRole::User => "Human",
        MessageRole::Assistant => "Assistant",
    }
}

/// Flatten an ordered conversation into a single prompt string.
///
/// Each message renders as `"<RoleLabel>: <content>"`, joined with blank
/// lines. When the final message is not a user turn, a synthetic
/// `"Human: Please continue."` turn is appended so the backend always
/// receives a final user-directed prompt. Pure and total; never fails.
pub fn flatten_conversation(messages: &[Message]) -> String {
    let mut parts: Vec<String> = messages
        .iter()
        .map(|msg| format!("{}: {}", role_label(msg.role), msg.content))
        .collect();

    if let Some(last) = messages.last() {
        if last.role != MessageRole::User {
            parts.push("Human: Please continue.".to_string());
        }
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        let messages = vec![
            Message::system("Be helpful."),
            Message::user("Hi"),
        ];

        let prompt = flatten_conversation(&messages);
        assert_eq!(prompt, "System: Be helpful.\n\nHuman: Hi");
    }

    #[test]
    fn test_appends_continuation_after_assistant_turn() {
        let messages = vec![
            Message::user("Hi"),
            Message::assistant("Hello!"),
        ];

        let prompt = flatten_conversation(&messages);
        assert!(prompt.ends_with("Human: Please continue."));
    }

    #[test]
    fn test_appends_continuation_after_system_turn() {
        let messages = vec![Message::system("Be terse.")];

        let prompt = flatten_conversation(&messages);
        assert_eq!(prompt, "System: Be terse.\n\nHuman: Please continue.");
    }

    #[test]
    fn test_no_continuation_after_user_turn() {
        let messages = vec![
            Message::assistant("Hello!"),
            Message::user("Tell me more"),
        ];

        let prompt = flatten_conversation(&messages);
        assert!(prompt.ends_with("Human: Tell me more"));
    }

    #[test]
    fn test_always_ends_with_human_turn() {
        // Every non-empty conversation must flatten to a prompt whose final
        // turn is Human-labeled.
        let conversations = vec![
            vec![Message::user("a")],
            vec![Message::assistant("b")],
            vec![Message::system("c")],
            vec![Message::user("a"), Message::assistant("b")],
            vec![Message::system("c"), Message::user("a"), Message::assistant("b")],
        ];

        for messages in conversations {
            let prompt = flatten_conversation(&messages);
            let last_turn = prompt.rsplit("\n\n").next().unwrap();
            assert!(last_turn.starts_with("Human: "), "prompt was: {prompt}");
        }
    }

    #[test]
    fn test_empty_conversation() {
        assert_eq!(flatten_conversation(&[]), "");
    }
}
