use serde::{Deserialize, Serialize};

/// Who produced a message in the conversation log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Human,
    Bot,
}

/// An entry of the conversation log. Never modified after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub speaker: Speaker,
    /// Thread the message belonged to when it was logged, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl Message {
    /// Create a message typed by the user
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            speaker: Speaker::Human,
            thread_id: None,
        }
    }

    /// Create a message produced by the backend
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            speaker: Speaker::Bot,
            thread_id: None,
        }
    }

    /// Tag the message with a thread id
    pub fn in_thread(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id;
        self
    }

    pub fn is_human(&self) -> bool {
        self.speaker == Speaker::Human
    }

    pub fn is_bot(&self) -> bool {
        self.speaker == Speaker::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let human = Message::human("hi");
        assert!(human.is_human());
        assert_eq!(human.content, "hi");
        assert_eq!(human.thread_id, None);

        let bot = Message::bot("Hello!").in_thread(Some("t1".to_string()));
        assert!(bot.is_bot());
        assert_eq!(bot.thread_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_speaker_serializes_lowercase() {
        let json = serde_json::to_value(Message::bot("x")).unwrap();
        assert_eq!(json, serde_json::json!({"content": "x", "speaker": "bot"}));
    }
}
