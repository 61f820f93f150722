pub mod chat {
    use serde::{Deserialize, Serialize};

    /// Who authored a conversation turn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        System,
        User,
        Assistant,
    }

    /// One entry in the history sent to the completion API.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChatTurn {
        pub role: Role,
        pub content: String,
    }

    impl ChatTurn {
        pub fn system(content: impl Into<String>) -> Self {
            Self {
                role: Role::System,
                content: content.into(),
            }
        }

        pub fn user(content: impl Into<String>) -> Self {
            Self {
                role: Role::User,
                content: content.into(),
            }
        }

        pub fn assistant(content: impl Into<String>) -> Self {
            Self {
                role: Role::Assistant,
                content: content.into(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_role_serializes_lowercase() {
            assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
            assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
            assert_eq!(
                serde_json::to_string(&Role::Assistant).unwrap(),
                "\"assistant\""
            );
        }

        #[test]
        fn test_turn_serializes_as_role_and_content() {
            let turn = ChatTurn::user("hello");
            let json = serde_json::to_value(&turn).unwrap();
            assert_eq!(json["role"], "user");
            assert_eq!(json["content"], "hello");
        }

        #[test]
        fn test_constructors_set_roles() {
            assert_eq!(ChatTurn::system("s").role, Role::System);
            assert_eq!(ChatTurn::user("u").role, Role::User);
            assert_eq!(ChatTurn::assistant("a").role, Role::Assistant);
        }
    }
}
