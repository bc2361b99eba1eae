use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares an opaque string identifier newtype.
///
/// Identifiers are compared by value and serialize as bare strings.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// A fresh random (v4 UUID) identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a support ticket.
    TicketId
);

string_id!(
    /// Identifier of a comment on a ticket.
    CommentId
);

string_id!(
    /// Identifier of a workflow suggestion. Shared with its vector index point.
    SuggestionId
);

string_id!(
    /// Identifier of a helpfulness vote.
    FeedbackId
);

string_id!(
    /// Subject of an authenticated user, as forwarded by the auth proxy.
    UserId
);
