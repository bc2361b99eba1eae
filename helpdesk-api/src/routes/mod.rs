pub(crate) mod admin;
pub(crate) mod chat;
pub(crate) mod comments;
pub(crate) mod documents;
pub(crate) mod error;
pub(crate) mod feedback;
pub(crate) mod health;
pub(crate) mod suggestions;
pub(crate) mod tickets;

pub(crate) use error::ApiError;
