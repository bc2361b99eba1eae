mod document;
mod feedback;
mod identity;
mod ids;
mod suggestion;
mod ticket;

pub use document::*;
pub use feedback::*;
pub use identity::*;
pub use ids::*;
pub use suggestion::*;
pub use ticket::*;
