pub mod messages;
pub mod models;
pub mod users;

pub use messages::MessageRepository;
pub use models::{Message, MessageDetail, ReceivedMessage, SentMessage, User, UserProfile};
pub use users::UserRepository;
