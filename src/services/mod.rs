pub mod conversation;
pub mod evaluation;
pub mod outputs;
pub mod reply;
pub mod validators;
