pub mod reminder;
pub mod skill_dispatcher;
pub mod todo_forwarder;
