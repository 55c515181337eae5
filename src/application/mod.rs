pub mod use_cases;

pub use use_cases::reminder::ReminderUseCase;
pub use use_cases::skill_dispatcher::SkillDispatcher;
pub use use_cases::todo_forwarder::TodoForwarder;
