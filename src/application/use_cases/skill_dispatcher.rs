use crate::application::use_cases::reminder::ReminderUseCase;
use crate::application::use_cases::todo_forwarder::TodoForwarder;
use crate::domain::error::{AppError, Result};
use crate::domain::intent::{Intent, IntentRequest, SkillRequest, TASK_SLOT, TODO_ITEM_SLOT};
use crate::domain::skill_response::SkillResponse;
use crate::infrastructure::todo_api::TodoAction;
use serde_json::json;
use tracing::{error, info, warn};

pub const APOLOGY_SPEECH: &str = "Sorry, there was some problem. Please try again!!";

const WELCOME_SPEECH: &str = "Welcome to the Alexa Skills Kit, you can say hello!";
const TESTING_SPEECH: &str = "Hello Ketan, how are you?";
const HELP_SPEECH: &str = "You can say hello to me!";
const GOODBYE_SPEECH: &str = "Goodbye!";
const FALLBACK_SPEECH: &str = "The Hello World skill can't help you with that.  You can say hello!!";
const FALLBACK_REPROMPT: &str = "You can say hello!!";
const HELLO_WORLD_TITLE: &str = "Hello World";

pub fn apology() -> SkillResponse {
    SkillResponse::new().speak(APOLOGY_SPEECH).ask(APOLOGY_SPEECH)
}

/// Routes each request to its handler. Holds the process-wide clients.
pub struct SkillDispatcher {
    reminder: ReminderUseCase,
    todo: TodoForwarder,
}

impl SkillDispatcher {
    pub fn new(reminder: ReminderUseCase, todo: TodoForwarder) -> Self {
        Self { reminder, todo }
    }

    /// Always answers: any handler error is logged and turned into the
    /// apology.
    pub async fn handle(&self, request: SkillRequest) -> SkillResponse {
        let request_type = request.kind();
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(request_type, error = %err, "request handler failed");
                apology()
            }
        }
    }

    pub async fn dispatch(&self, request: SkillRequest) -> Result<SkillResponse> {
        match request {
            SkillRequest::Launch => Ok(SkillResponse::new()
                .speak(WELCOME_SPEECH)
                .should_end_session(false)),
            SkillRequest::Intent(intent_request) => self.handle_intent(intent_request).await,
            SkillRequest::SessionEnded { reason, error } => {
                info!(reason = ?reason, error = ?error, "session ended");
                Ok(SkillResponse::new())
            }
            SkillRequest::ExceptionEncountered { error } => {
                error!(error = ?error, "platform reported an exception for a previous response");
                Ok(SkillResponse::new())
            }
            SkillRequest::Unsupported => Err(AppError::UnhandledRequest(
                "unsupported request type".to_string(),
            )),
        }
    }

    async fn handle_intent(&self, request: IntentRequest) -> Result<SkillResponse> {
        match &request.intent {
            Intent::Testing => Ok(SkillResponse::new()
                .speak(TESTING_SPEECH)
                .card("Hello World Coke", TESTING_SPEECH)
                .should_end_session(false)),
            Intent::Help => Ok(SkillResponse::new()
                .speak(HELP_SPEECH)
                .ask(HELP_SPEECH)
                .card(HELLO_WORLD_TITLE, HELP_SPEECH)),
            Intent::Cancel | Intent::Stop => Ok(SkillResponse::new()
                .speak(GOODBYE_SPEECH)
                .card(HELLO_WORLD_TITLE, GOODBYE_SPEECH)),
            Intent::Fallback => {
                info!(
                    request_type = "IntentRequest",
                    intent = %request.intent,
                    slots = ?request.slots,
                    "fallback intent"
                );
                Ok(SkillResponse::new()
                    .speak(FALLBACK_SPEECH)
                    .ask(FALLBACK_REPROMPT))
            }
            Intent::AddTodo => {
                let item = request.require_slot(TODO_ITEM_SLOT)?;
                let speech = format!("Added {} to your list.", item);
                info!(item, "add to do");
                self.todo.forward(TodoAction::Add, json!({ "item": item }));
                Ok(SkillResponse::new().speak(&speech).card("To Do", speech))
            }
            Intent::RemoveTodo => {
                let item = request.require_slot(TODO_ITEM_SLOT)?;
                info!(item, "remove to do");
                self.todo.forward(TodoAction::Remove, json!({ "item": item }));
                Ok(SkillResponse::new().speak(format!("Removed {} from your list.", item)))
            }
            Intent::CompleteTodo => {
                let item = request.require_slot(TODO_ITEM_SLOT)?;
                info!(item, "complete to do");
                self.todo
                    .forward(TodoAction::Complete, json!({ "item": item }));
                Ok(SkillResponse::new().speak(format!("Marked {} as completed.", item)))
            }
            Intent::Reminder => {
                let task = request.require_slot(TASK_SLOT)?;
                info!(task, "reminder to do");
                let extraction = self.reminder.execute(task).await?;
                match &extraction.fields {
                    Some(fields) => {
                        self.todo
                            .forward(TodoAction::Reminder, fields.to_event_data(task));
                    }
                    None => warn!(
                        json = %extraction.json,
                        "reminder not forwarded, no usable fields"
                    ),
                }
                Ok(SkillResponse::new().speak(format!("Reminder set for {}.", task)))
            }
            Intent::Youtube => {
                info!("playing youtube");
                self.todo.forward(TodoAction::Youtube, json!({}));
                Ok(SkillResponse::new().speak("Playing Youtube on EchoGlass."))
            }
            Intent::PhotoTryOut => {
                info!("photo try out");
                self.todo.forward(TodoAction::PhotoTryout, json!({}));
                Ok(SkillResponse::new().speak("Let's do a photo try out."))
            }
            Intent::VideoTryOut => {
                info!("video try out");
                Ok(SkillResponse::new().speak("Let's do a video try out."))
            }
            Intent::Unknown(name) => Err(AppError::UnhandledRequest(format!("intent {}", name))),
        }
    }
}
