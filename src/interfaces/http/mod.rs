use crate::application::use_cases::skill_dispatcher::apology;
use crate::domain::envelope::RequestEnvelope;
use crate::domain::intent::SkillRequest;
use crate::infrastructure::config::ServerConfig;
use crate::interfaces::state::AppState;
use actix_web::{dev::Server, get, post, web, HttpResponse, HttpServer, Responder};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::info;

const MAX_LOG_ENTRIES: usize = 100;
const MAX_ENVELOPE_BYTES: usize = 256 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Voice platform webhook. Always answers 200 with a response envelope, even
/// when the body cannot be read.
#[post("/alexa")]
async fn skill_endpoint(data: web::Data<AppState>, payload: web::Payload) -> impl Responder {
    let body = match payload.to_bytes_limited(MAX_ENVELOPE_BYTES).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            return apology_reply(&data, &format!("Failed to read request body: {}", e))
        }
        Err(_) => {
            return apology_reply(
                &data,
                &format!("Request body exceeds {} bytes", MAX_ENVELOPE_BYTES),
            )
        }
    };

    let envelope = match serde_json::from_slice::<RequestEnvelope>(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return apology_reply(&data, &format!("Malformed request envelope: {}", e))
        }
    };

    info!(
        request_type = envelope.request.type_name(),
        request_id = envelope.request.request_id().unwrap_or("-"),
        session_id = envelope.session_id().unwrap_or("-"),
        locale = envelope.request.locale().unwrap_or("-"),
        "skill request received"
    );

    let request = SkillRequest::from(envelope);
    let summary = match &request {
        SkillRequest::Intent(intent_request) => {
            format!("{} {}", request.kind(), intent_request.intent)
        }
        other => other.kind().to_string(),
    };
    add_log(&data.logs, "INFO", "Skill", &format!("Handling {}", summary));

    let response = data.dispatcher.handle(request).await;
    HttpResponse::Ok().json(response.into_envelope())
}

fn apology_reply(state: &AppState, message: &str) -> HttpResponse {
    add_log(&state.logs, "ERROR", "Skill", message);
    HttpResponse::Ok().json(apology().into_envelope())
}

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "timestamp": Utc::now().to_rfc3339(),
        "server": "EchoGlass Skill",
    }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<AppState>) -> impl Responder {
    let logs = data
        .logs
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        "DEBUG" => tracing::debug!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(skill_endpoint)
        .service(web::scope("/api").service(ping).service(get_logs));
}

pub fn start_server(state: Arc<AppState>, config: &ServerConfig) -> std::io::Result<Server> {
    let data = web::Data::from(state);

    let server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(data.clone())
            .configure(configure)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
