pub mod agent_clients;
pub mod bootstrap;
pub mod config;
pub mod http_client;
pub mod response;
pub mod todo_api;

#[cfg(test)]
pub(crate) mod stub_server;
