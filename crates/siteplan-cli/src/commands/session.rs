use super::{App, read_request};
use anyhow::{Context, Result};
use serde::Serialize;
use siteplan_core::Configuration;
use siteplan_core::session::Session;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: String,
}

pub async fn save(app: &App, input: Option<&Path>) -> Result<SaveResponse> {
    let request = read_request(input)?;
    let id = app.sessions.save(&request).await.map_err(|err| {
        if err.is_input_error() {
            anyhow::Error::new(err)
        } else {
            anyhow::Error::new(err).context("Failed to save session")
        }
    })?;
    Ok(SaveResponse { id })
}

pub async fn list(app: &App) -> Result<Vec<Session>> {
    app.sessions.list().await.context("Failed to list sessions")
}

/// Returns only the stored configuration, as clients reload it into the editor.
pub async fn load(app: &App, id: &str) -> Result<Configuration> {
    let session = app.sessions.load(id).await?;
    Ok(session.config)
}

pub async fn delete(app: &App, id: &str) -> Result<()> {
    app.sessions
        .delete(id)
        .await
        .context("Failed to delete session")
}
