use super::{App, read_request};
use anyhow::Result;
use siteplan_core::SiteLayout;
use std::path::Path;

pub fn calculate(app: &App, input: Option<&Path>) -> Result<SiteLayout> {
    let request = read_request(input)?;
    Ok(app.layouts.calculate(&request.configs)?)
}

pub async fn for_session(app: &App, id: &str) -> Result<SiteLayout> {
    Ok(app.layouts.layout_for_session(id).await?)
}
