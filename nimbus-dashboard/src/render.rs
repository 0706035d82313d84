use handlebars::{Handlebars, TemplateError};
use nimbus_core::Node;
use serde::Serialize;
use std::path::Path;

pub const INDEX: &str = "index";
pub const INFO: &str = "info";

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");
const INFO_TEMPLATE: &str = include_str!("../templates/info.hbs");

#[derive(Serialize)]
pub struct IndexPage {
    pub error: Option<String>,
    pub success: Option<String>,
    pub servers: Vec<Node>,
}

#[derive(Serialize)]
pub struct InfoPage<'a> {
    pub server: &'a Node,
    pub chart_urls: &'a [String],
}

/// Registre des templates; `dir` (si fourni) doit contenir index.hbs et info.hbs.
pub fn build_registry(dir: Option<&Path>) -> Result<Handlebars<'static>, TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(false);

    match dir {
        Some(dir) => {
            registry.register_template_file(INDEX, dir.join("index.hbs"))?;
            registry.register_template_file(INFO, dir.join("info.hbs"))?;
            tracing::info!(dir = %dir.display(), "[dashboard] templates loaded");
        }
        None => {
            registry.register_template_string(INDEX, INDEX_TEMPLATE)?;
            registry.register_template_string(INFO, INFO_TEMPLATE)?;
        }
    }
    Ok(registry)
}
