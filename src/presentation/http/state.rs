// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use crate::presentation::templates::TemplateRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub renderer: Arc<dyn TemplateRenderer>,
}
