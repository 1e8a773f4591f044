// src/cli/serve.rs — Wire the service, model and UI together

use std::sync::Arc;
use std::time::Duration;

use crate::core::{AnalystChain, Assistant};
use crate::infra::config::Config;
use crate::provider::resolver;
use crate::service::{FetchParameters, SoapClient};
use crate::web::page::PageRenderer;
use crate::web::{self, AppState, SessionStore};

pub async fn run_serve(config: &Config) -> anyhow::Result<()> {
    let provider = resolver::build_provider(&config.model)?;
    let generator = AnalystChain::from_config(provider, &config.model)?;
    let service = SoapClient::new(&config.service)?;

    let state = AppState {
        assistant: Assistant::new(Arc::new(service), Arc::new(generator)),
        sessions: SessionStore::with_idle_timeout(Duration::from_secs(
            config.server.session_idle_secs,
        )),
        page: Arc::new(PageRenderer::new(&config.server.title)?),
        defaults: FetchParameters::new(
            &config.service.default_sbs,
            &config.service.default_logged_user_id,
        ),
    };

    web::start_server(&config.server, state).await
}
