use weft_kernel::{BoxError, RequestExchange, WfRequest, WfResponse};
use weft_model::{HostConfig, RenderMode};

use crate::{PluginError, PluginRepository, SetupReport};

/// The per-request side of the host: decides the render mode of a request and runs the eligible setups
/// before the response is finalized.
#[derive(Debug, Clone)]
pub struct PluginHost {
    repo: PluginRepository,
    config: HostConfig,
}

impl PluginHost {
    pub fn new(repo: PluginRepository, config: HostConfig) -> Self {
        Self { repo, config }
    }

    /// Create a host with a fresh repository holding this crate's plugins, minus the disabled ones.
    ///
    /// # Errors
    /// If a bundled plugin fails to register.
    pub fn from_config(config: HostConfig) -> Result<Self, PluginError> {
        let repo = PluginRepository::new();
        repo.register_prelude_with(&config.plugins)?;
        tracing::info!("[Wf.Host] host ready with {count} plugins, default render mode {mode}", count = repo.len(), mode = config.render.default_mode);
        Ok(Self::new(repo, config))
    }

    pub fn repo(&self) -> &PluginRepository {
        &self.repo
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn render_mode(&self, exchange: &RequestExchange) -> RenderMode {
        RenderMode::detect(exchange.request(), &self.config.render)
    }

    /// Run the eligible setups for this exchange.
    ///
    /// # Errors
    /// The first setup error.
    pub fn handle(&self, exchange: &mut RequestExchange) -> Result<SetupReport, PluginError> {
        let mode = self.render_mode(exchange);
        tracing::debug!(request_id = ?exchange.request_id(), path = exchange.request().uri().path(), "[Wf.Host] dispatch in {mode} mode");
        self.repo.dispatch(exchange, mode)
    }

    /// Run the setups for a request and hand out its response.
    ///
    /// # Errors
    /// A setup error, or a response finalized by some plugin.
    pub fn respond(&self, request: WfRequest) -> Result<WfResponse, BoxError> {
        let mut exchange = RequestExchange::new(request);
        self.handle(&mut exchange)?;
        Ok(exchange.finalize()?)
    }
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new(PluginRepository::global().clone(), HostConfig::default())
    }
}

#[cfg(all(test, feature = "server-only"))]
mod test {
    use hyper::Request;
    use weft_kernel::WfBody;
    use weft_model::PluginName;

    use super::*;

    fn request(path: &str) -> WfRequest {
        Request::get(path).body(WfBody::empty()).unwrap()
    }

    #[test]
    fn test_render_mode_by_path() {
        let host = PluginHost::from_config(HostConfig::default()).unwrap();
        let mut ex = RequestExchange::new(request("/__island/Counter.json"));
        let report = host.handle(&mut ex).unwrap();
        assert_eq!(report.mode, RenderMode::Islands);
        assert!(report.invoked.is_empty());
        assert!(ex.response_headers().unwrap().get("custom-head").is_none());

        let resp = host.respond(request("/about")).unwrap();
        assert_eq!(resp.headers().get("custom-head").unwrap(), "hello");

        let resp = host.respond(request("/__islanders/about")).unwrap();
        assert_eq!(resp.headers().get("custom-head").unwrap(), "hello");
    }

    #[test]
    fn test_disabled_plugin_not_registered() {
        let mut config = HostConfig::default();
        config.plugins.disabled.insert(PluginName::new("server-only-plugin").unwrap());
        let host = PluginHost::from_config(config).unwrap();
        assert!(host.repo().is_empty());
        let resp = host.respond(request("/")).unwrap();
        assert!(resp.headers().get("custom-head").is_none());
    }
}
