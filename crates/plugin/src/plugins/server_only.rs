use weft_kernel::{set_header, BoxError, BoxResult};
use weft_model::{
    constants::{CUSTOM_HEAD_HEADER, CUSTOM_HEAD_VALUE, SERVER_ONLY_PLUGIN_NAME},
    plugin_meta, PluginEnv, PluginMetaData,
};

use crate::{Plugin, RequestContext};

/// Sets `custom-head: hello` on the response of every standard-rendered request.
///
/// The plugin opts out of island rendering, island requests never run it.
#[derive(Debug, Clone, Default)]
pub struct ServerOnlyPlugin;

impl Plugin for ServerOnlyPlugin {
    const NAME: &'static str = SERVER_ONLY_PLUGIN_NAME;

    fn env() -> PluginEnv {
        PluginEnv::islands(false)
    }

    fn meta() -> PluginMetaData {
        plugin_meta!(description: "Sets a custom response header on server rendered requests")
    }

    fn setup(&self, ctx: &mut RequestContext<'_>) -> BoxResult<()> {
        if let Some(exchange) = ctx.exchange() {
            set_header(exchange, CUSTOM_HEAD_HEADER, CUSTOM_HEAD_VALUE)?;
        }
        Ok(())
    }

    fn create() -> Result<Self, BoxError> {
        Ok(Self)
    }
}

#[cfg(test)]
mod test {
    use hyper::Request;
    use weft_kernel::{ExchangeError, RequestExchange, WfBody};

    use super::*;

    fn exchange() -> RequestExchange {
        RequestExchange::new(Request::get("/").body(WfBody::empty()).unwrap())
    }

    #[test]
    fn test_sets_header() {
        let mut ex = exchange();
        ServerOnlyPlugin.setup(&mut RequestContext::new(&mut ex)).unwrap();
        assert_eq!(ex.response_headers().unwrap().get("Custom-Head").unwrap(), "hello");
    }

    #[test]
    fn test_absent_context_is_noop() {
        assert!(ServerOnlyPlugin.setup(&mut RequestContext::absent()).is_ok());
    }

    #[test]
    fn test_repeated_setup_single_value() {
        let mut ex = exchange();
        ServerOnlyPlugin.setup(&mut RequestContext::new(&mut ex)).unwrap();
        ServerOnlyPlugin.setup(&mut RequestContext::new(&mut ex)).unwrap();
        let values: Vec<_> = ex.response_headers().unwrap().get_all(CUSTOM_HEAD_HEADER).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "hello");

        let mut fresh = exchange();
        ServerOnlyPlugin.setup(&mut RequestContext::new(&mut fresh)).unwrap();
        assert_eq!(fresh.response_headers().unwrap().get_all(CUSTOM_HEAD_HEADER).iter().count(), 1);
    }

    #[test]
    fn test_finalized_response_propagates() {
        let mut ex = exchange();
        ex.finalize().unwrap();
        let err = ServerOnlyPlugin.setup(&mut RequestContext::new(&mut ex)).unwrap_err();
        assert!(matches!(err.downcast_ref::<ExchangeError>(), Some(ExchangeError::FinalizedResponse)));
    }

    #[test]
    fn test_descriptor() {
        let descriptor = crate::PluginDescriptor::from_trait::<ServerOnlyPlugin>().unwrap();
        assert_eq!(descriptor.name().as_str(), "server-only-plugin");
        assert_eq!(descriptor.env(), PluginEnv::islands(false));
        assert!(descriptor.meta().description.is_some());
    }
}
