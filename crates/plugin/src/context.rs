use weft_kernel::{extension::RequestId, RequestExchange};

/// Access to the request a plugin's setup runs for.
///
/// The host builds one context per setup invocation and passes it explicitly. When the setup runs outside of
/// any request the context is absent, so callers check before use:
///
/// ```rust
/// # use weft_plugin::{RequestContext, set_header, BoxResult};
/// fn setup(ctx: &mut RequestContext<'_>) -> BoxResult<()> {
///     if let Some(exchange) = ctx.exchange() {
///         set_header(exchange, "custom-head", "hello")?;
///     }
///     Ok(())
/// }
/// # setup(&mut RequestContext::absent()).unwrap();
/// ```
#[derive(Debug)]
pub struct RequestContext<'a> {
    exchange: Option<&'a mut RequestExchange>,
}

impl<'a> RequestContext<'a> {
    pub fn new(exchange: &'a mut RequestExchange) -> Self {
        Self { exchange: Some(exchange) }
    }

    pub const fn absent() -> Self {
        Self { exchange: None }
    }

    /// The active exchange, the same one on every call within a setup invocation.
    pub fn exchange(&mut self) -> Option<&mut RequestExchange> {
        self.exchange.as_deref_mut()
    }

    pub fn is_present(&self) -> bool {
        self.exchange.is_some()
    }

    pub fn request_id(&self) -> Option<RequestId> {
        self.exchange.as_deref().and_then(RequestExchange::request_id)
    }

    /// Get the active exchange.
    ///
    /// # Panics
    /// Panics if the context is absent. Use it only in setups the host never runs outside of a request.
    pub fn require_exchange(&mut self) -> &mut RequestExchange {
        self.exchange.as_deref_mut().expect("setup invoked outside of any request")
    }
}

impl<'a> From<Option<&'a mut RequestExchange>> for RequestContext<'a> {
    fn from(exchange: Option<&'a mut RequestExchange>) -> Self {
        Self { exchange }
    }
}

#[cfg(test)]
mod test {
    use hyper::Request;
    use weft_kernel::WfBody;

    use super::*;

    #[test]
    fn test_referential_stability() {
        let mut exchange = RequestExchange::new(Request::get("/").body(WfBody::empty()).unwrap());
        let expected: *const RequestExchange = &exchange;
        let mut ctx = RequestContext::new(&mut exchange);
        let first: *const RequestExchange = ctx.exchange().unwrap();
        let second: *const RequestExchange = ctx.exchange().unwrap();
        assert_eq!(first, expected);
        assert_eq!(second, expected);
        assert!(ctx.is_present());
        assert!(ctx.request_id().is_some());
    }

    #[test]
    fn test_absent() {
        let mut ctx = RequestContext::absent();
        assert!(ctx.exchange().is_none());
        assert!(!ctx.is_present());
        assert!(ctx.request_id().is_none());
        assert!(RequestContext::from(None::<&mut RequestExchange>).exchange().is_none());
    }

    #[test]
    #[should_panic(expected = "outside of any request")]
    fn test_require_absent_panics() {
        RequestContext::absent().require_exchange();
    }
}
