use hyper::{
    header::{HeaderName, HeaderValue},
    http::Extensions,
    HeaderMap, Request, Response,
};

use crate::{
    extension::{EnterTime, Extension, RequestId},
    ExchangeError, WfBody, WfRequest, WfResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeState {
    /// The response can still be mutated.
    Open,
    /// The response was handed out by [`RequestExchange::finalize`].
    Finalized,
}

/// One in-flight request and the response being prepared for it.
///
/// An exchange is owned by the host for the lifetime of one request, plugins only ever see a `&mut` borrow
/// of it during their setup.
#[derive(Debug)]
pub struct RequestExchange {
    request: WfRequest,
    response: Option<WfResponse>,
}

impl RequestExchange {
    /// Create an exchange with an empty `200 OK` response.
    pub fn new(request: WfRequest) -> Self {
        Self::with_response(request, Response::new(WfBody::empty()))
    }

    pub fn with_response(mut request: WfRequest, response: WfResponse) -> Self {
        if Extension::<RequestId>::extract(&request).is_none() {
            Extension::new(RequestId::next()).inject(&mut request);
        }
        if Extension::<EnterTime>::extract(&request).is_none() {
            Extension::new(EnterTime::now()).inject(&mut request);
        }
        Self {
            request,
            response: Some(response),
        }
    }

    pub fn request(&self) -> &WfRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut WfRequest {
        &mut self.request
    }

    /// Per-request state, shared with the request's extensions.
    pub fn extensions(&self) -> &Extensions {
        self.request.extensions()
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        self.request.extensions_mut()
    }

    pub fn request_id(&self) -> Option<RequestId> {
        self.request.extensions().get::<RequestId>().copied()
    }

    pub fn state(&self) -> ExchangeState {
        if self.response.is_some() {
            ExchangeState::Open
        } else {
            ExchangeState::Finalized
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.state() == ExchangeState::Finalized
    }

    /// `None` once the response is finalized.
    pub fn response(&self) -> Option<&WfResponse> {
        self.response.as_ref()
    }

    /// # Errors
    /// [`ExchangeError::FinalizedResponse`] if the response was already finalized.
    pub fn response_mut(&mut self) -> Result<&mut WfResponse, ExchangeError> {
        self.response.as_mut().ok_or(ExchangeError::FinalizedResponse)
    }

    /// `None` once the response is finalized.
    pub fn response_headers(&self) -> Option<&HeaderMap> {
        self.response.as_ref().map(Response::headers)
    }

    /// Set a response header, replacing every previous value of the same key.
    ///
    /// Header names are case-insensitive.
    ///
    /// # Errors
    /// [`ExchangeError::FinalizedResponse`] if the response was already finalized, or an error if the key or value
    /// is not a valid header name or value.
    pub fn set_header(&mut self, key: &str, value: &str) -> Result<(), ExchangeError> {
        let response = self.response.as_mut().ok_or(ExchangeError::FinalizedResponse)?;
        let key = HeaderName::from_bytes(key.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        tracing::trace!("[Wf.Exchange] set response header {key}");
        response.headers_mut().insert(key, value);
        Ok(())
    }

    /// Hand the response out to be written, after this the exchange no longer accepts mutations.
    ///
    /// # Errors
    /// [`ExchangeError::FinalizedResponse`] if the response was already finalized.
    pub fn finalize(&mut self) -> Result<WfResponse, ExchangeError> {
        let response = self.response.take().ok_or(ExchangeError::FinalizedResponse)?;
        tracing::trace!(request_id = ?self.request_id(), status = %response.status(), "[Wf.Exchange] response finalized");
        Ok(response)
    }

    pub fn into_parts(self) -> (WfRequest, Option<WfResponse>) {
        (self.request, self.response)
    }
}

impl From<Request<WfBody>> for RequestExchange {
    fn from(value: Request<WfBody>) -> Self {
        Self::new(value)
    }
}
