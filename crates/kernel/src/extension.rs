mod enter_time;
pub use enter_time::*;
mod request_id;
pub use request_id::*;

use hyper::Request;

/// Just extract and attach the extension to the request
#[derive(Debug, Clone)]
pub struct Extension<E>(pub E);

impl<E> Extension<E> {
    pub const fn new(e: E) -> Self {
        Self(e)
    }

    pub fn into_inner(self) -> E {
        self.0
    }
    pub const fn inner(&self) -> &E {
        &self.0
    }
}

impl<E: Clone + Send + Sync + 'static> Extension<E> {
    pub fn extract<B>(req: &Request<B>) -> Option<Self> {
        req.extensions().get::<E>().map(|e| Self(e.clone()))
    }
    pub fn inject<B>(&self, req: &mut Request<B>) {
        req.extensions_mut().insert(self.0.clone());
    }
}
