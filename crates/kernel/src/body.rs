use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full};
use hyper::body::{Body, Frame, SizeHint};

use crate::BoxError;

/// Body of requests and responses carried by a [`RequestExchange`](crate::RequestExchange).
pub struct WfBody {
    body: BoxBody<Bytes, BoxError>,
}

impl Default for WfBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for WfBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WfBody").field("size_hint", &self.body.size_hint()).finish()
    }
}

impl WfBody {
    pub fn new<B>(body: B) -> Self
    where
        B: Body<Data = Bytes> + Send + Sync + 'static,
        B::Error: Into<BoxError>,
    {
        Self {
            body: body.map_err(Into::into).boxed(),
        }
    }
    pub fn empty() -> Self {
        Self {
            body: Empty::new().map_err(|never| match never {}).boxed(),
        }
    }
    pub fn full(data: impl Into<Bytes>) -> Self {
        Self {
            body: Full::new(data.into()).map_err(|never| match never {}).boxed(),
        }
    }
}

impl Body for WfBody {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.body).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.body.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.body.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_collect_full() {
        let body = WfBody::full("hello");
        let collected = body.collect().await.expect("infallible").to_bytes();
        assert_eq!(collected, Bytes::from_static(b"hello"));
        assert!(WfBody::empty().is_end_stream());
    }
}
