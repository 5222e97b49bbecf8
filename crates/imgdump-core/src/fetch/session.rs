//! Shared HTTP session: a pool of libcurl easy handles.
//!
//! A handle returned to the pool keeps its connection cache, so consecutive
//! requests on the same handle reuse kept-alive connections. Transfers are
//! blocking; async callers go through `spawn_blocking`.

use curl::easy::Easy;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use url::Url;

use super::endpoint::Endpoint;

/// Status and full body of a completed GET.
#[derive(Debug)]
pub(crate) struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

#[derive(Debug)]
pub struct Session {
    endpoint: Endpoint,
    connect_timeout: Duration,
    timeout: Duration,
    idle: Mutex<Vec<Easy>>,
}

impl Session {
    pub fn new(endpoint: Endpoint, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            endpoint,
            connect_timeout,
            timeout,
            idle: Mutex::new(Vec::new()),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn checkout(&self) -> Easy {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(Easy::new)
    }

    fn checkin(&self, easy: Easy) {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(easy);
    }

    /// Blocking GET of `url`, buffering the whole body.
    /// A handle that failed mid-transfer is dropped instead of returned to the pool.
    pub(crate) fn get_blocking(&self, url: &Url) -> Result<Response, curl::Error> {
        let mut easy = self.checkout();
        let mut body = Vec::new();

        easy.get(true)?;
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        self.checkin(easy);
        Ok(Response { status, body })
    }
}
