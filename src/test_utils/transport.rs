use std::{collections::VecDeque, sync::Mutex};

use crate::transport::{ApiResponse, PostRequest, Transport, TransportError};

/// Records requests and answers them with canned responses, in order.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    requests: Mutex<Vec<PostRequest>>,
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
}

impl FakeTransport {
    pub(crate) fn responding(responses: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            requests: Mutex::default(),
            responses: Mutex::new(responses.into()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<PostRequest> {
        self.requests
            .lock()
            .expect("Could not lock requests")
            .clone()
    }
}

impl Transport for FakeTransport {
    async fn post(&self, request: PostRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("Could not lock requests")
            .push(request.clone());

        self.responses
            .lock()
            .expect("Could not lock responses")
            .pop_front()
            .unwrap_or_else(|| {
                panic!("No response queued for POST {}", request.url);
            })
    }
}
