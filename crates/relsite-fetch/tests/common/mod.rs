#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use relsite_fetch::{HttpClient, HttpResponse};

#[derive(Debug)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

/// Hands out queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<HttpResponse, MockError>>>,
    requests:  Mutex<Vec<(String, Vec<(String, String)>)>>,
    delay:     Option<Duration>,
}

impl ScriptedClient {
    pub fn new() -> Self { Self::default() }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(MockError(message.to_string())));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_header(&self, index: usize, name: &str) -> Option<String> {
        self.requests()
            .get(index)?
            .1
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}

impl HttpClient for ScriptedClient {
    type Error = MockError;

    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, MockError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(MockError("no scripted response".to_string())))
    }
}

pub const RELEASE_URL: &str = "https://api.example.com/repos/dshearer/jobber/releases/latest";

pub fn release_json(name: &str, draft: bool) -> String {
    format!(
        r#"{{
            "name": "{name}",
            "html_url": "https://github.com/dshearer/jobber/releases/tag/{name}",
            "body": "notes for {name}",
            "published_at": "2019-05-20T04:50:31Z",
            "tarball_url": "https://api.github.com/repos/dshearer/jobber/tarball/{name}",
            "zipball_url": "https://api.github.com/repos/dshearer/jobber/zipball/{name}",
            "draft": {draft},
            "prerelease": false,
            "assets": [
                {{
                    "name": "jobber-{name}-1.el7.x86_64.rpm",
                    "browser_download_url": "https://example.com/{name}.rpm",
                    "size": 3912495,
                    "state": "uploaded"
                }},
                {{
                    "name": "jobber-{name}.pkg",
                    "browser_download_url": "https://example.com/{name}.pkg",
                    "size": 1048576,
                    "state": "uploaded"
                }}
            ]
        }}"#
    )
}

pub fn ok_release(name: &str, etag: Option<&str>) -> HttpResponse {
    let response = HttpResponse::new(200).with_body(release_json(name, false));
    match etag {
        Some(etag) => response.with_header("ETag", etag),
        None => response,
    }
}
