//! Wiremock stand-in for the GitHub search and Bedrock runtime APIs.
//!
//! daigest talks to both services through blocking `reqwest` clients, so the
//! scenario steps stay synchronous. [`MockApi`] owns the Tokio runtime that
//! drives the mock server and is started lazily by the first step that needs
//! it, which lets GitHub and model mocks share one base URL.

use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Mock server plus the runtime it is mounted on. Clones share both.
#[derive(Clone)]
pub struct MockApi(Rc<Running>);

struct Running {
    server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    /// Starts a fresh mock server on a new runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the Tokio runtime cannot be created.
    pub fn start() -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self(Rc::new(Running { server, runtime })))
    }

    /// Base URL used for both `github_api_url` and the Bedrock endpoint.
    pub fn uri(&self) -> String {
        self.0.server.uri()
    }

    /// Registers every mock, in order, on the server.
    pub fn mount(&self, mocks: Vec<Mock>) {
        for mock in mocks {
            self.0.runtime.block_on(mock.mount(&self.0.server));
        }
    }
}

/// Returns the scenario's mock API, starting it on first use.
///
/// # Errors
///
/// Returns an error when the mock API cannot be started.
pub fn started_api(slot: &Slot<MockApi>) -> io::Result<MockApi> {
    if let Some(api) = slot.get() {
        return Ok(api);
    }
    let api = MockApi::start()?;
    slot.set(api.clone());
    Ok(api)
}
