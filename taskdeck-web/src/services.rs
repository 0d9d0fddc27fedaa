use std::rc::Rc;

use chrono::Duration;
use shared::{api::TaskDeckClient, auth::AuthContext, session::SessionStore};
use yew::{hook, use_context};

use crate::{config::WebConfig, storage::BrowserStore};

struct Inner {
    auth: AuthContext<BrowserStore>,
    client: TaskDeckClient,
    config: WebConfig,
}

/// Auth context, HTTP client and settings handed down the component tree.
#[derive(Clone)]
pub struct Services {
    inner: Rc<Inner>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Services {
    /// Build an unhydrated auth context and a client that follows it.
    pub fn new(config: WebConfig) -> Self {
        let ttl = Duration::hours(config.session_ttl_hours);
        let auth = AuthContext::with_ttl(SessionStore::new(BrowserStore), ttl);
        let client = TaskDeckClient::new(&config.resolved_api_url());
        client.follow(&auth);
        Self {
            inner: Rc::new(Inner {
                auth,
                client,
                config,
            }),
        }
    }

    pub fn auth(&self) -> &AuthContext<BrowserStore> {
        &self.inner.auth
    }

    pub fn client(&self) -> &TaskDeckClient {
        &self.inner.client
    }

    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }
}

/// Services provided by the root component.
#[hook]
pub fn use_services() -> Services {
    use_context::<Services>().expect("components are rendered inside the app root")
}
