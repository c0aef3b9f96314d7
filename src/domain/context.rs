//! Per-call request metadata

use serde::{Deserialize, Serialize};

/// Identity of the authenticated caller, installed by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
    pub username: Option<String>,
    pub dept_id: Option<String>,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: None,
            dept_id: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_dept(mut self, dept_id: impl Into<String>) -> Self {
        self.dept_id = Some(dept_id.into());
        self
    }
}

/// Metadata of the inbound HTTP request a call runs on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub caller: Option<CallerIdentity>,
    pub host: String,
    pub client_ip: Option<String>,
    pub method: String,
    pub path: String,
}

impl RequestMeta {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            caller: None,
            host: String::new(),
            client_ip: None,
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn with_caller(mut self, caller: CallerIdentity) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.caller.as_ref().map(|c| c.user_id.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.caller.as_ref().and_then(|c| c.username.as_deref())
    }

    pub fn dept_id(&self) -> Option<&str> {
        self.caller.as_ref().and_then(|c| c.dept_id.as_deref())
    }
}

/// Context threaded through repository and cache calls
///
/// Calls made outside of an inbound request (background jobs, startup) use
/// [`CallContext::background`] and carry no request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    request: Option<RequestMeta>,
}

impl CallContext {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn for_request(meta: RequestMeta) -> Self {
        Self {
            request: Some(meta),
        }
    }

    pub fn request(&self) -> Option<&RequestMeta> {
        self.request.as_ref()
    }
}
