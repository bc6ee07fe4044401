use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use showcase::majors::TitleMatcher;
use showcase::remote::Gateway;
use showcase::resolver::{MemoryTermStore, ResolveEra, ResolverConfig};

use super::config::Config;

/// One client's resolution state: its stored term preference and the
/// generation counter that lets its newer navigations supersede its own
/// older in-flight walks. Never shared between clients.
#[derive(Default)]
pub struct Session {
    pub store: MemoryTermStore,
    pub era: ResolveEra,
}

/// Sessions keyed by the client-chosen identity from the `session` query
/// parameter. A request without one gets a fresh session: no preference
/// to share, and a guard nothing else can supersede.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn session(&self, id: Option<&str>) -> Arc<Session> {
        match id {
            Some(id) => self
                .sessions
                .lock()
                .expect("session registry poisoned")
                .entry(id.to_string())
                .or_default()
                .clone(),
            None => Arc::new(Session::default()),
        }
    }
}

pub struct AppState {
    pub config: Config,
    pub gateway: Gateway,
    pub matcher: TitleMatcher,
    pub sessions: SessionRegistry,
    pub resolver: ResolverConfig,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Arc<Self> {
        let resolver = ResolverConfig {
            walk_limit: 8,
            check_timeout: Duration::from_millis(config.check_timeout_ms),
        };

        let gateway = Gateway::new(config.gateway_url.clone(), resolver.check_timeout)
            .expect("Gateway client misconfigured!");

        Arc::new(Self {
            config,
            gateway,
            matcher: TitleMatcher::new(),
            sessions: SessionRegistry::default(),
            resolver,
        })
    }
}
