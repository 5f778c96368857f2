use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use blpframe_core::{BlpError, Event, Request, Session, SessionFactory};

use crate::requested_securities;

/// Instruction for how a session answers a request.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Queue these events; they are returned by `next_event` in order.
    Events(Vec<Event>),
    /// Fail `send_request` with the provided error.
    Fail(BlpError),
    /// Accept the request but never deliver anything (polls time out).
    Silent,
    /// Hang `send_request` indefinitely (simulate a transport stall).
    Hang,
    /// Panic inside `send_request`.
    Panic(String),
}

#[derive(Default)]
struct InternalState {
    start_fails: bool,
    service_unavailable: bool,
    service_stalls: bool,
    rules: HashMap<String, MockBehavior>,
    default_rule: Option<MockBehavior>,
    starts: usize,
    stops: usize,
    services_opened: Vec<String>,
    requests: Vec<Request>,
}

/// Controller handle used by tests to drive dynamic mock sessions from the outside.
///
/// Every session created by the paired factory shares this state, so
/// behaviors and call logs span all sessions of a fan-out.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    created: Arc<AtomicUsize>,
}

impl DynamicMockController {
    /// Make every subsequent `start` fail.
    pub async fn fail_start(&self, fail: bool) {
        self.state.lock().await.start_fails = fail;
    }

    /// Make every subsequent `open_service` fail.
    pub async fn fail_service(&self, fail: bool) {
        self.state.lock().await.service_unavailable = fail;
    }

    /// Make every subsequent `open_service` wait forever.
    pub async fn stall_service(&self, stall: bool) {
        self.state.lock().await.service_stalls = stall;
    }

    /// Set the behavior for requests naming `security` (first ticker of the request).
    pub async fn set_behavior(&self, security: &str, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(security.to_string(), behavior);
    }

    /// Set the behavior for requests without a security-specific rule.
    pub async fn set_default_behavior(&self, behavior: MockBehavior) {
        self.state.lock().await.default_rule = Some(behavior);
    }

    /// Number of sessions created by the factory.
    #[must_use]
    pub fn sessions_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of `start` calls across all sessions.
    pub async fn starts(&self) -> usize {
        self.state.lock().await.starts
    }

    /// Number of `stop` calls across all sessions.
    pub async fn stops(&self) -> usize {
        self.state.lock().await.stops
    }

    /// Service names passed to `open_service`, in call order.
    pub async fn services_opened(&self) -> Vec<String> {
        self.state.lock().await.services_opened.clone()
    }

    /// Requests passed to `send_request`, in call order.
    pub async fn requests(&self) -> Vec<Request> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
        self.created.store(0, Ordering::SeqCst);
    }
}

/// A session that defers all behavior to a [`DynamicMockController`].
pub struct DynamicMockSession {
    state: Arc<Mutex<InternalState>>,
    queue: VecDeque<Event>,
}

impl DynamicMockSession {
    /// Create a session factory and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn SessionFactory>, DynamicMockController) {
        let controller = DynamicMockController {
            state: Arc::new(Mutex::new(InternalState::default())),
            created: Arc::new(AtomicUsize::new(0)),
        };
        let factory = DynamicMockFactory {
            controller: controller.clone(),
        };
        (Arc::new(factory) as Arc<dyn SessionFactory>, controller)
    }
}

struct DynamicMockFactory {
    controller: DynamicMockController,
}

impl SessionFactory for DynamicMockFactory {
    fn create(&self) -> Result<Box<dyn Session>, BlpError> {
        self.controller.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(DynamicMockSession {
            state: Arc::clone(&self.controller.state),
            queue: VecDeque::new(),
        }))
    }
}

#[async_trait]
impl Session for DynamicMockSession {
    async fn start(&mut self) -> bool {
        let mut guard = self.state.lock().await;
        guard.starts += 1;
        !guard.start_fails
    }

    async fn stop(&mut self) {
        self.queue.clear();
        self.state.lock().await.stops += 1;
    }

    async fn open_service(&mut self, name: &str) -> bool {
        let (available, stalls) = {
            let mut guard = self.state.lock().await;
            guard.services_opened.push(name.to_string());
            (!guard.service_unavailable, guard.service_stalls)
        };
        if stalls {
            std::future::pending::<()>().await;
        }
        available
    }

    async fn send_request(&mut self, request: Request) -> Result<(), BlpError> {
        let key = requested_securities(&request).into_iter().next();
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(request);
            key.and_then(|k| guard.rules.get(&k).cloned())
                .or_else(|| guard.default_rule.clone())
                .unwrap_or(MockBehavior::Silent)
        };
        match behavior {
            MockBehavior::Events(events) => {
                self.queue.extend(events);
                Ok(())
            }
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Silent => Ok(()),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Panic(msg) => panic!("{msg}"),
        }
    }

    async fn next_event(&mut self, timeout: Duration) -> Event {
        match self.queue.pop_front() {
            Some(ev) => ev,
            None => {
                tokio::time::sleep(timeout).await;
                Event::timeout()
            }
        }
    }
}
