//! In-memory fakes shared by host tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::net::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::util::navigation::Navigator;
use crate::util::timer::Timer;

/// Timer that completes immediately and records every sleep that actually
/// ran to completion. A sleep that loses a `select` race is dropped unpolled
/// and therefore not recorded.
#[derive(Clone, Default)]
pub struct RecordingTimer {
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

impl Timer for RecordingTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let slept = Rc::clone(&self.slept);
        Box::pin(async move {
            slept.borrow_mut().push(duration);
        })
    }
}

pub enum Scripted {
    Respond(u16, String),
    Fail(TransportError),
    /// Never settles; only a timeout can end the request.
    Hang,
}

/// Transport answering from a queue. An exhausted queue answers `200 {}`.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<VecDeque<Scripted>>>,
    pub sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Respond(status, body.to_string()));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Fail(err));
        self
    }

    pub fn hang(&self) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Hang);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        self.sent.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Respond(status, body)) => Box::pin(async move { Ok(HttpResponse { status, body }) }),
            Some(Scripted::Fail(err)) => Box::pin(async move { Err(err) }),
            Some(Scripted::Hang) => Box::pin(futures::future::pending()),
            None => Box::pin(async { Ok(HttpResponse { status: 200, body: "{}".to_owned() }) }),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    pub visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_owned());
    }
}
