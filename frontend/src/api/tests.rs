//! 401 refresh-重试策略的序列测试

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{ApiError, Attempt, RetryTransport, with_auth_retry};

fn unauthorized() -> ApiError {
    ApiError::Http {
        status: 401,
        detail: Some("token_not_valid".into()),
    }
}

/// 按脚本吐结果的传输面，记录每一步
struct Scripted {
    outcomes: RefCell<VecDeque<Attempt<&'static str>>>,
    refresh_ok: bool,
    attempts: Cell<u32>,
    refreshes: Cell<u32>,
    session_cleared: Cell<bool>,
}

impl Scripted {
    fn new(outcomes: Vec<Attempt<&'static str>>, refresh_ok: bool) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            refresh_ok,
            attempts: Cell::new(0),
            refreshes: Cell::new(0),
            session_cleared: Cell::new(false),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl RetryTransport<&'static str> for Scripted {
    async fn attempt(&self) -> Attempt<&'static str> {
        self.attempts.set(self.attempts.get() + 1);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Attempt::Failed(ApiError::Network("guion agotado".into())))
    }

    async fn refresh(&self) -> bool {
        self.refreshes.set(self.refreshes.get() + 1);
        self.refresh_ok
    }

    fn session_lost(&self) {
        self.session_cleared.set(true);
    }
}

#[tokio::test]
async fn expired_token_is_refreshed_and_retried_once() {
    let wire = Scripted::new(
        vec![
            Attempt::Unauthorized(unauthorized()),
            Attempt::Success("perfil"),
        ],
        true,
    );

    let result = with_auth_retry(true, &wire).await;

    assert_eq!(result, Ok("perfil"));
    assert_eq!(wire.attempts.get(), 2);
    assert_eq!(wire.refreshes.get(), 1);
    assert!(!wire.session_cleared.get());
}

#[tokio::test]
async fn failed_refresh_clears_session_and_surfaces_the_401() {
    let wire = Scripted::new(vec![Attempt::Unauthorized(unauthorized())], false);

    let result = with_auth_retry(true, &wire).await;

    assert_eq!(result, Err(unauthorized()));
    assert_eq!(wire.attempts.get(), 1);
    assert_eq!(wire.refreshes.get(), 1);
    assert!(wire.session_cleared.get());
}

#[tokio::test]
async fn second_401_does_not_trigger_a_second_refresh() {
    let wire = Scripted::new(
        vec![
            Attempt::Unauthorized(unauthorized()),
            Attempt::Unauthorized(unauthorized()),
        ],
        true,
    );

    let result = with_auth_retry(true, &wire).await;

    assert_eq!(result, Err(unauthorized()));
    assert_eq!(wire.attempts.get(), 2);
    assert_eq!(wire.refreshes.get(), 1);
    assert!(!wire.session_cleared.get());
}

#[tokio::test]
async fn public_endpoint_401_skips_refresh() {
    let wire = Scripted::new(vec![Attempt::Unauthorized(unauthorized())], true);

    let result = with_auth_retry(false, &wire).await;

    assert_eq!(result, Err(unauthorized()));
    assert_eq!(wire.refreshes.get(), 0);
    assert!(!wire.session_cleared.get());
}

#[tokio::test]
async fn non_401_failures_pass_through_untouched() {
    let server_error = ApiError::Http {
        status: 500,
        detail: None,
    };
    let wire = Scripted::new(vec![Attempt::Failed(server_error.clone())], true);

    let result = with_auth_retry(true, &wire).await;

    assert_eq!(result, Err(server_error));
    assert_eq!(wire.attempts.get(), 1);
    assert_eq!(wire.refreshes.get(), 0);
}
