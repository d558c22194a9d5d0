use std::sync::Arc;

use service::{email::EmailDispatcher, intake::IntakeClient};

/// Read-only state for the email proxy; cloned per request.
#[derive(Clone)]
pub struct EmailState {
    pub dispatcher: Arc<EmailDispatcher>,
}

impl EmailState {
    pub fn new(dispatcher: EmailDispatcher) -> Self {
        Self { dispatcher: Arc::new(dispatcher) }
    }
}

#[derive(Clone)]
pub struct LookupState {
    pub intake: Arc<IntakeClient>,
}

impl LookupState {
    pub fn new(intake: IntakeClient) -> Self {
        Self { intake: Arc::new(intake) }
    }
}
