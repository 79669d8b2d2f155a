/// Lifecycle of one kind of async request.
///
/// `Idle -> Pending -> {Fulfilled, Rejected}`. Dispatching again while
/// pending simply stays pending; nothing is deduplicated or cancelled, so the
/// last settlement to arrive decides the final state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn begin(&mut self) {
        *self = RequestState::Pending;
    }

    pub(crate) fn fulfil(&mut self) {
        *self = RequestState::Fulfilled;
    }

    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        *self = RequestState::Rejected(message.into());
    }
}
