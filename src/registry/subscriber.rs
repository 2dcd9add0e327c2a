use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::ChangedFlags;
use crate::Engine;

/// Opaque data handed back to a subscriber on every notification
pub type UserData = Arc<dyn Any + Send + Sync>;

pub type StateChangeCallback = Box<dyn Fn(ChangedFlags, &dyn Engine, Option<&UserData>) + Send + Sync>;

/// A state-change subscription record.
///
/// The caller owns the record (inside an `Arc`) and keeps it alive for as
/// long as it is registered. Its identity is its storage address; the
/// registry only holds a non-owning link to it.
///
/// A record built with [`Default`] has no callback and is rejected by
/// registration.
#[derive(Default)]
pub struct StateChangeSubscriber {
    callback: Option<StateChangeCallback>,
    user_data: Option<UserData>,
}

impl StateChangeSubscriber {
    pub fn new<F>(callback: F) -> Self
    where F: Fn(ChangedFlags, &dyn Engine, Option<&UserData>) + Send + Sync + 'static {
        Self {
            callback: Some(Box::new(callback)),
            user_data: None,
        }
    }

    pub fn with_user_data(
        mut self,
        user_data: UserData,
    ) -> Self {
        self.user_data = Some(user_data);
        self
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn notify(
        &self,
        flags: ChangedFlags,
        engine: &dyn Engine,
    ) {
        if let Some(callback) = &self.callback {
            callback(flags, engine, self.user_data.as_ref());
        }
    }
}

impl fmt::Debug for StateChangeSubscriber {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("StateChangeSubscriber")
            .field("addr", &(self as *const Self))
            .field("has_callback", &self.callback.is_some())
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}
