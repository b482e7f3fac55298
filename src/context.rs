//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::status::Role;

/// How long a toast stays on screen.
const TOAST_TTL_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload records from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload records from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Active toast notifications - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Active toast notifications - write
    set_toasts: WriteSignal<Vec<Toast>>,
    /// Monotonic toast id
    toast_seq: StoredValue<u32>,
    /// Viewer role from the server-rendered shell
    pub role: Role,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>),
        role: Role,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: toasts.0,
            set_toasts: toasts.1,
            toast_seq: StoredValue::new(0),
            role,
        }
    }

    /// Trigger a reload of the page's records
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.toast_seq.with_value(|v| v + 1);
        self.toast_seq.set_value(id);
        self.set_toasts
            .update(|list| list.push(Toast { id, kind, message }));

        // Auto-dismiss after the TTL.
        let set_toasts = self.set_toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
            set_toasts.update(|list| list.retain(|t| t.id != id));
        });
    }
}
