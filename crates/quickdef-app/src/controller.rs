use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use quickdef_types::AppEvent;
use tokio::io::AsyncBufRead;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            input_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
    json: bool,
}

impl AppController {
    pub fn new(state: Arc<AppState>, json: bool) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
            json,
        }
    }

    pub fn spawn_tasks<R>(&self, reader: R) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.service.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone(), self.json));

        tasks.spawn(watcher_io(
            reader,
            self.cancel_token.child_token(),
            self.channels.input_to_app.0.clone(),
        ));

        tasks
    }

    /// Stop reading input; in-flight lookups still finish and print
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
