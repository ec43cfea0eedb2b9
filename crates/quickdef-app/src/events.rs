use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use quickdef_core::{DictionaryProvider, Explainer, LookupService, SettingsStore};
use quickdef_types::{AppEvent, Request};
use tokio::task::JoinSet;

/// Backend loop: every request is answered on its own task, so a slow
/// word never holds up the next one. Ends on `InputClosed` once all
/// in-flight requests have replied, and forwards `InputClosed` downstream.
pub async fn event_loop<D, E, S>(
    service: Arc<LookupService<D, E, S>>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    D: DictionaryProvider + 'static,
    E: Explainer + 'static,
    S: SettingsStore + 'static,
{
    let mut in_flight = JoinSet::new();

    tracing::debug!("event loop started");
    loop {
        let event = match input_rx.recv().await {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("input channel closed: {e}");
                break;
            }
        };

        match event {
            AppEvent::Request(request) => {
                in_flight.spawn(handle_request(
                    service.clone(),
                    request,
                    output_tx.clone(),
                ));
            }
            AppEvent::NetworkChanged { online } => {
                tracing::info!(online, "network status changed");
                service.set_online(online);
            }
            AppEvent::InputClosed => break,
            AppEvent::Response { .. } => {
                // Responses only flow towards the UI
            }
        }

        while let Some(finished) = in_flight.try_join_next() {
            log_task_result(finished);
        }
    }

    while let Some(finished) = in_flight.join_next().await {
        log_task_result(finished);
    }

    output_tx.send(AppEvent::InputClosed).await?;
    Ok(())
}

async fn handle_request<D, E, S>(
    service: Arc<LookupService<D, E, S>>,
    request: Request,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    D: DictionaryProvider,
    E: Explainer,
    S: SettingsStore,
{
    let word = request.word.clone();
    tracing::debug!(%word, action = ?request.action, "handling request");

    let response = service.handle(request).await;
    output_tx.send(AppEvent::Response { word, response }).await?;
    Ok(())
}

fn log_task_result(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("request handler failed: {e}"),
        Err(e) => tracing::error!("request handler panicked: {e}"),
    }
}
