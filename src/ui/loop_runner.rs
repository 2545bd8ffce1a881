//! Event loop driving [`App`] outside of tests.

use crate::app::{App, AppEvent};
use anyhow::{bail, Result};
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;

/// Process events until nothing is loading.
///
/// Used for one-shot runs: mount or submit a search, then wait for its
/// results before rendering.
pub async fn run_until_idle(app: &mut App, event_rx: &mut mpsc::Receiver<AppEvent>) -> Result<()> {
    while !app.is_idle() {
        match event_rx.recv().await {
            Some(event) => handle_app_event(app, event),
            None => bail!("event channel closed while loading"),
        }
    }
    Ok(())
}

/// Runs the feed until SIGINT or SIGTERM.
///
/// Uses `tokio::select!` to multiplex shutdown signals with events from
/// background tasks and the refresh timer. `on_update` is called each time
/// the app settles after a batch of loads, including the first one.
///
/// Mounts the app if needed and unmounts it before returning.
pub async fn run<F>(
    app: &mut App,
    mut event_rx: mpsc::Receiver<AppEvent>,
    mut on_update: F,
) -> Result<()>
where
    F: FnMut(&App) -> Result<()>,
{
    app.mount();

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut was_idle = app.is_idle();

    loop {
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = async {
            let _ = tokio::signal::ctrl_c().await;
            Some(())
        };

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_rx.recv() => {
                let Some(event) = maybe_event else {
                    tracing::debug!("Event channel closed");
                    break;
                };
                handle_app_event(app, event);

                // Drain anything already queued before reporting.
                while let Ok(event) = event_rx.try_recv() {
                    handle_app_event(app, event);
                }
            }
        }

        let idle = app.is_idle();
        if idle && !was_idle {
            on_update(app)?;
        }
        was_idle = idle;
    }

    app.unmount();
    Ok(())
}
