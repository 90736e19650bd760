//! Async driver for the behavior runtime.
//!
//! The runtime is synchronous and run-to-completion; this loop is the one
//! place where its inputs are arbitrated: downstream commands from the
//! channel, page events from the embedding layer, outgoing commands flowing
//! back to the channel, and the tick that advances the timer clock. Events
//! of one source are handled in arrival order; no ordering is guaranteed
//! across sources.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::channel::{OutgoingCommand, Transport};
use crate::error::ParlorResult;
use crate::events::PageEvent;
use crate::runtime::Runtime;

/// Granularity of the virtual clock while driven live. Fine enough that a
/// 100ms settle delay lands within one frame of its nominal time.
const TICK: Duration = Duration::from_millis(25);

/// Drives `runtime` until the page-event stream closes or the channel is
/// gone for good.
pub async fn run<T: Transport>(
    mut runtime: Runtime,
    mut outgoing: mpsc::UnboundedReceiver<OutgoingCommand>,
    mut transport: T,
    mut events: mpsc::UnboundedReceiver<PageEvent>,
) -> ParlorResult<()> {
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => runtime.dispatch(event),
                    None => {
                        info!("page event stream closed, stopping driver");
                        break;
                    }
                }
            }
            incoming = transport.recv() => {
                match incoming {
                    Some(command) => runtime.deliver(command),
                    None => {
                        info!("command channel closed, stopping driver");
                        break;
                    }
                }
            }
            command = outgoing.recv() => {
                if let Some(command) = command {
                    if let Err(e) = transport.send(command).await {
                        // transport health is the channel's concern
                        warn!("failed to forward command upstream: {}", e);
                    }
                }
            }
            _ = tick.tick() => runtime.advance(TICK),
        }
    }

    Ok(())
}
