//! Runtime driver
//!
//! Drives an [`EventBus`] from a tokio current-thread runtime: host events
//! arrive on an mpsc channel, and the loop sleeps until the next timer
//! deadline in between. Components are `!Send`, so run this on a
//! current-thread runtime or inside a `LocalSet`.

use std::future::Future;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::bus::EventBus;
use super::messages::UiEvent;

/// Counters reported when the driver stops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Host events dispatched
    pub events: usize,
    /// Wake-ups caused by timer deadlines
    pub timer_wakeups: usize,
}

/// Run the bus until the event channel closes or `shutdown` resolves
///
/// The bus's logical clock is kept in step with tokio time, measured from
/// the moment the driver starts.
pub async fn run<F>(
    bus: &mut EventBus,
    mut events: mpsc::UnboundedReceiver<UiEvent>,
    shutdown: F,
) -> DriverStats
where
    F: Future<Output = ()>,
{
    let origin = Instant::now() - bus.now();
    let mut stats = DriverStats::default();
    tokio::pin!(shutdown);

    tracing::debug!("Event driver started");

    loop {
        let deadline = bus.next_deadline().map(|offset| origin + offset);
        let sleep = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::debug!("Event driver shutdown requested");
                break;
            }

            received = events.recv() => {
                let Some(event) = received else {
                    tracing::debug!("Event channel closed");
                    break;
                };
                bus.advance_to(Instant::now() - origin);
                bus.publish(event);
                stats.events += 1;
            }

            _ = sleep, if deadline.is_some() => {
                bus.advance_to(Instant::now() - origin);
                stats.timer_wakeups += 1;
            }
        }
    }

    bus.advance_to(Instant::now() - origin);
    tracing::debug!(
        events = stats.events,
        timer_wakeups = stats.timer_wakeups,
        "Event driver stopped"
    );
    stats
}
