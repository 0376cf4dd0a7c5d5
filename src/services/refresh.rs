//! Periodic re-evaluation loop.

use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::info;

/// Ticker whose first tick lands one `period` from now.
///
/// A round that overruns the period delays the schedule instead of
/// bursting the missed ticks back-to-back.
pub fn refresh_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Run `round` on every tick until `shutdown` completes.
///
/// `shutdown` is polled for the whole lifetime of the loop, so it also
/// cancels a round that is still in flight.
pub async fn run_until<S, F, Fut>(period: Duration, shutdown: S, mut round: F)
where
    S: Future<Output = ()>,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = refresh_ticker(period);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = round() => {}
                }
            }
        }
    }

    info!("Refresh loop received shutdown signal");
}
