use std::{future::Future, io::Write, pin::pin, task::Poll, time::Duration};

use anyhow::{Context as _, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use tokio::time::sleep;
use tracing::info;

use crate::{metrics::MetricSample, session::Session, weather::WeatherSource};

/// Sends one status packet per `tick` until `shutdown` resolves, then writes
/// the terminator and hands back the transport.
///
/// `shutdown` is polled once before the first tick so that signal listeners
/// are registered from the start. A shutdown that arrives mid-tick is
/// observed once that tick has been sent.
pub async fn run_loop<W, S, F>(
    mut session: Session<W>,
    source: &S,
    location: &str,
    tick: Duration,
    mut clock: impl FnMut() -> DateTime<Tz>,
    mut sample_metrics: impl FnMut() -> MetricSample,
    shutdown: F,
) -> Result<W>
where
    W: Write,
    S: WeatherSource,
    F: Future<Output = Result<()>>,
{
    let mut shutdown = pin!(shutdown);

    let mut stop_requested = None;
    std::future::poll_fn(|cx| {
        if let Poll::Ready(result) = shutdown.as_mut().poll(cx) {
            stop_requested = Some(result);
        }
        Poll::Ready(())
    })
    .await;

    loop {
        session
            .tick(clock(), source, location, sample_metrics())
            .await?;

        if let Some(result) = stop_requested.take() {
            result.context("failed to listen for shutdown")?;
            break;
        }

        tokio::select! {
            biased;
            result = shutdown.as_mut() => {
                result.context("failed to listen for shutdown")?;
                break;
            }
            _ = sleep(tick) => {}
        }
    }

    let transport = session.close().context("failed to signal shutdown")?;
    info!("script ended");

    Ok(transport)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, future};

    use anyhow::anyhow;
    use chrono::{TimeDelta, TimeZone as _};
    use chrono_tz::America::Edmonton;
    use tokio::sync::oneshot;

    use super::*;
    use crate::weather::{DEFAULT_REFRESH_INTERVAL, Observation};

    const LOCATION: &str = "Edmonton, Canada";
    const LONG_TICK: Duration = Duration::from_secs(3600);

    /// Answers with clear sky and fires `on_fetch` during the first request.
    struct InterruptingSource {
        on_fetch: RefCell<Option<oneshot::Sender<()>>>,
    }

    impl WeatherSource for InterruptingSource {
        async fn fetch(&self, _location: &str) -> Result<Observation> {
            if let Some(tx) = self.on_fetch.borrow_mut().take() {
                let _ = tx.send(());
            }
            Ok(Observation {
                temperature_celsius: 21.6,
                description: "clear sky".to_string(),
            })
        }
    }

    fn start() -> DateTime<Tz> {
        Edmonton.with_ymd_and_hms(2025, 3, 5, 14, 5, 0).unwrap()
    }

    fn metrics() -> MetricSample {
        MetricSample {
            cpu_percent: 55,
            memory_percent: 70,
        }
    }

    #[tokio::test]
    async fn interrupt_during_tick_finishes_tick_then_terminates() {
        let (tx, rx) = oneshot::channel();
        let source = InterruptingSource {
            on_fetch: RefCell::new(Some(tx)),
        };
        let session = Session::new(Vec::<u8>::new(), start(), DEFAULT_REFRESH_INTERVAL);

        let written = run_loop(
            session,
            &source,
            LOCATION,
            LONG_TICK,
            start,
            metrics,
            async { rx.await.map_err(|e| anyhow!(e)) },
        )
        .await
        .unwrap();

        assert_eq!(written, b"14053035 22J 55 70!*");
    }

    #[tokio::test]
    async fn interrupt_before_first_tick_still_sends_one_packet() {
        let source = InterruptingSource {
            on_fetch: RefCell::new(None),
        };
        let session = Session::new(Vec::<u8>::new(), start(), DEFAULT_REFRESH_INTERVAL);

        let written = run_loop(
            session,
            &source,
            LOCATION,
            LONG_TICK,
            start,
            metrics,
            future::ready(Ok(())),
        )
        .await
        .unwrap();

        assert_eq!(written, b"14053035 22J 55 70!*");
    }

    #[tokio::test]
    async fn keeps_ticking_until_interrupted() {
        let (tx, rx) = oneshot::channel::<()>();
        let source = InterruptingSource {
            on_fetch: RefCell::new(None),
        };
        let session = Session::new(Vec::<u8>::new(), start(), DEFAULT_REFRESH_INTERVAL);

        let mut ticks = 0;
        let mut tx = Some(tx);
        let clock = || {
            let now = start() + TimeDelta::seconds(10 * ticks);
            ticks += 1;
            if ticks == 3
                && let Some(tx) = tx.take()
            {
                let _ = tx.send(());
            }
            now
        };

        let written = run_loop(
            session,
            &source,
            LOCATION,
            Duration::from_millis(1),
            clock,
            metrics,
            async { rx.await.map_err(|e| anyhow!(e)) },
        )
        .await
        .unwrap();

        let packets = String::from_utf8(written).unwrap();
        assert_eq!(packets, "14053035 22J 55 70!".repeat(3) + "*");
    }

    #[tokio::test]
    async fn failing_shutdown_listener_is_an_error() {
        let source = InterruptingSource {
            on_fetch: RefCell::new(None),
        };
        let session = Session::new(Vec::<u8>::new(), start(), DEFAULT_REFRESH_INTERVAL);

        let result = run_loop(
            session,
            &source,
            LOCATION,
            LONG_TICK,
            start,
            metrics,
            future::ready(Err(anyhow!("no signal handler"))),
        )
        .await;

        assert!(result.is_err());
    }
}
