//! Message-passing front end for a [`TrackingSession`].
//!
//! A single task owns the session and applies commands in arrival order, so
//! sensor callbacks on any thread only need a cloned [`TrackerHandle`].

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    clock::Clock,
    errors::TrackerError,
    models::{LiveStats, Position, RunSummary, SensorError},
    session::TrackingSession,
    sink::RunSink,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    Position(Position),
    Error(SensorError),
}

enum Command {
    Start,
    Event(SensorEvent),
    Snapshot(oneshot::Sender<Option<LiveStats>>),
    Stop(oneshot::Sender<Option<RunSummary>>),
}

#[derive(Debug, Clone)]
pub struct TrackerHandle {
    tx: mpsc::Sender<Command>,
}

/// Moves the session onto its own task. The task ends, returning the session,
/// once every handle is dropped.
pub fn spawn_tracker<S, C>(
    session: TrackingSession<S, C>,
    buffer: usize,
) -> (TrackerHandle, JoinHandle<TrackingSession<S, C>>)
where
    S: RunSink + 'static,
    C: Clock + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Command>(buffer.max(1));

    let task = tokio::spawn(async move {
        let mut session = session;
        while let Some(command) = rx.recv().await {
            match command {
                Command::Start => session.start(),
                Command::Event(SensorEvent::Position(position)) => {
                    let outcome = session.on_position(position);
                    debug!(?outcome, "Applied position event");
                }
                Command::Event(SensorEvent::Error(error)) => session.on_sensor_error(&error),
                Command::Snapshot(reply) => {
                    let _ = reply.send(session.snapshot());
                }
                Command::Stop(reply) => {
                    let _ = reply.send(session.stop());
                }
            }
        }
        session
    });

    (TrackerHandle { tx }, task)
}

impl TrackerHandle {
    async fn send(&self, command: Command) -> Result<(), TrackerError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| TrackerError::ChannelClosed)
    }

    pub async fn start(&self) -> Result<(), TrackerError> {
        self.send(Command::Start).await
    }

    pub async fn send_event(&self, event: SensorEvent) -> Result<(), TrackerError> {
        self.send(Command::Event(event)).await
    }

    pub async fn position(&self, position: Position) -> Result<(), TrackerError> {
        self.send_event(SensorEvent::Position(position)).await
    }

    pub async fn sensor_error(&self, error: SensorError) -> Result<(), TrackerError> {
        self.send_event(SensorEvent::Error(error)).await
    }

    /// Non-blocking variant for callbacks that cannot await.
    pub fn try_send_event(&self, event: SensorEvent) -> Result<(), TrackerError> {
        self.tx
            .try_send(Command::Event(event))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => TrackerError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => TrackerError::ChannelClosed,
            })
    }

    pub async fn snapshot(&self) -> Result<Option<LiveStats>, TrackerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| TrackerError::ChannelClosed)
    }

    /// Stops the run; `None` when no run was in progress.
    pub async fn stop(&self) -> Result<Option<RunSummary>, TrackerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Stop(reply)).await?;
        rx.await.map_err(|_| TrackerError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock, config::TrackerConfig, models::SensorErrorKind, sink::MemoryRunSink,
    };
    use time::{Duration, macros::datetime};

    #[tokio::test]
    async fn test_events_apply_in_order() {
        let start = datetime!(2024-06-01 07:00 UTC);
        let clock = ManualClock::new(start);
        let sink = MemoryRunSink::new();
        let session = TrackingSession::with_clock(TrackerConfig::default(), sink.clone(), clock.clone())
            .unwrap();
        let (handle, task) = spawn_tracker(session, 16);

        handle.start().await.unwrap();
        for i in 1..=6i64 {
            let timestamp = start + Duration::seconds(i * 2);
            // Clock is read by the task while applying the event; keep it at the
            // latest fix and wait for each one through a snapshot.
            clock.set(timestamp);
            handle
                .position(Position::new(40.0 + i as f64 * 1e-4, -105.27, 5.0, 3.0, timestamp))
                .await
                .unwrap();
            handle.snapshot().await.unwrap();
        }
        handle
            .sensor_error(SensorError::new(SensorErrorKind::PositionUnavailable, "tunnel"))
            .await
            .unwrap();

        let stats = handle.snapshot().await.unwrap().unwrap();
        assert_eq!(stats.chosen_samples, 6);
        assert!(stats.distance_meters > 0.0);

        let summary = handle.stop().await.unwrap().unwrap();
        assert_eq!(summary.samples.len(), 2);
        assert_eq!(summary.duration_seconds, 12);
        assert!(handle.stop().await.unwrap().is_none());
        assert_eq!(sink.len(), 1);

        drop(handle);
        let session = task.await.unwrap();
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn test_events_before_start_are_ignored() {
        let session = TrackingSession::new(TrackerConfig::default(), MemoryRunSink::new()).unwrap();
        let (handle, _task) = spawn_tracker(session, 4);

        handle
            .try_send_event(SensorEvent::Position(Position::new(
                40.0,
                -105.0,
                5.0,
                3.0,
                time::OffsetDateTime::now_utc(),
            )))
            .unwrap();
        assert!(handle.snapshot().await.unwrap().is_none());
        assert!(handle.stop().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_full_queue_reports_backpressure() {
        let session = TrackingSession::new(TrackerConfig::default(), MemoryRunSink::new()).unwrap();
        let (handle, _task) = spawn_tracker(session, 1);
        let event = SensorEvent::Error(SensorError::new(SensorErrorKind::Other, "noise"));

        // Single-threaded test runtime: the task cannot drain between sends.
        handle.try_send_event(event.clone()).unwrap();
        assert!(matches!(
            handle.try_send_event(event),
            Err(TrackerError::QueueFull)
        ));

        // Draining frees the slot again.
        assert!(handle.snapshot().await.unwrap().is_none());
    }
}
