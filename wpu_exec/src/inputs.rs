//! # Input queue
//!
//! Every external input stream (pose, velocity, route and stop signal) is
//! delivered as an [`InputEvent`] through a single channel. Producers may live
//! on any thread and hold a cloned [`InputSender`]. The exec drains the queue
//! once at the start of each cycle, so the inputs seen by a cycle do not
//! change while it runs.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, SendError, Sender};
use thiserror::Error;

// Internal
use crate::{loc::Pose, route::Waypoint};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Receiving end of the input channel, owned by the exec.
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

/// Sending end of the input channel, one per producer.
#[derive(Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single message from one of the input streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Latest vehicle pose.
    Pose(Pose),

    /// Latest forward speed in meters/second.
    Velocity(f64),

    /// A new snapshot of the full route.
    Route(Vec<Waypoint>),

    /// Stop request as sent on the wire, the route index to stop at or -1
    /// for no stop.
    StopSignal(i64),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("The input queue has been closed")]
    QueueClosed,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self { sender, receiver }
    }

    /// Get a new sender for a producer.
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Take every event queued so far, in arrival order.
    ///
    /// Never blocks. Events sent while draining are left for the next call.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> Result<(), InputError> {
        self.sender
            .send(event)
            .map_err(|_: SendError<InputEvent>| InputError::QueueClosed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn test_drain_in_order() {
        let queue = InputQueue::new();
        let tx = queue.sender();

        assert!(queue.drain().is_empty());

        tx.send(InputEvent::Velocity(1.0)).unwrap();
        tx.send(InputEvent::StopSignal(3)).unwrap();
        tx.send(InputEvent::Velocity(2.0)).unwrap();

        assert_eq!(
            queue.drain(),
            vec![
                InputEvent::Velocity(1.0),
                InputEvent::StopSignal(3),
                InputEvent::Velocity(2.0)
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_send_from_threads() {
        let queue = InputQueue::new();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tx = queue.sender();
                thread::spawn(move || tx.send(InputEvent::StopSignal(i)).unwrap())
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let mut stops: Vec<i64> = queue
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                InputEvent::StopSignal(i) => Some(i),
                _ => None,
            })
            .collect();
        stops.sort_unstable();

        assert_eq!(stops, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_send_after_close() {
        let queue = InputQueue::new();
        let tx = queue.sender();
        drop(queue);

        assert!(tx.send(InputEvent::Velocity(0.0)).is_err());
    }

    #[test]
    fn test_event_from_json() {
        let event: InputEvent = serde_json::from_str(r#"{"StopSignal": -1}"#).unwrap();
        assert_eq!(event, InputEvent::StopSignal(-1));

        let event: InputEvent = serde_json::from_str(r#"{"Velocity": 4.5}"#).unwrap();
        assert_eq!(event, InputEvent::Velocity(4.5));

        let event: InputEvent = serde_json::from_str(
            r#"{"Pose": {"position_m": [1.0, 2.0, 0.0], "attitude_q": [0.0, 0.0, 0.0, 1.0]}}"#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::Pose(Pose::from_xyz_heading(1.0, 2.0, 0.0, 0.0)));
    }
}
