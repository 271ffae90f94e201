use std::sync::{
    Arc,
    mpsc::{Receiver, Sender, TryRecvError, channel},
};
use std::thread;

use crate::geocode::Geocoder;
use crate::location::{self, LocationQuery, Resolution};

pub(crate) enum JobMessage {
    Geocoded(GeocodeResult),
}

#[derive(Debug)]
pub(crate) struct GeocodeResult {
    pub(crate) request_id: u64,
    pub(crate) place_name: String,
    pub(crate) resolution: Resolution,
}

/// Worker-thread plumbing owned by the controller.
pub(crate) struct ControllerJobs {
    tx: Sender<JobMessage>,
    rx: Receiver<JobMessage>,
    next_request_id: u64,
    pending_lookup: Option<u64>,
}

impl Default for ControllerJobs {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            next_request_id: 0,
            pending_lookup: None,
        }
    }
}

impl ControllerJobs {
    /// Start a lookup, superseding any lookup still in flight.
    pub(crate) fn spawn_geocode(&mut self, geocoder: Arc<dyn Geocoder>, place_name: String) -> u64 {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending_lookup = Some(request_id);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("geocode-lookup".into())
            .spawn({
                let place_name = place_name.clone();
                move || {
                    let query = LocationQuery::PlaceName(place_name.clone());
                    let resolution = location::resolve(&query, geocoder.as_ref());
                    let _ = tx.send(JobMessage::Geocoded(GeocodeResult {
                        request_id,
                        place_name,
                        resolution,
                    }));
                }
            });
        if let Err(err) = spawned {
            tracing::error!("Failed to spawn geocode thread: {err}");
            let _ = self.tx.send(JobMessage::Geocoded(GeocodeResult {
                request_id,
                place_name,
                resolution: Resolution::Failed(err.to_string()),
            }));
        }
        request_id
    }

    /// Forget the in-flight lookup so its answer is dropped on arrival.
    pub(crate) fn cancel_lookup(&mut self) {
        self.pending_lookup = None;
    }

    pub(crate) fn lookup_pending(&self) -> bool {
        self.pending_lookup.is_some()
    }

    /// Take the next message that is still relevant.
    pub(crate) fn try_recv(&mut self) -> Option<JobMessage> {
        loop {
            match self.rx.try_recv() {
                Ok(JobMessage::Geocoded(result)) => {
                    if self.pending_lookup != Some(result.request_id) {
                        tracing::debug!("Dropping stale lookup for {:?}", result.place_name);
                        continue;
                    }
                    self.pending_lookup = None;
                    return Some(JobMessage::Geocoded(result));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}
