//! Write coordination across the route table, the fare log and the edge cache.
//!
//! A fare is written to the route table first, then appended to the log,
//! then to the edge cache. This is not a transaction: if the log append
//! fails, the route table row is put back the way it was (deleted, or
//! restored to the cost it replaced) and the cache is left alone.
//! Registered locations are not rolled back.

use std::io;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Fare, FareError, FareRequest};
use crate::store::{FareLog, Stores};

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

/// Owns the write path for fares.
#[derive(Debug, Clone)]
pub struct WriteCoordinator {
    stores: Arc<Stores>,
    log: Arc<FareLog>,
}

impl WriteCoordinator {
    pub fn new(stores: Arc<Stores>, log: Arc<FareLog>) -> Self {
        Self { stores, log }
    }

    /// Replay the log into the stores and return a coordinator over them.
    pub fn connect(stores: Arc<Stores>, log: Arc<FareLog>) -> io::Result<(Self, LoadReport)> {
        let coordinator = Self::new(stores, log);
        let report = coordinator.replay_log()?;
        Ok((coordinator, report))
    }

    pub fn stores(&self) -> &Arc<Stores> {
        &self.stores
    }

    pub fn log(&self) -> &Arc<FareLog> {
        &self.log
    }

    /// Add a new fare.
    ///
    /// Codes are upper-cased, then the fare is validated. A pair that is
    /// already stored is reported as [`FareError::FareAlreadyExists`] and
    /// left as it is.
    pub fn add_fare(&self, request: &FareRequest) -> Result<Fare, FareError> {
        let fare = Fare::from_request(request).inspect_err(|_| {
            info!(?request, "invalid fare format");
        })?;

        if !self.stores.routes.insert_new(&fare) {
            info!(%fare, "fare already stored");
            return Err(FareError::FareAlreadyExists);
        }

        self.write_through(&fare, None)?;
        debug!(%fare, "fare added");
        Ok(fare)
    }

    /// Store a fare without the existence check, overwriting any cost
    /// already stored for the pair.
    ///
    /// The edge cache still gains a connection, so recording an already
    /// stored pair leaves the cache with more connections than the table has
    /// fares.
    pub fn record_fare(&self, fare: Fare) -> Result<(), FareError> {
        let previous = self.stores.routes.store_fare(&fare);
        if let Some(previous) = previous {
            debug!(%fare, previous, "overwriting stored fare");
        }
        self.write_through(&fare, previous)
    }

    /// Append to the log, then the cache.
    ///
    /// On failure the table row goes back to `previous`, the cost the write
    /// replaced, or is removed if there was none.
    fn write_through(&self, fare: &Fare, previous: Option<u32>) -> Result<(), FareError> {
        if let Err(e) = self.log.append(fare) {
            match previous {
                Some(cost) => {
                    warn!(
                        %fare,
                        restored = cost,
                        path = %self.log.path().display(),
                        error = %e,
                        "fare log append failed, restoring previous cost"
                    );
                    self.stores.routes.store_fare(&Fare { cost, ..*fare });
                }
                None => {
                    warn!(
                        %fare,
                        path = %self.log.path().display(),
                        error = %e,
                        "fare log append failed, removing fare from route table"
                    );
                    self.stores.routes.delete_fare(fare);
                }
            }
            return Err(FareError::Persistence(e));
        }

        self.stores.edges.append_edge(fare);
        Ok(())
    }

    /// Bulk import, e.g. from the log at startup.
    ///
    /// Same validation and existence rules as [`add_fare`](Self::add_fare),
    /// but problems are logged and skipped, and nothing is written to the log.
    pub fn load_fares(&self, requests: &[FareRequest]) -> LoadReport {
        let mut report = LoadReport::default();

        for (index, request) in requests.iter().enumerate() {
            let Ok(fare) = Fare::from_request(request) else {
                warn!(record = index + 1, ?request, "invalid fare format, skipping");
                report.invalid += 1;
                continue;
            };

            if !self.stores.routes.insert_new(&fare) {
                debug!(record = index + 1, %fare, "fare already stored, skipping");
                report.duplicates += 1;
                continue;
            }

            self.stores.edges.append_edge(&fare);
            report.loaded += 1;
        }

        report
    }

    /// Load every record in the log.
    pub fn replay_log(&self) -> io::Result<LoadReport> {
        let records = self.log.read_all()?;
        let report = self.load_fares(&records);
        info!(
            path = %self.log.path().display(),
            loaded = report.loaded,
            invalid = report.invalid,
            duplicates = report.duplicates,
            "replayed fare log"
        );
        Ok(report)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    proptest! {
        /// Any valid fare can be read back with the cost it was added with.
        #[test]
        fn add_then_get_cost(
            boarding in "[A-Za-z]{3}",
            destination in "[A-Za-z]{3}",
            cost in 1i64..=1_000_000,
        ) {
            let dir = tempdir().unwrap();
            let log = FareLog::open_or_create(dir.path().join("fares.csv")).unwrap();
            let c = WriteCoordinator::new(Arc::new(Stores::new()), Arc::new(log));

            let fare = c.add_fare(&FareRequest::new(boarding, destination, cost)).unwrap();
            prop_assert_eq!(
                c.stores().routes.get_cost(&fare.boarding, &fare.destination),
                Some(cost as u32)
            );
        }
    }
}
