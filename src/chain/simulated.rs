use async_trait::async_trait;
use log::{debug, info};
use rand::{rng, Rng, RngCore};
use std::time::Duration;

use crate::chain::submitter::Submitter;
use crate::entity::{SubmissionError, TxOutcome, WorkUnit};

/// Stand-in for a real chain client: waits, then succeeds with a random
/// transaction hash or fails at the configured rate.
pub struct SimulatedSubmitter {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    fn random_tx_hash() -> String {
        let mut bytes = [0u8; 32];
        rng().fill_bytes(&mut bytes);
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        format!("0x{}", hex)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, unit: &WorkUnit) -> Result<TxOutcome, SubmissionError> {
        debug!("Simulating submission of {} ({:?} delay)", unit, self.delay);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failure_rate > 0.0 && rng().random_bool(self.failure_rate) {
            info!("Simulated failure for {}", unit);
            return Err(SubmissionError::Network(
                "Simulated network failure".to_string(),
            ));
        }

        let tx_hash = Self::random_tx_hash();
        info!("Simulated success for {}: {}", unit, tx_hash);
        Ok(TxOutcome { tx_hash })
    }
}
