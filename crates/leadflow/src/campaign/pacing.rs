//! Randomized spacing between consecutive sends.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::CampaignError;

/// Inclusive bounds, in whole seconds, for the pause between two sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min_secs: u64,
    max_secs: u64,
}

impl DelayWindow {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self, CampaignError> {
        if max_secs < min_secs {
            return Err(CampaignError::InvalidOption(
                "--max-delay must be >= --min-delay".to_string(),
            ));
        }
        Ok(Self { min_secs, max_secs })
    }

    pub fn min(&self) -> Duration {
        Duration::from_secs(self.min_secs)
    }

    pub fn max(&self) -> Duration {
        Duration::from_secs(self.max_secs)
    }

    /// Draw a uniformly distributed whole number of seconds within the window.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_secs == self.max_secs {
            return self.min();
        }
        Duration::from_secs(rng.gen_range(self.min_secs..=self.max_secs))
    }

    pub fn contains(&self, delay: Duration) -> bool {
        delay >= self.min() && delay <= self.max()
    }
}

/// Waits between sends. Swapped out in tests so runs complete instantly.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_bounds_and_cover_both_ends() {
        let window = DelayWindow::new(2, 5).expect("valid window");
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<Duration> = (0..500).map(|_| window.sample(&mut rng)).collect();

        assert!(samples.iter().all(|delay| window.contains(*delay)));
        assert!(samples.contains(&Duration::from_secs(2)));
        assert!(samples.contains(&Duration::from_secs(5)));
    }

    #[test]
    fn degenerate_window_is_fixed() {
        let window = DelayWindow::new(0, 0).expect("zero window");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(window.sample(&mut rng), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_the_duration() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(30)).await;
        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
