//! Event Simulator
//!
//! Synthesizes views and clicks near existing articles' locations to mimic
//! organic traffic. Writes are best-effort: a failed insert is logged and the
//! tick carries on.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{Article, EventKind, InteractionEvent};
use crate::store::{ArticleStore, EventStore};

// == Simulation Settings ==
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Tick period
    pub interval: Duration,
    /// Maximum number of articles sampled per tick
    pub sample_size: usize,
    /// Inclusive lower bound on events generated per tick
    pub min_events: usize,
    /// Inclusive upper bound on events generated per tick
    pub max_events: usize,
    /// Probability that a generated event is a click
    pub click_probability: f64,
    /// Maximum offset in degrees applied to each axis of the article location
    pub jitter_degrees: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            sample_size: 100,
            min_events: 5,
            max_events: 20,
            click_probability: 0.4,
            jitter_degrees: 1.0,
        }
    }
}

impl From<&Config> for SimulationSettings {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.simulation_interval_duration(),
            ..Self::default()
        }
    }
}

// == Event Simulator ==
pub struct EventSimulator {
    articles: Arc<dyn ArticleStore>,
    events: Arc<dyn EventStore>,
    settings: SimulationSettings,
}

impl EventSimulator {
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        events: Arc<dyn EventStore>,
        mut settings: SimulationSettings,
    ) -> Self {
        settings.max_events = settings.max_events.max(settings.min_events);
        settings.click_probability = settings.click_probability.clamp(0.0, 1.0);
        settings.jitter_degrees = settings.jitter_degrees.abs();

        Self {
            articles,
            events,
            settings,
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Generates `count` events anchored on randomly chosen sample articles.
    pub fn generate<R: Rng>(
        &self,
        sample: &[Article],
        count: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<InteractionEvent> {
        let mut generated = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(article) = sample.choose(rng) else {
                break;
            };

            let kind = if rng.random_bool(self.settings.click_probability) {
                EventKind::Click
            } else {
                EventKind::View
            };

            let jitter = self.settings.jitter_degrees;
            let lat = article.latitude + (rng.random::<f64>() - 0.5) * 2.0 * jitter;
            let lon = article.longitude + (rng.random::<f64>() - 0.5) * 2.0 * jitter;

            generated.push(InteractionEvent::new(
                article.id.clone(),
                kind,
                lat.clamp(-90.0, 90.0),
                wrap_longitude(lon),
                now,
            ));
        }
        generated
    }

    /// Runs one simulation round. Returns the number of events written.
    pub async fn tick(&self) -> usize {
        let count = {
            let mut rng = rand::rng();
            rng.random_range(self.settings.min_events..=self.settings.max_events)
        };
        self.write_events(count).await
    }

    /// Writes `count` events in one go, e.g. to seed activity at startup.
    pub async fn burst(&self, count: usize) -> usize {
        self.write_events(count).await
    }

    async fn write_events(&self, count: usize) -> usize {
        let sample = match self.articles.find_all(self.settings.sample_size).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Event simulation skipped, article sample failed: {}", e);
                return 0;
            }
        };
        if sample.is_empty() {
            debug!("Event simulation skipped, no articles available");
            return 0;
        }

        let generated = {
            let mut rng = rand::rng();
            self.generate(&sample, count, &mut rng, Utc::now())
        };

        let attempted = generated.len();
        let mut written = 0;
        for event in generated {
            let article_id = event.article_id.clone();
            match self.events.insert(event).await {
                Ok(()) => written += 1,
                Err(e) => warn!("Dropped simulated event for {}: {}", article_id, e),
            }
        }

        debug!("Simulated {} of {} events", written, attempted);
        written
    }

    /// Ticks every `interval` until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            "Starting event simulation with interval of {} ms",
            self.settings.interval.as_millis()
        );

        let mut ticker = tokio::time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Event simulation stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }
    }
}

/// Spawns `simulator.run(cancel)` on the runtime.
pub fn spawn_event_simulator(simulator: EventSimulator, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(simulator.run(cancel))
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}
