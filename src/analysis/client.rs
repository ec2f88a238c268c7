//! Conjunction analysis client

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::error::AnalysisError;
use super::parse::{parse_payload, AnalysisOutcome};
use super::service::{HttpPredictionService, PredictionService};
use super::wire::ConjunctionRequest;
use crate::config::AnalysisConfig;
use crate::propagation::ObjectState;

/// Most recent successful outcome and the invocation that produced it
#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    pub invocation: u64,
    pub outcome: Arc<AnalysisOutcome>,
}

/// Submits object states for collision prediction and interprets the reply.
///
/// Each call to [`analyze`](Self::analyze) is independent. The client keeps
/// the last successful outcome, which is replaced wholesale by later
/// invocations and never by an older one finishing late.
pub struct ConjunctionAnalysisClient<S = HttpPredictionService> {
    service: S,
    timeout: Duration,
    invocations: AtomicU64,
    last: RwLock<Option<CachedAnalysis>>,
}

impl ConjunctionAnalysisClient<HttpPredictionService> {
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let service = HttpPredictionService::new(config)?;
        Ok(Self::new(service, config.timeout()))
    }
}

impl<S: PredictionService> ConjunctionAnalysisClient<S> {
    pub fn new(service: S, timeout: Duration) -> Self {
        Self {
            service,
            timeout,
            invocations: AtomicU64::new(0),
            last: RwLock::new(None),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Analyze `objects`, optionally alongside `debris`.
    ///
    /// An empty object list yields an empty result without contacting the
    /// service. Unparseable replies come back as
    /// [`AnalysisOutcome::Degraded`], not as errors.
    pub async fn analyze(
        &self,
        objects: &[ObjectState],
        debris: Option<&[ObjectState]>,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let invocation = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;

        if objects.is_empty() {
            log::info!("Analysis #{} skipped: no objects supplied", invocation);
            let outcome = AnalysisOutcome::Complete(Default::default());
            self.record(invocation, &outcome);
            return Ok(outcome);
        }

        let request = ConjunctionRequest::from_states(objects, debris);
        log::info!(
            "Analysis #{}: submitting {} objects and {} debris",
            invocation,
            request.objects.len(),
            request.debris_count()
        );

        let raw = match tokio::time::timeout(self.timeout, self.service.submit(&request)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                log::error!("Analysis #{} failed: {}", invocation, e);
                return Err(e);
            }
            Err(_) => {
                log::error!("Analysis #{} timed out after {:?}", invocation, self.timeout);
                return Err(AnalysisError::unavailable(format!(
                    "no response within {:?}",
                    self.timeout
                )));
            }
        };

        let outcome = parse_payload(&raw);
        let result = outcome.result();
        let critical = result.critical_count();
        if critical > 0 {
            log::warn!(
                "Analysis #{}: {} critical collision risk(s) detected",
                invocation,
                critical
            );
        }
        log::info!(
            "Analysis #{} complete: {} predictions, Kessler risk {:?}",
            invocation,
            result.predictions.len(),
            result.kessler_risk
        );

        self.record(invocation, &outcome);
        Ok(outcome)
    }

    /// Last successful outcome, if any
    pub fn last_result(&self) -> Option<CachedAnalysis> {
        self.last.read().clone()
    }

    fn record(&self, invocation: u64, outcome: &AnalysisOutcome) {
        let mut last = self.last.write();
        match last.as_ref() {
            Some(cached) if cached.invocation > invocation => {
                log::debug!(
                    "Discarding analysis #{}; #{} is already cached",
                    invocation,
                    cached.invocation
                );
            }
            _ => {
                *last = Some(CachedAnalysis {
                    invocation,
                    outcome: Arc::new(outcome.clone()),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::wire::{ConjunctionRisk, KesslerRisk};
    use crate::data::{ObjectClass, OrbitType, RiskLevel, TrackedObject};
    use async_trait::async_trait;
    use glam::DVec3;
    use std::sync::atomic::AtomicUsize;

    const EXAMPLE: &str = r#"{"predictions":[{"object1_name":"ISS","object2_name":"Deb-1","risk_score":92,"risk_level":"critical","minimum_distance_km":1.8,"time_to_closest_approach_hours":2.1,"recommended_action":"maneuver"}],"kessler_risk":"high","summary":"elevated risk"}"#;

    /// In-process stand-in for the remote service.
    ///
    /// Call `n` uses `script[n]` when present, otherwise the default reply
    /// and delay.
    struct FakeService {
        reply: Result<String, AnalysisError>,
        delay: Duration,
        script: Vec<(Duration, String)>,
        calls: AtomicUsize,
        last_request: parking_lot::Mutex<Option<ConjunctionRequest>>,
    }

    impl FakeService {
        fn replying(reply: Result<&str, AnalysisError>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                delay: Duration::ZERO,
                script: Vec::new(),
                calls: AtomicUsize::new(0),
                last_request: parking_lot::Mutex::new(None),
            }
        }

        fn scripted(script: &[(u64, &str)]) -> Self {
            let mut service = Self::replying(Ok(EXAMPLE));
            service.script = script
                .iter()
                .map(|&(ms, reply)| (Duration::from_millis(ms), reply.to_string()))
                .collect();
            service
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PredictionService for FakeService {
        async fn submit(&self, request: &ConjunctionRequest) -> Result<String, AnalysisError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock() = Some(request.clone());

            let (delay, reply) = match self.script.get(call) {
                Some((delay, reply)) => (*delay, Ok(reply.clone())),
                None => (self.delay, self.reply.clone()),
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }

    fn state(id: &str, name: &str, class: ObjectClass) -> ObjectState {
        let risk_level = if class == ObjectClass::Debris {
            RiskLevel::High
        } else {
            RiskLevel::Safe
        };
        ObjectState {
            object: Arc::new(TrackedObject {
                id: id.into(),
                name: name.into(),
                class,
                orbit_type: OrbitType::Leo,
                altitude_km: 420.0,
                inclination_deg: 51.6,
                velocity_km_s: 7.66,
                risk_level,
                origin: None,
                size: None,
            }),
            position: DVec3::new(0.5, 0.0, 0.2),
        }
    }

    fn client(service: FakeService) -> ConjunctionAnalysisClient<FakeService> {
        ConjunctionAnalysisClient::new(service, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_end_to_end_example() {
        let client = client(FakeService::replying(Ok(EXAMPLE)));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];
        let debris = [state("deb-1", "Deb-1", ObjectClass::Debris)];

        let outcome = client.analyze(&objects, Some(&debris)).await.unwrap();
        assert!(!outcome.is_degraded());

        let result = outcome.result();
        assert_eq!(result.predictions.len(), 1);
        assert_eq!(result.predictions[0].risk_level, ConjunctionRisk::Critical);
        assert_eq!(result.kessler_risk, KesslerRisk::High);
        assert_eq!(result.critical_count(), 1);

        let sent = client.service().last_request.lock().clone().unwrap();
        assert_eq!(sent.objects.len(), 1);
        assert_eq!(sent.objects[0].name, "ISS");
        assert_eq!(sent.debris_count(), 1);
    }

    #[tokio::test]
    async fn test_debris_omitted_by_default() {
        let client = client(FakeService::replying(Ok(EXAMPLE)));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        client.analyze(&objects, None).await.unwrap();

        let sent = client.service().last_request.lock().clone().unwrap();
        assert!(sent.debris.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_skips_service() {
        let client = client(FakeService::replying(Ok(EXAMPLE)));

        let outcome = client.analyze(&[], None).await.unwrap();

        assert!(outcome.result().predictions.is_empty());
        assert_eq!(client.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_degraded() {
        let client = client(FakeService::replying(Ok("I could not find any conjunctions.")));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        let outcome = client.analyze(&objects, None).await.unwrap();

        assert!(outcome.is_degraded());
        assert_eq!(outcome.result().kessler_risk, KesslerRisk::Low);
        assert_eq!(outcome.result().summary, "I could not find any conjunctions.");
    }

    #[tokio::test]
    async fn test_service_errors_propagate() {
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        let limited = client(FakeService::replying(Err(AnalysisError::RateLimited("slow".into()))));
        assert!(matches!(
            limited.analyze(&objects, None).await,
            Err(AnalysisError::RateLimited(_))
        ));

        let unpaid = client(FakeService::replying(Err(AnalysisError::QuotaExceeded("pay".into()))));
        assert!(matches!(
            unpaid.analyze(&objects, None).await,
            Err(AnalysisError::QuotaExceeded(_))
        ));
        assert!(unpaid.last_result().is_none());
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let service = FakeService::replying(Ok(EXAMPLE)).slow(Duration::from_millis(500));
        let client = ConjunctionAnalysisClient::new(service, Duration::from_millis(20));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        let err = client.analyze(&objects, None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_cache_keeps_latest_invocation() {
        let client = client(FakeService::replying(Ok(EXAMPLE)));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        client.analyze(&objects, None).await.unwrap();
        client.analyze(&objects, None).await.unwrap();
        assert_eq!(client.last_result().unwrap().invocation, 2);

        // A late finisher from an older invocation must not replace it
        client.record(1, &AnalysisOutcome::degraded("stale"));
        let cached = client.last_result().unwrap();
        assert_eq!(cached.invocation, 2);
        assert!(!cached.outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_concurrent_invocations_keep_newest_result() {
        // #1 answers late with predictions, #2 answers early with prose
        let client = client(FakeService::scripted(&[(200, EXAMPLE), (10, "no data today")]));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        let (first, second) = tokio::join!(
            client.analyze(&objects, None),
            client.analyze(&objects, None)
        );

        let first = first.unwrap();
        let second = second.unwrap();
        assert!(!first.is_degraded());
        assert_eq!(first.result().critical_count(), 1);
        assert!(second.is_degraded());
        assert_eq!(second.result().summary, "no data today");

        let cached = client.last_result().unwrap();
        assert_eq!(cached.invocation, 2);
        assert_eq!(*cached.outcome, second);
        assert_eq!(client.service().calls(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_invocation_leaves_cache_untouched() {
        let client = client(FakeService::scripted(&[(0, EXAMPLE), (500, "late reply")]));
        let objects = [state("iss", "ISS", ObjectClass::Satellite)];

        client.analyze(&objects, None).await.unwrap();
        let before = client.last_result().unwrap();

        // Dropping the future cancels the call mid-flight
        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), client.analyze(&objects, None)).await;
        assert!(cancelled.is_err());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let after = client.last_result().unwrap();
        assert_eq!(after.invocation, before.invocation);
        assert!(Arc::ptr_eq(&after.outcome, &before.outcome));
        assert_eq!(client.service().calls(), 2);
    }
}
