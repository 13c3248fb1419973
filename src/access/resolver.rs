use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::{sleep, timeout};
use uuid::Uuid;

use super::error::AccessError;
use crate::authz::{AccessDecision, AccessFacts, DefaultPolicyEvaluator, PolicyEvaluator, Requester};
use crate::catalog::{CatalogError, LessonCatalog};
use crate::config::AccessConfig;
use crate::jwt::SessionVerifier;
use crate::models::lesson::{LessonRecord, VideoUrlResponse};
use crate::storage::{key_fingerprint, ObjectStore, SignedUrl};

const SIGNING_ATTEMPTS: u32 = 2;

/// A granted, time-limited link to a lesson video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAccess {
    pub signed_url: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
}

impl From<VideoAccess> for VideoUrlResponse {
    fn from(access: VideoAccess) -> Self {
        VideoUrlResponse {
            signed_url: access.signed_url,
            expires_at: access.expires_at,
            expires_in: access.expires_in,
        }
    }
}

/// Decides whether a requester may watch a lesson and mints the signed URL.
///
/// Read-only against the catalog; the only outbound write-like call is the
/// signed-URL issuance.
#[derive(Clone)]
pub struct LessonAccessResolver {
    sessions: Arc<dyn SessionVerifier>,
    catalog: Arc<dyn LessonCatalog>,
    store: Arc<dyn ObjectStore>,
    policy: Arc<dyn PolicyEvaluator>,
    config: AccessConfig,
}

impl LessonAccessResolver {
    pub fn new(
        sessions: Arc<dyn SessionVerifier>,
        catalog: Arc<dyn LessonCatalog>,
        store: Arc<dyn ObjectStore>,
        config: AccessConfig,
    ) -> Self {
        Self {
            sessions,
            catalog,
            store,
            policy: Arc::new(DefaultPolicyEvaluator::new()),
            config,
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn PolicyEvaluator>) -> Self {
        self.policy = policy;
        self
    }

    /// Entry point: bearer token plus lesson id in, signed URL out.
    ///
    /// The whole resolution runs under `request_timeout`; running out of time
    /// is an upstream failure, never a denial.
    pub async fn resolve_lesson_video_access(
        &self,
        auth_token: Option<&str>,
        lesson_id: Option<&str>,
    ) -> Result<VideoAccess, AccessError> {
        match timeout(self.config.request_timeout, self.resolve(auth_token, lesson_id)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    lesson_id = lesson_id.unwrap_or_default(),
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "lesson access resolution timed out"
                );
                Err(AccessError::UpstreamFailure("access resolution timed out".to_string()))
            }
        }
    }

    async fn resolve(&self, auth_token: Option<&str>, lesson_id: Option<&str>) -> Result<VideoAccess, AccessError> {
        let requester = self.authenticate(auth_token).await?;
        self.resolve_for(&requester, lesson_id).await
    }

    async fn authenticate(&self, auth_token: Option<&str>) -> Result<Requester, AccessError> {
        let token = auth_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AccessError::Unauthenticated)?;

        self.sessions.verify(token).await
    }

    /// Resolution for an already authenticated requester.
    pub async fn resolve_for(&self, requester: &Requester, lesson_id: Option<&str>) -> Result<VideoAccess, AccessError> {
        let lesson_id = parse_lesson_id(lesson_id)?;

        let lesson = self
            .catalog
            .find_lesson(lesson_id)
            .await
            .map_err(catalog_failure)?
            .ok_or(AccessError::NotFound)?;

        let facts = self.gather_facts(requester, &lesson).await?;

        let reason = match self.policy.decide(requester, &facts).await {
            AccessDecision::Grant(reason) => reason,
            AccessDecision::Deny => {
                tracing::info!(
                    user_id = %requester.user_id,
                    lesson_id = %lesson.id,
                    course_id = %lesson.course_id,
                    "lesson video access denied"
                );
                return Err(if self.config.conceal_forbidden {
                    AccessError::NotFound
                } else {
                    AccessError::Forbidden
                });
            }
        };

        let signed = self.issue_signed_url(&lesson).await?;

        tracing::info!(
            user_id = %requester.user_id,
            lesson_id = %lesson.id,
            reason = reason.as_str(),
            object = %key_fingerprint(&lesson.storage_key),
            expires_at = %signed.expires_at,
            "lesson video url issued"
        );

        Ok(VideoAccess {
            signed_url: signed.url,
            expires_at: signed.expires_at,
            expires_in: self.config.signed_url_ttl.as_secs(),
        })
    }

    async fn gather_facts(&self, requester: &Requester, lesson: &LessonRecord) -> Result<AccessFacts, AccessError> {
        let course_id = lesson.course_id;
        let user_id = requester.user_id;

        let (owner, is_enrolled, is_assigned_instructor) = tokio::try_join!(
            self.catalog.course_owner(course_id),
            self.catalog.is_enrolled(course_id, user_id),
            self.catalog.is_assigned_instructor(course_id, user_id),
        )
        .map_err(catalog_failure)?;

        Ok(AccessFacts {
            is_enrolled,
            is_owner: owner == Some(user_id),
            is_assigned_instructor,
            is_admin: requester.is_admin(),
        })
    }

    /// One retry after `signing_retry_backoff` for transient failures and
    /// timeouts. Rejections are final.
    async fn issue_signed_url(&self, lesson: &LessonRecord) -> Result<SignedUrl, AccessError> {
        let object = key_fingerprint(&lesson.storage_key);
        let mut last_error = String::new();

        for attempt in 1..=SIGNING_ATTEMPTS {
            let call = self
                .store
                .create_signed_url(lesson.id, &lesson.storage_key, self.config.signed_url_ttl);

            match timeout(self.config.signing_timeout, call).await {
                Ok(Ok(signed)) => return Ok(signed),
                Ok(Err(err)) if err.is_transient() => {
                    tracing::warn!(%object, attempt, error = %err, "signed url issuance failed");
                    last_error = err.to_string();
                }
                Ok(Err(err)) => {
                    tracing::error!(%object, attempt, error = %err, "signed url issuance rejected");
                    return Err(AccessError::UpstreamFailure(err.to_string()));
                }
                Err(_) => {
                    tracing::warn!(%object, attempt, "signed url issuance timed out");
                    last_error = "signed url issuance timed out".to_string();
                }
            }

            if attempt < SIGNING_ATTEMPTS {
                sleep(self.config.signing_retry_backoff).await;
            }
        }

        Err(AccessError::UpstreamFailure(last_error))
    }
}

fn parse_lesson_id(lesson_id: Option<&str>) -> Result<Uuid, AccessError> {
    let raw = lesson_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AccessError::BadRequest("lessonId is required".to_string()))?;

    // An id that cannot name a lesson is reported like a missing one.
    Uuid::parse_str(raw).map_err(|_| AccessError::NotFound)
}

fn catalog_failure(err: CatalogError) -> AccessError {
    tracing::error!(error = %err, detail = ?err, "catalog lookup failed");
    AccessError::UpstreamFailure("data store failure".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::authz::Role;
    use crate::storage::StoreError;

    #[derive(Default)]
    struct FakeSessions {
        tokens: HashMap<String, Requester>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionVerifier for FakeSessions {
        async fn verify(&self, token: &str) -> Result<Requester, AccessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token == "db-down" {
                return Err(AccessError::UpstreamFailure("data store failure".to_string()));
            }
            self.tokens.get(token).copied().ok_or(AccessError::Unauthenticated)
        }
    }

    #[derive(Default)]
    struct FakeCatalog {
        lessons: HashMap<Uuid, LessonRecord>,
        owners: HashMap<Uuid, Uuid>,
        enrollments: HashSet<(Uuid, Uuid)>,
        assignments: HashSet<(Uuid, Uuid)>,
        lesson_calls: AtomicUsize,
        predicate_calls: AtomicUsize,
        delay: Option<Duration>,
        broken: bool,
    }

    impl FakeCatalog {
        async fn pause(&self) {
            if let Some(delay) = self.delay {
                sleep(delay).await;
            }
        }

        fn check(&self) -> Result<(), CatalogError> {
            if self.broken {
                return Err(CatalogError::Unavailable("connection reset by peer".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LessonCatalog for FakeCatalog {
        async fn find_lesson(&self, lesson_id: Uuid) -> Result<Option<LessonRecord>, CatalogError> {
            self.lesson_calls.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            self.check()?;
            Ok(self.lessons.get(&lesson_id).cloned())
        }

        async fn course_owner(&self, course_id: Uuid) -> Result<Option<Uuid>, CatalogError> {
            self.predicate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.owners.get(&course_id).copied())
        }

        async fn is_enrolled(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError> {
            self.predicate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.enrollments.contains(&(course_id, user_id)))
        }

        async fn is_assigned_instructor(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError> {
            self.predicate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.assignments.contains(&(course_id, user_id)))
        }
    }

    /// Hangs on the first `stalls` calls, then pops scripted failures, then
    /// signs successfully.
    #[derive(Default)]
    struct FakeStore {
        failures: Mutex<VecDeque<StoreError>>,
        stalls: usize,
        calls: AtomicUsize,
        ttls: Mutex<Vec<Duration>>,
        keys: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn failing_with(errors: Vec<StoreError>) -> Self {
            Self {
                failures: Mutex::new(errors.into()),
                ..Default::default()
            }
        }

        fn stalling(stalls: usize) -> Self {
            Self {
                stalls,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn create_signed_url(&self, object_id: Uuid, storage_key: &str, ttl: Duration) -> Result<SignedUrl, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.ttls.lock().unwrap().push(ttl);
            self.keys.lock().unwrap().push(storage_key.to_string());
            if call < self.stalls {
                sleep(Duration::from_secs(5)).await;
            }
            if let Some(err) = self.failures.lock().unwrap().pop_front() {
                return Err(err);
            }
            Ok(SignedUrl {
                url: format!("https://cdn.test/signed/{object_id}?n={call}&nonce={}", Uuid::new_v4()),
                expires_at: Utc::now() + chrono::Duration::from_std(ttl).unwrap(),
            })
        }
    }

    struct World {
        lesson_a: Uuid,
        lesson_b: Uuid,
        owner_a: Uuid,
        sessions: FakeSessions,
        catalog: FakeCatalog,
    }

    const SECRET_KEY: &str = "private/course-a/lesson-1.mp4";

    fn world() -> World {
        let course_a = Uuid::new_v4();
        let course_b = Uuid::new_v4();
        let lesson_a = Uuid::new_v4();
        let lesson_b = Uuid::new_v4();
        let owner_a = Uuid::new_v4();
        let owner_b = Uuid::new_v4();
        let delegate_a = Uuid::new_v4();
        let student_a = Uuid::new_v4();
        let student_b = Uuid::new_v4();
        let admin = Uuid::new_v4();

        let mut sessions = FakeSessions::default();
        for (token, id, role) in [
            ("owner-a", owner_a, Role::Instructor),
            ("delegate-a", delegate_a, Role::Instructor),
            ("student-a", student_a, Role::Student),
            ("student-b", student_b, Role::Student),
            ("admin", admin, Role::Admin),
        ] {
            sessions.tokens.insert(token.to_string(), Requester::new(id, role));
        }

        let mut catalog = FakeCatalog::default();
        catalog.lessons.insert(
            lesson_a,
            LessonRecord { id: lesson_a, course_id: course_a, storage_key: SECRET_KEY.to_string() },
        );
        catalog.lessons.insert(
            lesson_b,
            LessonRecord { id: lesson_b, course_id: course_b, storage_key: "private/course-b/lesson-1.mp4".to_string() },
        );
        catalog.owners.insert(course_a, owner_a);
        catalog.owners.insert(course_b, owner_b);
        catalog.assignments.insert((course_a, delegate_a));
        catalog.enrollments.insert((course_a, student_a));
        catalog.enrollments.insert((course_b, student_b));

        World { lesson_a, lesson_b, owner_a, sessions, catalog }
    }

    fn fast_config() -> AccessConfig {
        AccessConfig {
            request_timeout: Duration::from_millis(500),
            signing_timeout: Duration::from_millis(100),
            signing_retry_backoff: Duration::from_millis(5),
            ..AccessConfig::default()
        }
    }

    struct Harness {
        resolver: LessonAccessResolver,
        sessions: Arc<FakeSessions>,
        catalog: Arc<FakeCatalog>,
        store: Arc<FakeStore>,
    }

    fn harness(sessions: FakeSessions, catalog: FakeCatalog, store: FakeStore, config: AccessConfig) -> Harness {
        let sessions = Arc::new(sessions);
        let catalog = Arc::new(catalog);
        let store = Arc::new(store);
        let resolver = LessonAccessResolver::new(sessions.clone(), catalog.clone(), store.clone(), config);
        Harness { resolver, sessions, catalog, store }
    }

    fn lesson(id: Uuid) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_lookup() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h.resolver.resolve_lesson_video_access(None, Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::Unauthenticated);
        assert_eq!(h.sessions.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.catalog.lesson_calls.load(Ordering::SeqCst), 0);

        let err = h.resolver.resolve_lesson_video_access(Some("  "), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::Unauthenticated);
    }

    #[tokio::test]
    async fn invalid_token_is_unauthenticated() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("forged"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::Unauthenticated);
        assert_eq!(h.catalog.lesson_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn session_store_failure_is_not_reported_as_unauthenticated() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("db-down"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert!(matches!(err, AccessError::UpstreamFailure(_)), "got {err:?}");
        assert_eq!(h.catalog.lesson_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_lesson_id_is_bad_request() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        for lesson_id in [None, Some(""), Some("   ")] {
            let err = h.resolver.resolve_lesson_video_access(Some("admin"), lesson_id).await.unwrap_err();
            assert!(matches!(err, AccessError::BadRequest(_)), "got {err:?}");
        }
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found_without_predicate_reads() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h
            .resolver
            .resolve_lesson_video_access(Some("admin"), Some(&lesson(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert_eq!(err, AccessError::NotFound);
        assert_eq!(h.catalog.lesson_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.catalog.predicate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 0);

        let err = h.resolver.resolve_lesson_video_access(Some("admin"), Some("not-a-uuid")).await.unwrap_err();
        assert_eq!(err, AccessError::NotFound);
    }

    #[tokio::test]
    async fn student_enrolled_elsewhere_is_forbidden_and_no_url_is_minted() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h
            .resolver
            .resolve_lesson_video_access(Some("student-b"), Some(&lesson(w.lesson_a)))
            .await
            .unwrap_err();
        assert_eq!(err, AccessError::Forbidden);
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn every_granting_predicate_yields_a_url() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        for token in ["owner-a", "delegate-a", "student-a", "admin"] {
            let access = h
                .resolver
                .resolve_lesson_video_access(Some(token), Some(&lesson(w.lesson_a)))
                .await
                .unwrap_or_else(|err| panic!("{token} denied: {err:?}"));
            assert_eq!(access.expires_in, 3600);
            assert!(!access.signed_url.contains(SECRET_KEY));
            assert!(access.signed_url.contains(&w.lesson_a.to_string()));
        }
        assert!(h.store.keys.lock().unwrap().iter().all(|key| key == SECRET_KEY));

        // admin reaches a course it has no relation to
        h.resolver
            .resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_b)))
            .await
            .unwrap();

        // owner and delegate of A have no standing in B
        for token in ["owner-a", "delegate-a", "student-a"] {
            let err = h
                .resolver
                .resolve_lesson_video_access(Some(token), Some(&lesson(w.lesson_b)))
                .await
                .unwrap_err();
            assert_eq!(err, AccessError::Forbidden, "{token}");
        }

        assert!(h.store.ttls.lock().unwrap().iter().all(|ttl| ttl.as_secs() == 3600));
    }

    #[tokio::test]
    async fn resolve_for_uses_requester_facts() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let owner = Requester::new(w.owner_a, Role::Instructor);
        assert!(h.resolver.resolve_for(&owner, Some(&lesson(w.lesson_a))).await.is_ok());

        // role alone does not make an instructor an owner
        let stranger = Requester::new(Uuid::new_v4(), Role::Instructor);
        assert_eq!(
            h.resolver.resolve_for(&stranger, Some(&lesson(w.lesson_a))).await.unwrap_err(),
            AccessError::Forbidden
        );
    }

    #[tokio::test]
    async fn repeated_grants_yield_distinct_urls() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let first = h.resolver.resolve_lesson_video_access(Some("student-a"), Some(&lesson(w.lesson_a))).await.unwrap();
        let second = h.resolver.resolve_lesson_video_access(Some("student-a"), Some(&lesson(w.lesson_a))).await.unwrap();
        assert_ne!(first.signed_url, second.signed_url);
    }

    #[tokio::test]
    async fn transient_signing_failure_is_retried_once() {
        let w = world();
        let store = FakeStore::failing_with(vec![StoreError::Transient("503".to_string())]);
        let h = harness(w.sessions, w.catalog, store, fast_config());

        let access = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await;
        assert!(access.is_ok());
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn second_transient_failure_is_upstream_failure() {
        let w = world();
        let store = FakeStore::failing_with(vec![
            StoreError::Transient("503".to_string()),
            StoreError::Transient("503".to_string()),
        ]);
        let h = harness(w.sessions, w.catalog, store, fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert!(matches!(err, AccessError::UpstreamFailure(_)));
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn signing_timeout_is_retried_once() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::stalling(1), fast_config());

        let access = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await;
        assert!(access.is_ok(), "got {access:?}");
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn second_signing_timeout_is_upstream_failure() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::stalling(2), fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert!(matches!(err, AccessError::UpstreamFailure(_)), "got {err:?}");
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejected_signing_is_not_retried() {
        let w = world();
        let store = FakeStore::failing_with(vec![StoreError::Rejected("invalid service key".to_string())]);
        let h = harness(w.sessions, w.catalog, store, fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert!(matches!(err, AccessError::UpstreamFailure(_)));
        assert_eq!(h.store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn catalog_failure_is_upstream_without_details() {
        let mut w = world();
        w.catalog.broken = true;
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());

        let err = h.resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::UpstreamFailure("data store failure".to_string()));
    }

    #[tokio::test]
    async fn slow_catalog_times_out_as_upstream_failure() {
        let mut w = world();
        w.catalog.delay = Some(Duration::from_millis(300));
        let config = AccessConfig {
            request_timeout: Duration::from_millis(50),
            ..fast_config()
        };
        let h = harness(w.sessions, w.catalog, FakeStore::default(), config);

        let err = h.resolver.resolve_lesson_video_access(Some("student-b"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert!(matches!(err, AccessError::UpstreamFailure(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn concealment_reports_denials_as_not_found() {
        let w = world();
        let config = AccessConfig {
            conceal_forbidden: true,
            ..fast_config()
        };
        let h = harness(w.sessions, w.catalog, FakeStore::default(), config);

        let err = h.resolver.resolve_lesson_video_access(Some("student-b"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::NotFound);
    }

    struct DenyAll;

    #[async_trait]
    impl PolicyEvaluator for DenyAll {
        async fn decide(&self, _requester: &Requester, _facts: &AccessFacts) -> AccessDecision {
            AccessDecision::Deny
        }
    }

    #[tokio::test]
    async fn injected_policy_replaces_default() {
        let w = world();
        let h = harness(w.sessions, w.catalog, FakeStore::default(), fast_config());
        let resolver = h.resolver.clone().with_policy(Arc::new(DenyAll));

        let err = resolver.resolve_lesson_video_access(Some("admin"), Some(&lesson(w.lesson_a))).await.unwrap_err();
        assert_eq!(err, AccessError::Forbidden);
    }
}
