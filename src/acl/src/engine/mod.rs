//! Access control facade
//!
//! Wires the role registry, the rule source, context population and rule
//! resolution together behind the operations request handlers call.

pub mod metrics;

pub use metrics::{AclMetrics, MetricsCollector};

use crate::assessor::AllAssessor;
use crate::config::AclConfig;
use crate::context::{AclContext, AclRequest};
use crate::decision::{Credential, Decision};
use crate::error::{AclError, Result};
use crate::population::populate;
use crate::registry::{RoleRegistry, SharedAssessor};
use crate::repository::Repositories;
use crate::resolution::{check_role, evaluate};
use crate::rules::RuleSource;
use crate::types::{EndpointName, RoleName, Rule};

use parking_lot::RwLock;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound for one `populate_context` call
    pub population_timeout: Option<Duration>,

    /// Upper bound for one `is_permitted` call
    pub evaluation_timeout: Option<Duration>,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Register the built-in `all` assessor on construction
    pub register_default_assessors: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_timeout: None,
            evaluation_timeout: None,
            enable_metrics: true,
            register_default_assessors: true,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from environment variables
    ///
    /// - `ACL_POPULATION_TIMEOUT_MS` - population bound (default: none)
    /// - `ACL_EVALUATION_TIMEOUT_MS` - evaluation bound (default: none)
    /// - `ACL_METRICS` - `true`/`false` (default: true)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let millis = |key: &str| -> Result<Option<Duration>> {
            lookup(key)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map(Duration::from_millis)
                        .map_err(|e| AclError::Config(format!("{}={:?}: {}", key, raw, e)))
                })
                .transpose()
        };

        let enable_metrics = match lookup("ACL_METRICS") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| AclError::Config(format!("ACL_METRICS={:?}: {}", raw, e)))?,
            None => true,
        };

        Ok(Self {
            population_timeout: millis("ACL_POPULATION_TIMEOUT_MS")?,
            evaluation_timeout: millis("ACL_EVALUATION_TIMEOUT_MS")?,
            enable_metrics,
            ..Self::default()
        })
    }
}

/// Access control engine
///
/// # Flow
///
/// ```text
/// populate_context ─→ tiers (priority desc) ─→ init_context (concurrent per tier)
///                                                   ↓ writes
/// is_permitted ─→ RuleSource::rules_for ─→ has_role per rule ─→ Decision
/// ```
///
/// All operations take `&self`; assessors and rules may be added while the
/// engine is shared. Locks are only held to snapshot state, never across an
/// assessor call.
pub struct AccessControl {
    /// Role assessors and the repository handle
    registry: RwLock<RoleRegistry>,

    /// Global and endpoint rules
    rules: RwLock<RuleSource>,

    /// Metrics collector
    metrics: Option<Arc<MetricsCollector>>,

    /// Engine configuration
    config: EngineConfig,
}

impl AccessControl {
    /// Create an engine from a rule configuration with default settings
    pub fn new(acl: AclConfig) -> Self {
        Self::with_config(acl, EngineConfig::default())
    }

    /// Create an engine with explicit settings
    pub fn with_config(acl: AclConfig, config: EngineConfig) -> Self {
        let mut registry = RoleRegistry::new();
        if config.register_default_assessors {
            registry.register(Arc::new(AllAssessor::new()));
        }

        let metrics = config
            .enable_metrics
            .then(|| Arc::new(MetricsCollector::new()));

        info!(
            "AccessControl initialized with {} global rules, {} endpoints, metrics={}",
            acl.rules.len(),
            acl.endpoints.len(),
            config.enable_metrics
        );

        Self {
            registry: RwLock::new(registry),
            rules: RwLock::new(RuleSource::from(acl)),
            metrics,
            config,
        }
    }

    /// Register a role assessor; a previous assessor for the role is replaced
    pub fn register_assessor(&self, assessor: SharedAssessor) {
        self.registry.write().register(assessor);
    }

    /// Bind the shared repositories and forward them to every assessor
    pub fn set_repositories(&self, repositories: Arc<Repositories>) {
        self.registry.write().set_repositories(Some(repositories));
    }

    /// Append one global rule
    pub fn add_rule(&self, rule: Rule) {
        self.rules.write().add_rule(rule);
    }

    /// Append a batch of global rules
    pub fn add_rules(&self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.write().add_rules(rules);
    }

    /// Replace the rules of one endpoint
    pub fn set_endpoint_rules(&self, endpoint: impl Into<EndpointName>, rules: Vec<Rule>) {
        self.rules.write().set_endpoint_rules(endpoint, rules);
    }

    /// Ordered rule list evaluated for `endpoint`
    pub fn rules_for(&self, endpoint: &str) -> Vec<Rule> {
        self.rules.read().rules_for(endpoint)
    }

    /// Registered role names, sorted
    pub fn roles(&self) -> Vec<RoleName> {
        self.registry.read().roles()
    }

    /// Run every assessor's `init_context`, highest priority tier first
    ///
    /// An assessor error aborts population and is returned unchanged; the
    /// context must not be used for a decision afterwards.
    pub async fn populate_context(
        &self,
        request: &AclRequest,
        context: &AclContext,
        remote_object: Option<&Value>,
    ) -> Result<()> {
        let tiers = self.registry.read().tiers();
        debug!("Populating context across {} priority tiers", tiers.len());

        let result = self
            .bounded(
                "context population",
                self.config.population_timeout,
                populate(&tiers, request, context, remote_object),
            )
            .await;

        match &result {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_population().await;
                }
            }
            Err(err) => self.record_error(err).await,
        }

        result
    }

    /// Decide whether the populated `context` may call `endpoint`
    ///
    /// Returns `Decision::Denied` when no rule grants; errors only when an
    /// assessor fails or the evaluation times out.
    pub async fn is_permitted(&self, endpoint: &str, context: &AclContext) -> Result<Decision> {
        let start = Instant::now();
        let rules = self.rules_for(endpoint);
        debug!("Evaluating {} rules for endpoint '{}'", rules.len(), endpoint);

        let result = self
            .bounded(
                "rule evaluation",
                self.config.evaluation_timeout,
                evaluate(&rules, |role| self.registry.read().resolve(role), context),
            )
            .await;

        match &result {
            Ok(decision) => {
                debug!("Decision for endpoint '{}': {}", endpoint, decision);
                if let Some(metrics) = &self.metrics {
                    metrics.record_latency(start.elapsed()).await;
                    metrics.record_decision(decision).await;
                }
            }
            Err(err) => self.record_error(err).await,
        }

        result
    }

    /// Check a single role; unknown roles are denied
    pub async fn has_role(&self, role: &str, context: &AclContext) -> Result<Credential> {
        let assessor = self.registry.read().resolve(role);
        check_role(assessor, context).await
    }

    /// Metrics snapshot, if metrics are enabled
    pub async fn metrics(&self) -> Option<AclMetrics> {
        match &self.metrics {
            Some(metrics) => Some(metrics.get_metrics().await),
            None => None,
        }
    }

    // Private helper methods

    async fn bounded<T>(
        &self,
        phase: &'static str,
        limit: Option<Duration>,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match limit {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| AclError::Timeout { phase, limit })?,
            None => work.await,
        }
    }

    async fn record_error(&self, err: &AclError) {
        warn!("Access control call failed: {}", err);
        if let Some(metrics) = &self.metrics {
            match err {
                AclError::Timeout { .. } => metrics.record_timeout().await,
                _ => metrics.record_failure().await,
            }
        }
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new(AclConfig::default())
    }
}
