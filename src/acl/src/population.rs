//! Priority-tiered context population
//!
//! Assessors are grouped by priority. Tiers run one after another, highest
//! priority first, with a full barrier between them; the assessors inside a
//! tier run concurrently. Facts written by a tier are therefore visible to
//! every later tier and to rule evaluation.

use crate::context::{AclContext, AclRequest};
use crate::error::Result;
use crate::registry::SharedAssessor;
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Assessors sharing one priority value
#[derive(Clone)]
pub struct PriorityTier {
    /// Shared priority of the tier
    pub priority: u32,

    /// Assessors in the tier, ordered by role name
    pub assessors: Vec<SharedAssessor>,
}

impl PriorityTier {
    /// Role names in the tier
    pub fn roles(&self) -> Vec<&str> {
        self.assessors.iter().map(|assessor| assessor.role()).collect()
    }
}

impl std::fmt::Debug for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityTier")
            .field("priority", &self.priority)
            .field("roles", &self.roles())
            .finish()
    }
}

/// Group assessors into tiers, highest priority first
pub fn group_by_priority(assessors: impl IntoIterator<Item = SharedAssessor>) -> Vec<PriorityTier> {
    let mut groups: BTreeMap<u32, Vec<SharedAssessor>> = BTreeMap::new();
    for assessor in assessors {
        groups.entry(assessor.priority()).or_default().push(assessor);
    }

    groups
        .into_iter()
        .rev()
        .map(|(priority, mut assessors)| {
            assessors.sort_by(|a, b| a.role().cmp(b.role()));
            PriorityTier {
                priority,
                assessors,
            }
        })
        .collect()
}

/// Run every tier's `init_context` against `context`
///
/// The first failing assessor aborts the call: its error is returned as-is,
/// the rest of its tier is dropped and later tiers never start.
pub async fn populate(
    tiers: &[PriorityTier],
    request: &AclRequest,
    context: &AclContext,
    remote_object: Option<&Value>,
) -> Result<()> {
    for tier in tiers {
        debug!(
            "Populating context: tier priority={} roles={:?}",
            tier.priority,
            tier.roles()
        );

        try_join_all(tier.assessors.iter().map(|assessor| async move {
            assessor
                .init_context(request, context, remote_object)
                .await
                .map_err(|err| {
                    error!("Context initialisation failed for role '{}': {}", assessor.role(), err);
                    err
                })
        }))
        .await?;
    }

    Ok(())
}
