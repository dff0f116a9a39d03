//! Sequential rule resolution
//!
//! Rules are evaluated strictly in list order. Each rule's role is checked
//! against the populated context and the resulting credential is folded
//! into the running decision with [`Decision::apply`]. Evaluation starts
//! from [`Decision::Denied`], so a list in which no role holds denies.

use crate::context::AclContext;
use crate::decision::{Credential, Decision};
use crate::error::Result;
use crate::registry::SharedAssessor;
use crate::types::Rule;
use tracing::{debug, trace};

/// Ask `assessor` for its credential; a missing assessor denies
pub async fn check_role(
    assessor: Option<SharedAssessor>,
    context: &AclContext,
) -> Result<Credential> {
    match assessor {
        Some(assessor) => assessor.has_role(context).await,
        None => Ok(Credential::Denied),
    }
}

/// Fold `rules` into a single decision
///
/// `lookup` maps a role name to its assessor. It is called once per rule,
/// right before that rule is checked, so no registry lock needs to be held
/// across an assessor call. Assessor errors abort the fold unchanged.
pub async fn evaluate<F>(rules: &[Rule], lookup: F, context: &AclContext) -> Result<Decision>
where
    F: Fn(&str) -> Option<SharedAssessor>,
{
    let mut decision = Decision::Denied;

    for (index, rule) in rules.iter().enumerate() {
        let assessor = lookup(&rule.role);
        if assessor.is_none() {
            trace!("Rule {}: no assessor registered for role '{}'", index, rule.role);
        }

        let credential = check_role(assessor, context).await?;
        debug!(
            "Rule {}: role='{}' granted={}",
            index,
            rule.role,
            credential.is_granted()
        );

        decision = decision.apply(rule, credential);
    }

    Ok(decision)
}
