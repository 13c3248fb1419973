use async_trait::async_trait;

use super::requester::Requester;

/// Facts gathered about a requester and the course that owns a lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFacts {
    pub is_enrolled: bool,
    pub is_owner: bool,
    pub is_assigned_instructor: bool,
    pub is_admin: bool,
}

/// Which predicate granted access. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantReason {
    Admin,
    Owner,
    AssignedInstructor,
    Enrolled,
}

impl GrantReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantReason::Admin => "admin",
            GrantReason::Owner => "owner",
            GrantReason::AssignedInstructor => "assigned_instructor",
            GrantReason::Enrolled => "enrolled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Grant(GrantReason),
    Deny,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Grant(_))
    }
}

/// Grant iff any of the four predicates holds.
///
/// Evaluation order (first match names the reason):
/// 1. admin role
/// 2. primary owner
/// 3. delegated instructor
/// 4. enrollment
/// 5. deny
pub fn evaluate(facts: &AccessFacts) -> AccessDecision {
    if facts.is_admin {
        AccessDecision::Grant(GrantReason::Admin)
    } else if facts.is_owner {
        AccessDecision::Grant(GrantReason::Owner)
    } else if facts.is_assigned_instructor {
        AccessDecision::Grant(GrantReason::AssignedInstructor)
    } else if facts.is_enrolled {
        AccessDecision::Grant(GrantReason::Enrolled)
    } else {
        AccessDecision::Deny
    }
}

/// Policy evaluator trait for pluggable authorization logic
#[async_trait]
pub trait PolicyEvaluator: Send + Sync {
    async fn decide(&self, requester: &Requester, facts: &AccessFacts) -> AccessDecision;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultPolicyEvaluator;

impl DefaultPolicyEvaluator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PolicyEvaluator for DefaultPolicyEvaluator {
    async fn decide(&self, requester: &Requester, facts: &AccessFacts) -> AccessDecision {
        let decision = evaluate(facts);

        match decision {
            AccessDecision::Grant(reason) => tracing::debug!(
                user_id = %requester.user_id,
                role = %requester.role,
                reason = reason.as_str(),
                "lesson access granted"
            ),
            AccessDecision::Deny => tracing::debug!(
                user_id = %requester.user_id,
                role = %requester.role,
                "lesson access denied"
            ),
        }

        decision
    }
}
