//! Authorization module - lesson access policy
//!
//! The decision is a pure function over a small set of boolean facts:
//! - enrollment in the lesson's course
//! - primary ownership of the course
//! - delegated instructor assignment on the course
//! - admin role

mod policy;
mod requester;

pub use policy::{evaluate, AccessDecision, AccessFacts, DefaultPolicyEvaluator, GrantReason, PolicyEvaluator};
pub use requester::{Requester, Role, UnknownRole};
