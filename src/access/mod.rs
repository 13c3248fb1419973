//! Lesson video access resolution.
//!
//! `Start -> Authenticate -> ResolveLesson -> EvaluatePredicates -> (Grant -> IssueUrl | Deny)`

mod error;
mod resolver;

pub use error::AccessError;
pub use resolver::{LessonAccessResolver, VideoAccess};
