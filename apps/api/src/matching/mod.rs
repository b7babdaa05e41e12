// Skill-based matching engine.
// Pure scoring, ranking and gap analysis over value snapshots; the orchestrator
// is the only part that reaches the profile/job stores.

pub mod gap;
pub mod handlers;
pub mod orchestrator;
pub mod policy;
pub mod ranking;
pub mod scoring;
pub mod validation;

#[cfg(test)]
mod properties;
