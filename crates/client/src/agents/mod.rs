//! Search agents: a collaborator with the result cache in front of it.
//!
//! Agents never fail because of the cache or the collaborator. Input
//! validation is the only error path; everything else degrades to a
//! plain-text fallback the user can act on.

pub mod doctor;
pub mod web;

pub use doctor::{DoctorSearchAgent, DoctorSearchResult, SpecialtyDoctors};
pub use web::{WebAnswer, WebSearchAgent};
