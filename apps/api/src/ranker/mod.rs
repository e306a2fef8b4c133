// Resume Ranker: many resumes against one job description, plus simulated
// interview invitations for ranked candidates.

pub mod handlers;
pub mod invites;
pub mod models;
pub mod prompts;
pub mod ranking;
