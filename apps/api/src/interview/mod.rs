// Interview Coach: FAANG-style problem generation, clarifications, scorecards.
// All gateway calls go through llm_client; the countdown runs on its own task.

pub mod coach;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod timer;
