// AI refine: prompt construction, JSON recovery from model text, resume shape validation,
// and the refine pipeline with cancel-by-replacement.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod refiner;
pub mod validation;
