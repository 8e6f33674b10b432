// Shared prompt fragments. Each feature that calls the model keeps its own prompts.rs
// alongside it and composes these where they apply.

/// Output constraint appended to every prompt that expects a JSON document back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Output ONLY the JSON document. \
    Do NOT wrap it in markdown code fences. \
    Do NOT add commentary, explanations, or apologies before or after it.";

/// Truthfulness constraint for any prompt that rewrites user-supplied career facts.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Do NOT invent companies, roles, dates, degrees, schools, or metrics. \
    Only rephrase, reorder, and emphasize what already exists in the input.";
