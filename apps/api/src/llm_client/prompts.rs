// Cross-cutting prompt fragments.
// Feature modules compose their own system prompts from these plus local text.

/// Output-format directive appended to every JSON-mode system prompt.
pub const JSON_ONLY_DIRECTIVE: &str = "\
    Always respond only in pure JSON format, no markdown or HTML. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction against inventing facts not present in the input.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Only use facts stated in the user's text. Do NOT invent employers, dates, \
    degrees, contact details or metrics. Omit any field the text does not support.";
