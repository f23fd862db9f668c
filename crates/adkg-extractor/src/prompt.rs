//! LLM prompt for biomedical triple extraction

/// Builds the few-shot extraction prompt for one abstract
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for an abstract
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + FEW_SHOT_EXAMPLE.len() + self.text.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(FEW_SHOT_EXAMPLE);
        prompt.push_str("\n\n");

        prompt.push_str("Now, extract the triples from the following abstract:\n\n");
        prompt.push_str("Abstract: \"");
        prompt.push_str(self.text);
        prompt.push_str("\"\nOutput:\n");

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an expert biomedical researcher. Your task is to extract relationships from a scientific abstract in the form of (Subject, Relation, Object) triples.

Follow these rules:
1. Extract facts related to APOE4, amyloid-beta, Alzheimer's Disease, and associated pathologies.
2. The output must be a valid JSON array of objects with the keys "subject", "relation" and "object".
3. If you cannot find any relevant triples in the abstract, you MUST return an empty JSON array: []."#;

const FEW_SHOT_EXAMPLE: &str = r#"Here is an example:
---
Abstract: "The APOE4 allele is the strongest genetic risk factor for Alzheimer's disease (AD). It impairs the clearance of amyloid-beta from the brain."
Output:
[
    {"subject": "APOE4 allele", "relation": "is strongest genetic risk factor for", "object": "Alzheimer's disease"},
    {"subject": "APOE4 allele", "relation": "impairs", "object": "clearance of amyloid-beta"}
]
---"#;
