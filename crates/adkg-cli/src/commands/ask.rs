//! Ask command implementation.

use super::LlmTask;
use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use adkg_domain::traits::{GraphStore, LlmProvider};
use adkg_domain::RelationRecord;
use tracing::info;

/// Reply given when there are no facts to answer from.
pub const EMPTY_GRAPH_ANSWER: &str = "The graph is empty.";

/// Execute the ask command.
pub fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let facts = {
        let store = super::open_store(&args.store, config)?;
        store.relations(args.limit)?
    };

    if facts.is_empty() {
        println!("{}", formatter.answer(&args.question, EMPTY_GRAPH_ANSWER, 0)?);
        return Ok(());
    }
    info!("Answering from {} facts", facts.len());

    let prompt = build_prompt(&args.question, &facts);
    let runtime = super::runtime()?;
    let answer = runtime.block_on(async {
        let provider = super::llm_provider(&args.llm, config, LlmTask::Ask)?;
        info!("Asking {}", provider.model_name());
        Ok::<_, crate::error::CliError>(provider.generate(&prompt).await?)
    })?;

    println!(
        "{}",
        formatter.answer(&args.question, answer.trim(), facts.len())?
    );
    Ok(())
}

/// Build the question-answering prompt, one fact per line.
pub fn build_prompt(question: &str, facts: &[RelationRecord]) -> String {
    let mut prompt = String::from(
        "You are answering questions about Alzheimer's disease research.\n\
         Based ONLY on the following facts, answer the question. If the facts do \
         not contain the answer, say that the knowledge graph does not contain \
         enough information.\n\nFACTS:\n",
    );

    for fact in facts {
        prompt.push_str(&format!(
            "- {} {} {}\n",
            fact.subject, fact.relation_type, fact.object
        ));
    }

    prompt.push_str(&format!("\nQUESTION:\n{}\n\nANSWER:", question));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LlmArgs, StoreArgs};
    use crate::config::OutputFormat;
    use adkg_domain::EntityLabel;
    use tempfile::tempdir;

    fn record(subject: &str, relation_type: &str, object: &str) -> RelationRecord {
        RelationRecord {
            subject: subject.to_string(),
            subject_label: EntityLabel::Other,
            relation_type: relation_type.to_string(),
            object: object.to_string(),
            object_label: EntityLabel::Other,
            evidence: "ev".to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_facts_and_question() {
        let facts = vec![
            record("APOE4 allele", "IMPAIRS", "clearance of amyloid-beta"),
            record("amyloid plaques", "PRECEDE", "cognitive decline"),
        ];

        let prompt = build_prompt("What does APOE4 impair?", &facts);

        assert!(prompt.contains("Based ONLY on the following facts"));
        assert!(prompt.contains("- APOE4 allele IMPAIRS clearance of amyloid-beta\n"));
        assert!(prompt.contains("- amyloid plaques PRECEDE cognitive decline\n"));
        assert!(prompt.ends_with("QUESTION:\nWhat does APOE4 impair?\n\nANSWER:"));
    }

    #[test]
    fn test_empty_graph_answers_without_service() {
        let dir = tempdir().unwrap();
        let args = AskArgs {
            question: "Anything?".to_string(),
            limit: 200,
            store: StoreArgs {
                backend: None,
                db: Some(dir.path().join("adkg.db")),
                neo4j_uri: None,
                neo4j_user: None,
                neo4j_password: None,
            },
            // No key: reaching the service would be a configuration error
            llm: LlmArgs {
                api_key: None,
                model: None,
            },
        };

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(execute_ask(args, &Config::default(), &formatter).is_ok());
    }
}
