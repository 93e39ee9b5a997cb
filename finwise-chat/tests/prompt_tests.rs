//! Tests for prompt layout and the character budget.

use chrono::Utc;
use finwise_chat::prompt::{
    CONTEXT_DELIMITER, DEFAULT_HEADER, EMPTY_CONTEXT, PromptBuilder,
};
use finwise_rag::{DocumentChunk, ScoredChunk};
use proptest::prelude::*;

fn scored(text: &str) -> ScoredChunk {
    ScoredChunk {
        chunk: DocumentChunk {
            id: format!("id-{}", text.len()),
            text: text.to_string(),
            file_name: "guide.txt".to_string(),
            file_type: "txt".to_string(),
            uploader_id: "user-1".to_string(),
            chunk_index: 0,
            total_chunks: 1,
            category: "financial_literacy".to_string(),
            upload_timestamp: Utc::now(),
            embedding: Vec::new(),
        },
        score: 0.9,
    }
}

#[test]
fn empty_context_uses_placeholder() {
    let built = PromptBuilder::new().build("Where do I start?", &[]);
    assert_eq!(built.included, 0);
    assert_eq!(
        built.text,
        format!("{DEFAULT_HEADER}\n\nCONTEXT:\n{EMPTY_CONTEXT}\n\nWhere do I start?")
    );
}

#[test]
fn chunks_appear_verbatim_in_rank_order() {
    let chunks = vec![scored("First fact."), scored("Second fact, longer.")];
    let built = PromptBuilder::new().build("Where do I start?", &chunks);
    assert_eq!(built.included, 2);
    assert_eq!(
        built.text,
        format!(
            "{DEFAULT_HEADER}\n\nCONTEXT:\nFirst fact.{CONTEXT_DELIMITER}Second fact, longer.\n\nWhere do I start?"
        )
    );
}

#[test]
fn building_is_deterministic() {
    let chunks = vec![scored("One."), scored("Two.")];
    let builder = PromptBuilder::new();
    assert_eq!(builder.build("q", &chunks), builder.build("q", &chunks));
}

// With header "H" and query "q" the fixed scaffolding is 15 characters:
// one for the header, one for the query, and 13 for the newlines plus
// "CONTEXT:". Three 120-character chunks joined by two 5-character
// delimiters add 370 more.
#[test]
fn budget_drops_whole_chunks_from_the_low_ranked_end() {
    let chunks = vec![
        scored(&"a".repeat(120)),
        scored(&"b".repeat(120)),
        scored(&"c".repeat(120)),
    ];

    let full = PromptBuilder::new()
        .with_header("H")
        .with_max_prompt_chars(385)
        .build("q", &chunks);
    assert_eq!(full.included, 3);
    assert_eq!(full.text.chars().count(), 385);

    let trimmed = PromptBuilder::new()
        .with_header("H")
        .with_max_prompt_chars(384)
        .build("q", &chunks);
    assert_eq!(trimmed.included, 2);
    assert!(trimmed.text.contains(&"a".repeat(120)));
    assert!(trimmed.text.contains(&"b".repeat(120)));
    assert!(!trimmed.text.contains(&"c".repeat(120)));

    let single = PromptBuilder::new()
        .with_header("H")
        .with_max_prompt_chars(135)
        .build("q", &chunks);
    assert_eq!(single.included, 1);
}

#[test]
fn query_survives_even_an_impossible_budget() {
    let chunks = vec![scored(&"a".repeat(120))];
    let built = PromptBuilder::new()
        .with_header("H")
        .with_max_prompt_chars(10)
        .build("q", &chunks);
    assert_eq!(built.included, 0);
    assert_eq!(built.text, format!("H\n\nCONTEXT:\n{EMPTY_CONTEXT}\n\nq"));
}

#[test]
fn rebuilding_from_the_included_prefix_gives_the_same_prompt() {
    let chunks = vec![
        scored(&"a".repeat(120)),
        scored(&"b".repeat(120)),
        scored(&"c".repeat(120)),
    ];
    let builder = PromptBuilder::new().with_header("H").with_max_prompt_chars(384);

    let first = builder.build("q", &chunks);
    assert_eq!(first.included, 2);
    let second = builder.build("q", &chunks[..first.included]);
    assert_eq!(first.text, second.text);
    assert_eq!(second.included, 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: budget compliance**
    /// Whenever at least one chunk is included, the rendered prompt fits
    /// the budget; the query and header always survive.
    #[test]
    fn included_chunks_imply_budget_compliance(
        texts in proptest::collection::vec("[a-z ]{0,200}", 0..6),
        budget in 50usize..5000,
        query in "[a-z ?]{1,40}",
    ) {
        let chunks: Vec<ScoredChunk> = texts.iter().map(|t| scored(t)).collect();
        let built = PromptBuilder::new().with_max_prompt_chars(budget).build(&query, &chunks);

        prop_assert!(built.included <= chunks.len());
        if built.included > 0 {
            prop_assert!(built.text.chars().count() <= budget);
        }
        prop_assert!(built.text.starts_with(DEFAULT_HEADER));
        prop_assert!(built.text.ends_with(&query));
    }
}
