use credlens::{
    compute_statistics, extract_citations, extract_timeline, similarity_matrix, HistoryEngine,
    Language, NewAnalysis,
};

fn main() -> anyhow::Result<()> {
    println!("=== credlens Basic Usage Example ===\n");

    let article = "BREAKING: The city council approved the new transit plan on March 3, 2024. \
                   Critics called the plan a disaster, but the mayor said \"this is real progress\". \
                   Details: https://example.org/transit-plan.";

    // Example 1: Statistics for a single text
    println!("--- Example 1: Content statistics ---");
    let stats = compute_statistics(article, Language::English);
    println!("Words: {}, sentences: {}", stats.word_count, stats.sentence_count);
    println!("Top keywords: {:?}", stats.top_keywords);
    println!(
        "Tone: +{} / -{} / urgent {}",
        stats.emotional_tone.positive, stats.emotional_tone.negative, stats.emotional_tone.urgent
    );

    // Example 2: Timeline and citations
    println!("\n--- Example 2: Timeline and citations ---");
    let timeline = extract_timeline(article);
    println!("Dates: {:?}", timeline.dates_found);
    let citations = extract_citations(article);
    println!("Citations found: {}", citations.citation_count);

    // Example 3: Compare versions of a story
    println!("\n--- Example 3: Similarity ---");
    let versions = [
        "the council approved the transit plan",
        "the council rejected the transit plan",
        "weather will be sunny tomorrow",
    ];
    for row in similarity_matrix(&versions) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:6.1}", v)).collect();
        println!("{}", cells.join(" "));
    }

    // Example 4: History and patterns
    println!("\n--- Example 4: History patterns ---");
    let engine = HistoryEngine::in_memory()?;
    for (text, score) in [(versions[0], 80), (versions[1], 55), (versions[2], 60)] {
        engine.record(NewAnalysis {
            text: text.to_string(),
            credibility_score: score,
            warnings: vec!["single source".to_string()],
            ..Default::default()
        })?;
    }

    let report = engine.patterns()?;
    println!("Common keywords: {:?}", report.common_keywords);
    println!("Score jumps: {}", report.significant_changes.len());
    for warning in &report.recurring_warnings {
        println!("Recurring warning: {} (x{})", warning.warning, warning.occurrences);
    }

    println!("\n=== Example completed ===");
    Ok(())
}
