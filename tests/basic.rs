use std::sync::Arc;

use chrono::TimeDelta;
use social_trends::{
    analytics::{
        extract_top_words, score, trending, Criterion, CorpusOptions, PostFilter, TrendingQuery,
        WordListCensor,
    },
    attributes,
    models::GraphSnapshot,
    types::{Attributes, ManualClock},
    AppError, SocialGraph,
};

#[test]
fn test_interactions_feed_trending_and_importance() {
    let clock = Arc::new(ManualClock::at_epoch());
    let mut graph = SocialGraph::with_clock(clock.clone());
    graph.add_user("alice", attributes! { "location" => "Oahu", "age" => 30 }).unwrap();
    graph.add_user("bob", attributes! { "location" => "Oahu", "age" => 25 }).unwrap();
    graph.add_user("dave", attributes! { "location" => "Maui" }).unwrap();
    graph.add_relationship("bob", "alice", "follows").unwrap();
    graph.add_relationship("dave", "alice", "follows").unwrap();

    let beach = graph.create_post("alice", "Exploring beautiful Oahu!").unwrap();
    let swear = graph.create_post("bob", "What a damn good day!").unwrap();
    let volcano = graph.create_post("dave", "Just finished hiking a volcano.").unwrap();

    // Old traffic on the volcano post falls out of a one-day window
    for _ in 0..10 {
        graph.view_post("alice", volcano).unwrap();
    }
    clock.advance(TimeDelta::hours(30));
    for viewer in ["bob", "dave", "bob"] {
        graph.view_post(viewer, beach).unwrap();
    }
    graph.view_post("alice", swear).unwrap();
    graph.comment_on_post("bob", beach, "Wish I was there").unwrap();

    let all = trending(&graph, &TrendingQuery::default());
    let ranked: Vec<_> = all.iter().map(|t| (t.post.id, t.recent_view_count)).collect();
    assert_eq!(ranked, vec![(beach, 3), (swear, 1), (volcano, 0)]);

    let oahu_clean = TrendingQuery::default().with_filter(
        PostFilter::new()
            .with_attribute("location", "Oahu")
            .exclude(["damn"]),
    );
    let results = trending(&graph, &oahu_clean);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].author, "alice");

    let post = graph.post(volcano).unwrap();
    assert_eq!(score(post, Criterion::Views), 10.0);
    let post = graph.post(beach).unwrap();
    assert_eq!(score(post, Criterion::Blend), 1.0 + 0.5 * 3.0);

    assert_eq!(graph.in_degree("alice").unwrap(), 2);
    assert_eq!(graph.seen_posts_of("bob").unwrap().len(), 1);
}

#[test]
fn test_unknown_references_are_reported() {
    let mut graph = SocialGraph::new();
    graph.add_user("alice", Attributes::new()).unwrap();
    let post = graph.create_post("alice", "hello").unwrap();

    assert_eq!(
        graph.view_post("ghost", post),
        Err(AppError::UnknownUser("ghost".to_string()))
    );
    assert!(matches!(
        graph.add_user("alice", Attributes::new()),
        Err(AppError::DuplicateUser(id)) if id == "alice"
    ));
    assert!(matches!("likes".parse::<Criterion>(), Err(AppError::InvalidCriterion(_))));
}

#[test]
fn test_word_corpus_for_filtered_authors() {
    let mut graph = SocialGraph::new();
    graph.add_user("eve", attributes! { "location" => "Oahu" }).unwrap();
    graph.add_user("taylor", attributes! { "location" => "Maui" }).unwrap();
    graph.create_post("eve", "Loving life on the islands!").unwrap();
    graph.create_post("eve", "This island is amazing, hell yeah!").unwrap();
    graph.create_post("taylor", "Scuba diving in Maui is so much fun!").unwrap();

    let options = CorpusOptions::default()
        .with_filter(PostFilter::new().with_attribute("location", "Oahu"));
    let corpus = extract_top_words(&graph, &options, &WordListCensor::with_default_dictionary());

    assert_eq!(
        corpus.top_words,
        vec!["Loving", "life", "islands", "This", "island", "amazing", "yeah"]
    );
    assert_eq!(corpus.text, "Loving life islands This island amazing yeah");
}

#[test]
fn test_snapshot_reflects_graph() {
    let mut graph = SocialGraph::new();
    graph.add_user("alice", Attributes::new()).unwrap();
    graph.add_user("bob", Attributes::new()).unwrap();
    graph.add_relationship("alice", "bob", "follows").unwrap();
    graph.add_relationship("alice", "bob", "blocked").unwrap();
    graph.create_post("bob", "hi").unwrap();

    let snapshot = GraphSnapshot::from_graph(&graph);
    assert_eq!(snapshot.nodes.len(), 3);
    assert_eq!(snapshot.edges[0].labels, vec!["follows", "blocked"]);
    assert!(snapshot.to_json().unwrap().contains("\"post:1\""));
}

#[test]
fn test_tracing_setup_is_reentrant() {
    social_trends::initialize_tracing();
    social_trends::initialize_tracing();
}
