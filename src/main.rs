// Social Trends demo report - seeds an island community and prints trending, word and importance reports

use rand::seq::IndexedRandom;
use rand::Rng;

use social_trends::{
    analytics::{
        extract_top_words, rank_by_importance, trending, CachedCensor, CorpusOptions, Criterion,
        PostFilter, TrendingPost, TrendingQuery, WordListCensor,
    },
    attributes,
    config::Config,
    initialize_tracing,
    types::PostId,
    SocialGraph,
};

const REPORT_SIZE: usize = 3;

fn main() -> anyhow::Result<()> {
    initialize_tracing();

    let config = Config::from_env()?;
    let mut graph = SocialGraph::new();
    let posts = seed_community(&mut graph)?;
    simulate_views(&mut graph, &posts)?;

    let window = TrendingQuery::from_config(&config.trending)?;

    print_trending(
        "Trending Posts (Location: Oahu, Without Profanity)",
        trending(
            &graph,
            &window.clone().with_filter(
                PostFilter::new()
                    .exclude(["damn", "hell", "fucking"])
                    .with_attribute("location", "Oahu"),
            ),
        ),
    );
    print_trending(
        "Trending Posts Including the Word 'island'",
        trending(&graph, &window.clone().with_filter(PostFilter::new().include(["island"]))),
    );
    print_trending(
        "Trending Posts (Female Users Aged 22)",
        trending(
            &graph,
            &window.with_filter(
                PostFilter::new()
                    .with_attribute("gender", "Female")
                    .with_attribute("age", 22),
            ),
        ),
    );

    let censor = CachedCensor::new(
        WordListCensor::with_default_dictionary(),
        config.censor.cache_capacity,
    );
    let corpus = extract_top_words(&graph, &CorpusOptions::from_config(&config.corpus), &censor);
    println!("\nTop words: {}", corpus.top_words.join(", "));

    println!("\nTop {} Posts by Importance (blend):", REPORT_SIZE);
    for scored in rank_by_importance(&graph, Criterion::Blend).iter().take(REPORT_SIZE) {
        println!(
            "Author: {}, Content: {}, Score: {:.1}",
            scored.post.author, scored.post.content, scored.score
        );
    }

    Ok(())
}

fn seed_community(graph: &mut SocialGraph) -> anyhow::Result<Vec<PostId>> {
    let users = [
        ("alice", "Alice Smith", 30, "Oahu", "Female"),
        ("bob", "Bob Jones", 25, "Oahu", "Male"),
        ("carol", "Carol White", 35, "Oahu", "Female"),
        ("dave", "Dave Brown", 28, "Maui", "Male"),
        ("eve", "Eve Davis", 22, "Oahu", "Female"),
        ("james", "James Smith", 19, "Kauai", "Male"),
        ("maria", "Maria Garcia", 23, "Oahu", "Female"),
        ("william", "William Johnson", 20, "Maui", "Male"),
        ("taylor", "Taylor Jackson", 22, "Maui", "Female"),
    ];
    for (id, name, age, location, gender) in users {
        graph.add_user(
            id,
            attributes! {
                "real_name" => name,
                "age" => age,
                "location" => location,
                "gender" => gender,
            },
        )?;
    }

    let contents = [
        ("alice", "Exploring beautiful Oahu!"),
        ("bob", "What a damn good day!"),
        ("carol", "Learning Python is fucking fun!"),
        ("dave", "Just finished hiking a volcano."),
        ("eve", "Loving life on the islands!"),
        ("eve", "This island is amazing, hell yeah!"),
        ("james", "Learning photography to capture island beauty."),
        ("james", "Reading about Hawaiian history."),
        ("maria", "Excited to start a new adventure!"),
        ("maria", "Learning how to bake this weekend."),
        ("william", "Attending a cultural event in Maui."),
        ("william", "Learning to cook traditional Hawaiian dishes."),
        ("taylor", "Scuba diving in Maui is so much fun!"),
        ("taylor", "Enjoying a calm evening on the beach."),
    ];
    let mut posts = Vec::with_capacity(contents.len());
    for (author, content) in contents {
        posts.push(graph.create_post(author, content)?);
    }
    Ok(posts)
}

/// Uneven traffic: each post gets 1..=200 views from random community members
fn simulate_views(graph: &mut SocialGraph, posts: &[PostId]) -> anyhow::Result<()> {
    let viewers: Vec<String> = graph.users().map(|u| u.id.clone()).collect();
    let mut rng = rand::rng();

    for &post in posts {
        for _ in 0..rng.random_range(1..=200) {
            if let Some(viewer) = viewers.choose(&mut rng) {
                graph.view_post(viewer, post)?;
            }
        }
    }
    Ok(())
}

fn print_trending(title: &str, results: Vec<TrendingPost<'_>>) {
    println!("\nTop {} {}:", REPORT_SIZE, title);
    for trend in results.iter().take(REPORT_SIZE) {
        println!(
            "Author: {}, Content: {}, Views: {}",
            trend.author, trend.post.content, trend.recent_view_count
        );
    }
}
