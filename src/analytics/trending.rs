// Trending Ranker - time-windowed view counts over filtered posts
//
// Full scan: every admitted post's view log is walked per query. There is no
// incremental index, so cost grows with users x posts x views.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, instrument};

use super::filters::PostFilter;
use crate::config::TrendingConfig;
use crate::error::AppResult;
use crate::infrastructure::{Post, SocialGraph, View};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendingQuery {
    /// Trailing window measured back from the evaluation instant
    pub window: TimeDelta,
    pub filter: PostFilter,
}

impl Default for TrendingQuery {
    fn default() -> Self {
        Self {
            window: TimeDelta::hours(24),
            filter: PostFilter::default(),
        }
    }
}

impl TrendingQuery {
    pub fn new(window: TimeDelta) -> Self {
        Self {
            window,
            filter: PostFilter::default(),
        }
    }

    pub fn from_config(config: &TrendingConfig) -> AppResult<Self> {
        Ok(Self::new(config.window()?))
    }

    pub fn with_filter(mut self, filter: PostFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrendingPost<'g> {
    pub post: &'g Post,
    pub author: &'g str,
    pub recent_view_count: usize,
}

/// Rank admitted posts by views inside the window, evaluated at the graph
/// clock's current instant. Equal counts keep store order.
#[instrument(skip(graph), fields(window_secs = query.window.num_seconds()))]
pub fn trending<'g>(graph: &'g SocialGraph, query: &TrendingQuery) -> Vec<TrendingPost<'g>> {
    trending_at(graph, query, graph.now())
}

/// Same as [`trending`] with an explicit evaluation instant
pub fn trending_at<'g>(
    graph: &'g SocialGraph,
    query: &TrendingQuery,
    now: DateTime<Utc>,
) -> Vec<TrendingPost<'g>> {
    let mut ranked: Vec<TrendingPost<'g>> = query
        .filter
        .select(graph)
        .into_iter()
        .map(|(user, post)| TrendingPost {
            post,
            author: user.id.as_str(),
            recent_view_count: recent_views(&post.views, query.window, now),
        })
        .collect();

    // Stable: ties stay in store order
    ranked.sort_by(|a, b| b.recent_view_count.cmp(&a.recent_view_count));
    info!(results = ranked.len(), "trending posts ranked");
    ranked
}

/// Views no older than `window` at `now`; the boundary itself counts
pub fn recent_views(views: &[View], window: TimeDelta, now: DateTime<Utc>) -> usize {
    views
        .iter()
        .filter(|view| now - view.viewed_at <= window)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes;
    use crate::error::AppError;
    use crate::types::{Attributes, ManualClock};
    use std::sync::Arc;

    fn island_graph() -> (Arc<ManualClock>, SocialGraph) {
        let clock = Arc::new(ManualClock::at_epoch());
        let mut graph = SocialGraph::with_clock(clock.clone());
        graph.add_user("a", attributes! { "loc" => "X" }).unwrap();
        graph.add_user("b", attributes! { "loc" => "Y" }).unwrap();
        let pa = graph.create_post("a", "hello island").unwrap();
        let pb = graph.create_post("b", "hello island").unwrap();
        for _ in 0..5 {
            graph.view_post("b", pa).unwrap();
        }
        for _ in 0..3 {
            graph.view_post("a", pb).unwrap();
        }
        (clock, graph)
    }

    #[test]
    fn test_attribute_filter_scenario() {
        let (_, graph) = island_graph();
        let query = TrendingQuery::default().with_filter(PostFilter::new().with_attribute("loc", "X"));
        let results = trending(&graph, &query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].author, "a");
        assert_eq!(results[0].recent_view_count, 5);
        assert_eq!(results[0].post.content, "hello island");
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let clock = Arc::new(ManualClock::at_epoch());
        let mut graph = SocialGraph::with_clock(clock.clone());
        graph.add_user("u1", Attributes::new()).unwrap();
        graph.add_user("u2", Attributes::new()).unwrap();
        let p1 = graph.create_post("u1", "first").unwrap();
        let p2 = graph.create_post("u1", "second").unwrap();
        let p3 = graph.create_post("u2", "third").unwrap();
        let p4 = graph.create_post("u2", "fourth").unwrap();
        for (post, views) in [(p1, 1), (p2, 4), (p3, 1), (p4, 4)] {
            for _ in 0..views {
                graph.view_post("u1", post).unwrap();
            }
        }

        let results = trending(&graph, &TrendingQuery::default());
        let order: Vec<_> = results.iter().map(|r| r.post.id).collect();
        assert_eq!(order, vec![p2, p4, p1, p3]);
        assert!(results
            .windows(2)
            .all(|pair| pair[0].recent_view_count >= pair[1].recent_view_count));
    }

    #[test]
    fn test_window_excludes_old_views_and_keeps_boundary() {
        let (clock, mut graph) = island_graph();
        let pa = graph.user("a").unwrap().posts[0];

        clock.advance(TimeDelta::hours(2));
        graph.view_post("b", pa).unwrap();
        clock.advance(TimeDelta::hours(1));

        let query = TrendingQuery::new(TimeDelta::hours(1));
        let results = trending(&graph, &query);
        assert_eq!(results[0].post.id, pa);
        assert_eq!(results[0].recent_view_count, 1);
        assert_eq!(results[1].recent_view_count, 0);
    }

    #[test]
    fn test_zero_window_counts_only_views_at_now() {
        let (clock, mut graph) = island_graph();
        let pa = graph.user("a").unwrap().posts[0];

        clock.advance(TimeDelta::milliseconds(1));
        let results = trending(&graph, &TrendingQuery::new(TimeDelta::zero()));
        assert!(results.iter().all(|r| r.recent_view_count == 0));

        graph.view_post("b", pa).unwrap();
        let results = trending(&graph, &TrendingQuery::new(TimeDelta::zero()));
        assert_eq!(results[0].post.id, pa);
        assert_eq!(results[0].recent_view_count, 1);
    }

    #[test]
    fn test_excluded_keyword_drops_post_regardless_of_views() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", Attributes::new()).unwrap();
        let hot = graph.create_post("a", "What the hell").unwrap();
        let calm = graph.create_post("a", "Sunny beach day").unwrap();
        for _ in 0..50 {
            graph.view_post("a", hot).unwrap();
        }
        graph.view_post("a", calm).unwrap();

        let query = TrendingQuery::default().with_filter(PostFilter::new().exclude(["hell"]));
        let results = trending(&graph, &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].post.id, calm);
        assert_eq!(results[0].recent_view_count, 1);
    }

    #[test]
    fn test_exclude_matches_inside_words() {
        // "hello island" contains "hell"
        let (_, graph) = island_graph();
        let query = TrendingQuery::default().with_filter(PostFilter::new().exclude(["hell"]));
        assert!(trending(&graph, &query).is_empty());
    }

    #[test]
    fn test_include_and_exclude_same_keyword_is_empty() {
        let (_, graph) = island_graph();
        let filter = PostFilter::new().include(["island"]).exclude(["island"]);
        assert!(trending(&graph, &TrendingQuery::default().with_filter(filter)).is_empty());
    }

    #[test]
    fn test_posts_without_views_are_listed() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", Attributes::new()).unwrap();
        graph.create_post("a", "nobody saw this").unwrap();

        let results = trending(&graph, &TrendingQuery::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recent_view_count, 0);
        assert!(trending(&SocialGraph::new(), &TrendingQuery::default()).is_empty());
    }

    #[test]
    fn test_query_from_config() {
        let query = TrendingQuery::from_config(&TrendingConfig { window_hours: 6 }).unwrap();
        assert_eq!(query.window, TimeDelta::hours(6));
        assert_eq!(query.filter, PostFilter::default());
    }

    #[test]
    fn test_query_from_config_rejects_oversized_window() {
        let result = TrendingQuery::from_config(&TrendingConfig { window_hours: i64::MAX });
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
