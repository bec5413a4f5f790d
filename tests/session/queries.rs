//! Debounced querying, result rendering, and index acquisition.

use crate::common::{ms, pets_index, queries, root_fetcher, sample_index, Driver, StaticFetcher};
use glean::session::{Effect, Focus, LoadStatus, ResultList, UiEvent};

#[test]
fn test_typing_burst_runs_one_query() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.key(glean::session::Key::Slash);
    d.focus = Focus::ModalInput;

    let mut fx = Vec::new();
    for value in ["s", "se", "sea", "sear", "search"] {
        fx.extend(d.send(UiEvent::ModalInput(value.into())));
        fx.extend(d.advance(ms(40)));
    }
    assert!(queries(&fx).is_empty());

    fx.extend(d.settle());
    assert_eq!(queries(&fx), vec!["search"]);
    assert_eq!(d.session.loader().fetcher().calls().len(), 1);
}

#[test]
fn test_identical_query_does_nothing() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.search("search");
    let before = d.results();

    d.send(UiEvent::ModalInput("search ".into()));
    let fx = d.settle();
    assert!(queries(&fx).is_empty());
    assert!(!fx.iter().any(|e| matches!(e, Effect::RenderResults(_))));
    assert_eq!(d.results(), before);
}

#[test]
fn test_and_query_counts_everything_renders_ten() {
    let mut d = Driver::new(root_fetcher(&pets_index(15)), "/pets/3/");
    d.search("cats and dogs");

    let state = d.session.state();
    let count = state.count().expect("count line shown");
    assert_eq!(count.total, 15);
    assert_eq!(
        count.to_html(),
        r#"15 results for "<strong>cats and dogs</strong>""#
    );
    match state.results() {
        ResultList::Items(items) => {
            assert_eq!(items.len(), 10);
            assert!(items
                .iter()
                .all(|i| i.teaser.contains("<b>Cats</b>") && i.teaser.contains("<b>dogs</b>")));
        }
        other => panic!("expected items, got {:?}", other),
    }
    assert_eq!(state.selected(), Some(0));
}

#[test]
fn test_scoped_404_falls_back_to_root() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/blog/some-post/");
    d.search("rust");
    assert_eq!(
        d.session.loader().fetcher().calls(),
        vec!["/blog/search_index.en.json", "/search_index.en.json"]
    );
    assert!(matches!(d.results(), ResultList::Items(_)));
}

#[test]
fn test_missing_index_renders_no_results() {
    let mut d = Driver::new(StaticFetcher::new(), "/blog/some-post/");
    d.search("rust");
    assert_eq!(d.results(), ResultList::NoResults);
    assert!(d.session.state().count().is_none());
    assert_eq!(d.selected(), None);
    assert_eq!(d.session.loader().status(), LoadStatus::Failed);

    // the failure is cached: a new query does not refetch
    d.send(UiEvent::ModalInput("ownership".into()));
    d.settle();
    assert_eq!(d.session.loader().fetcher().calls().len(), 2);
}

#[test]
fn test_index_loaded_once_across_queries() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.search("rust");
    d.send(UiEvent::ModalInput("teasers".into()));
    d.settle();
    d.send(UiEvent::ModalInput("bread".into()));
    d.settle();
    assert_eq!(d.session.loader().fetcher().calls().len(), 1);

    let state = d.session.state();
    let first = state.results().get(0).expect("bread matches");
    assert_eq!(first.href, "/cooking/bread/");
    assert_eq!(first.title, "Baking bread");
}

#[test]
fn test_unmatched_query_shows_placeholder() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.search("zebra");
    assert_eq!(d.results(), ResultList::NoResults);
    assert!(d.results().to_html().contains("No results found..."));
}

#[test]
fn test_clearing_the_query_clears_results() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.search("rust");
    d.send(UiEvent::ModalInput(String::new()));
    let fx = d.settle();
    assert!(fx.contains(&Effect::RenderCount(None)));
    assert_eq!(d.results(), ResultList::Empty);
    assert!(d.session.state().is_open());
}
