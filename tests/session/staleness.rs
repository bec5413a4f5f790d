//! Out-of-order query resolution.

use crate::common::{ms, sample_index, StaticFetcher, INDEX_FILE};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use glean::session::{Effect, Env, Key, QueryRequest, SearchSession, UiEvent};
use glean::SessionConfig;
use std::cell::RefCell;
use std::rc::Rc;

fn requests(effects: &[Effect]) -> Vec<QueryRequest> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::RunQuery(r) => Some(r.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_late_results_of_an_old_query_are_dropped() {
    let (fetcher, gate) = StaticFetcher::new()
        .with(
            &format!("/{}", INDEX_FILE),
            200,
            sample_index().to_json().unwrap(),
        )
        .gated();
    let session = Rc::new(SearchSession::new(SessionConfig::default(), fetcher, "/"));

    session.dispatch(UiEvent::KeyDown(Key::Slash), &Env::at(ms(0)));
    session.dispatch(UiEvent::ModalInput("rust".into()), &Env::at(ms(0)));
    let first = requests(&session.dispatch(UiEvent::Tick, &Env::at(ms(150))));
    session.dispatch(UiEvent::ModalInput("bread".into()), &Env::at(ms(200)));
    let second = requests(&session.dispatch(UiEvent::Tick, &Env::at(ms(350))));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);

    // both queries wait on the one index load
    let resolved: Rc<RefCell<Vec<UiEvent>>> = Rc::default();
    let mut pool = LocalPool::new();
    for request in first.into_iter().chain(second) {
        let session = Rc::clone(&session);
        let resolved = Rc::clone(&resolved);
        pool.spawner()
            .spawn_local(async move {
                let event = session.run_query(&request).await;
                resolved.borrow_mut().push(event);
            })
            .unwrap();
    }
    pool.run_until_stalled();
    assert!(resolved.borrow().is_empty());
    assert_eq!(session.loader().fetcher().calls().len(), 1);

    gate.open();
    pool.run_until_stalled();
    let mut events = resolved.take();
    assert_eq!(events.len(), 2);

    // deliver the newer result first, then the stale one
    events.sort_by_key(|e| match e {
        UiEvent::QueryResolved(r) => std::cmp::Reverse(r.generation),
        _ => std::cmp::Reverse(0),
    });
    let env = Env::at(ms(400));
    let fresh = session.dispatch(events.remove(0), &env);
    assert!(!fresh.is_empty());
    let stale = session.dispatch(events.remove(0), &env);
    assert!(stale.is_empty());

    let state = session.state();
    assert_eq!(state.count().map(|c| c.query.as_str()), Some("bread"));
    assert_eq!(
        state.results().get(0).map(|i| i.href.as_str()),
        Some("/cooking/bread/")
    );
}

#[test]
fn test_results_arriving_after_close_are_dropped() {
    let fetcher = StaticFetcher::new().with(
        &format!("/{}", INDEX_FILE),
        200,
        sample_index().to_json().unwrap(),
    );
    let session = SearchSession::new(SessionConfig::default(), fetcher, "/");

    session.dispatch(UiEvent::KeyDown(Key::Slash), &Env::at(ms(0)));
    session.dispatch(UiEvent::ModalInput("rust".into()), &Env::at(ms(0)));
    let pending = requests(&session.dispatch(UiEvent::Tick, &Env::at(ms(150))));
    session.dispatch(UiEvent::KeyDown(Key::Escape), &Env::at(ms(160)));

    let late = futures::executor::block_on(session.run_query(&pending[0]));
    assert!(session.dispatch(late, &Env::at(ms(170))).is_empty());
    assert!(session.state().count().is_none());
}
