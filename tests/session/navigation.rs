//! Keyboard and mouse selection over the rendered list.

use crate::common::{pets_index, root_fetcher, Driver};
use glean::session::{Effect, Focus, Key, UiEvent};
use proptest::prelude::*;

fn driver_with(n: usize) -> Driver {
    let mut d = Driver::new(root_fetcher(&pets_index(n)), "/");
    d.search("cats");
    d
}

#[test]
fn test_first_item_selected_after_render() {
    let d = driver_with(3);
    assert_eq!(d.selected(), Some(0));
    assert!(d.effects.contains(&Effect::Select { index: 0 }));
}

#[test]
fn test_arrow_keys_clamp_at_both_ends() {
    let mut d = driver_with(3);
    d.key(Key::ArrowUp);
    assert_eq!(d.selected(), Some(0));
    d.key(Key::ArrowDown);
    d.key(Key::ArrowDown);
    d.key(Key::ArrowDown);
    assert_eq!(d.selected(), Some(2));
}

#[test]
fn test_arrow_keys_prevent_default() {
    let mut d = driver_with(2);
    let fx = d.key(Key::ArrowDown);
    assert_eq!(fx, vec![Effect::PreventDefault, Effect::Select { index: 1 }]);
}

#[test]
fn test_arrows_ignored_when_focus_elsewhere() {
    let mut d = driver_with(3);
    d.focus = Focus::Other;
    assert!(d.key(Key::ArrowDown).is_empty());
    assert_eq!(d.selected(), Some(0));
}

#[test]
fn test_enter_navigates_to_selected() {
    let mut d = driver_with(3);
    d.send(UiEvent::ItemHover(2));
    let fx = d.key(Key::Enter);
    let href = d.session.state().results().get(2).map(|i| i.href.clone());
    assert_eq!(fx.last().cloned(), href.map(Effect::Navigate));
}

#[test]
fn test_click_navigates() {
    let mut d = driver_with(3);
    let fx = d.send(UiEvent::ItemClick(1));
    assert!(matches!(fx.as_slice(), [Effect::Navigate(href)] if href.starts_with("/pets/")));
}

#[test]
fn test_new_query_clears_selection() {
    let mut d = driver_with(3);
    d.key(Key::ArrowDown);
    d.send(UiEvent::ModalInput("dogs".into()));
    d.advance(crate::common::ms(150));
    // results re-rendered; auto-select has not fired yet
    assert_eq!(d.selected(), None);
    d.settle();
    assert_eq!(d.selected(), Some(0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selection_stays_in_range(n in 1usize..8, keys in prop::collection::vec(prop::bool::ANY, 0..30)) {
        let mut d = driver_with(n);
        for down in keys {
            d.key(if down { Key::ArrowDown } else { Key::ArrowUp });
            let selected = d.selected();
            prop_assert!(selected.is_some_and(|i| i < n));
        }
    }
}
