//! Modal open/close and the slash shortcut.

use crate::common::{ms, root_fetcher, sample_index, Driver};
use glean::session::{Effect, Focus, Key, ModalState, ResultList, UiEvent};

#[test]
fn test_slash_in_text_field_types_normally() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.focus = Focus::TextField;
    assert!(d.key(Key::Slash).is_empty());
    assert!(!d.session.state().is_open());
}

#[test]
fn test_slash_opens_and_focuses_after_delay() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    let fx = d.key(Key::Slash);
    assert_eq!(fx[0], Effect::PreventDefault);
    assert!(fx.contains(&Effect::SetModalActive(true)));
    assert!(!fx.contains(&Effect::FocusModalInput));

    assert!(d.advance(ms(99)).is_empty());
    assert_eq!(d.advance(ms(1)), vec![Effect::FocusModalInput]);
}

#[test]
fn test_escape_restores_scroll_and_clears() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    let env = glean::Env {
        scroll_y: 1200.0,
        scrollbar_width: 12.0,
        ..d.env()
    };
    let fx = block_on_dispatch(&d, UiEvent::KeyDown(Key::Slash), &env);
    assert!(fx.contains(&Effect::LockScroll {
        top: 1200.0,
        padding_right: 12.0
    }));

    d.focus = Focus::ModalInput;
    d.send(UiEvent::ModalInput("rust".into()));
    d.settle();
    assert!(matches!(d.results(), ResultList::Items(_)));

    let fx = d.key(Key::Escape);
    assert!(fx.contains(&Effect::UnlockScroll { restore_to: 1200.0 }));
    assert!(fx.contains(&Effect::SetModalActive(false)));
    assert!(fx.contains(&Effect::RenderResults(ResultList::Empty)));
    assert!(fx.contains(&Effect::RenderCount(None)));
    assert!(fx.contains(&Effect::BlurNavbarInput));
    assert_eq!(d.session.state().modal(), ModalState::Closed);
    assert_eq!(d.session.state().selected(), None);
    assert_eq!(d.session.state().modal_value(), "");
}

#[test]
fn test_backdrop_click_closes() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.search("search");
    let fx = d.send(UiEvent::BackdropClick);
    assert!(fx.contains(&Effect::SetModalActive(false)));
    assert!(fx.contains(&Effect::SetNavbarValue(String::new())));
    assert!(!d.session.state().is_open());
}

#[test]
fn test_open_twice_keeps_first_scroll_position() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    let first = glean::Env {
        scroll_y: 300.0,
        ..d.env()
    };
    block_on_dispatch(&d, UiEvent::NavbarFocus, &first);

    let second = glean::Env {
        scroll_y: 0.0,
        ..d.env()
    };
    let fx = block_on_dispatch(&d, UiEvent::KeyDown(Key::Slash), &second);
    assert_eq!(fx, vec![Effect::PreventDefault]);
    assert_eq!(
        d.session.state().modal(),
        ModalState::Open {
            scroll_position: 300.0
        }
    );
}

#[test]
fn test_slash_icon_follows_navbar() {
    let mut d = Driver::new(root_fetcher(&sample_index()), "/");
    d.focus = Focus::NavbarInput;
    let fx = d.send(UiEvent::NavbarInput("ab".into()));
    assert_eq!(fx[0], Effect::SetSlashIconHidden(true));

    d.focus = Focus::Other;
    let fx = d.send(UiEvent::NavbarBlur);
    // still hidden: the navbar holds text
    assert_eq!(fx, vec![Effect::SetSlashIconHidden(true)]);

    let fx = d.key(Key::Escape);
    assert_eq!(fx.last(), Some(&Effect::SetSlashIconHidden(false)));
}

fn block_on_dispatch(d: &Driver, event: UiEvent, env: &glean::Env) -> Vec<Effect> {
    futures::executor::block_on(d.session.dispatch_and_settle(event, env))
}
