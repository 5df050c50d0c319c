use sportspro_terminal::state::{AppState, FetchState, MatchSummary, Navigator, Screen, Tab};

fn summary(id: &str, started: bool, ended: bool) -> MatchSummary {
    MatchSummary {
        id: id.to_string(),
        name: format!("Match {id}"),
        date: "2026-07-14".to_string(),
        venue: "Test Ground".to_string(),
        status: String::new(),
        match_started: started,
        match_ended: ended,
    }
}

#[test]
fn splash_is_the_initial_screen() {
    let nav = Navigator::new();
    assert_eq!(nav.current(), &Screen::Splash);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn replace_keeps_depth_one() {
    let mut nav = Navigator::new();
    nav.replace(Screen::List);
    assert_eq!(nav.current(), &Screen::List);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn push_then_pop_returns_to_list() {
    let mut nav = Navigator::new();
    nav.replace(Screen::List);
    nav.push(Screen::Details {
        match_id: "m1".to_string(),
    });
    assert_eq!(nav.depth(), 2);
    assert!(matches!(nav.current(), Screen::Details { match_id } if match_id == "m1"));

    nav.pop();
    assert_eq!(nav.current(), &Screen::List);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn pop_at_root_is_a_noop() {
    let mut nav = Navigator::new();
    nav.replace(Screen::List);
    nav.pop();
    assert_eq!(nav.current(), &Screen::List);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn push_while_on_details_is_a_noop() {
    let mut nav = Navigator::new();
    nav.replace(Screen::List);
    nav.push(Screen::Details {
        match_id: "first".to_string(),
    });
    nav.push(Screen::Details {
        match_id: "second".to_string(),
    });
    assert_eq!(nav.depth(), 2);
    assert!(matches!(nav.current(), Screen::Details { match_id } if match_id == "first"));
}

#[test]
fn push_from_splash_is_a_noop() {
    let mut nav = Navigator::new();
    nav.push(Screen::Details {
        match_id: "m1".to_string(),
    });
    assert_eq!(nav.current(), &Screen::Splash);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn enter_details_is_only_legal_from_the_list() {
    let mut state = AppState::new();
    assert!(state.enter_details("m1".to_string()).is_none());

    state.enter_list();
    assert!(state.enter_details("m1".to_string()).is_some());
    // Already on details: a second entry attempt is rejected.
    assert!(state.enter_details("m2".to_string()).is_none());
}

#[test]
fn leave_details_restores_the_list_and_resets_detail_state() {
    let mut state = AppState::new();
    state.enter_list();
    state.enter_details("m1".to_string()).expect("push from list");
    state.match_detail = FetchState::Failed;

    state.leave_details();
    assert_eq!(state.nav.current(), &Screen::List);
    assert_eq!(state.nav.depth(), 1);
    assert!(state.match_detail.is_loading());
}

#[test]
fn selected_match_id_skips_rows_without_an_id() {
    let mut state = AppState::new();
    state.enter_list();
    state.all_matches = FetchState::Loaded(vec![summary("", false, false)]);
    state.current_matches = FetchState::Loaded(Vec::new());

    assert_eq!(state.selected_match_id(), None);
}

#[test]
fn selected_match_id_reads_the_active_tab() {
    let mut state = AppState::new();
    state.enter_list();
    state.all_matches = FetchState::Loaded(vec![
        summary("up-1", false, false),
        summary("done-1", true, true),
    ]);
    state.current_matches = FetchState::Loaded(vec![summary("live-1", true, false)]);

    assert_eq!(state.tab, Tab::Upcoming);
    assert_eq!(state.selected_match_id().as_deref(), Some("up-1"));

    state.toggle_tab();
    assert_eq!(state.selected_match_id().as_deref(), Some("done-1"));
}

#[test]
fn tab_toggle_resets_selection() {
    let mut state = AppState::new();
    state.enter_list();
    state.all_matches = FetchState::Loaded(vec![
        summary("a", false, false),
        summary("b", false, false),
    ]);
    state.current_matches = FetchState::Loaded(Vec::new());

    state.select_next();
    assert_eq!(state.selected, 1);

    state.toggle_tab();
    assert_eq!(state.tab, Tab::Completed);
    assert_eq!(state.selected, 0);
}

#[test]
fn selection_wraps_in_both_directions() {
    let mut state = AppState::new();
    state.enter_list();
    state.all_matches = FetchState::Loaded(vec![
        summary("a", false, false),
        summary("b", false, false),
    ]);
    state.current_matches = FetchState::Loaded(Vec::new());

    state.select_prev();
    assert_eq!(state.selected, 1);
    state.select_next();
    assert_eq!(state.selected, 0);
}
