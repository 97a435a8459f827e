use super::*;
use crate::config::DisplaySettings;
use crate::testing::RecordingSurface;

fn presenter(width: usize, height: usize) -> (DisplayPresenter<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::new(width, height);
    (DisplayPresenter::new(surface.clone(), &DisplaySettings::default()), surface)
}

#[test]
fn splash_shows_the_title_between_rules() {
    let (mut p, surface) = presenter(21, 6);
    assert!(p.show_splash());
    let frames = surface.frames.borrow();
    assert_eq!(
        frames[0].rows,
        vec![Row::Rule, Row::Text("pressplay".into()), Row::Rule]
    );
}

#[test]
fn idle_prompt_uses_configured_text() {
    let surface = RecordingSurface::new(21, 6);
    let settings = DisplaySettings {
        idle_prompt: "Push it".to_string(),
        ..DisplaySettings::default()
    };
    let mut p = DisplayPresenter::new(surface.clone(), &settings);
    p.show_idle_prompt();
    assert_eq!(surface.texts(), vec![vec!["Push it".to_string()]]);
    assert_eq!(p.last_screen(), Some(&Screen::Idle));
}

#[test]
fn short_name_is_drawn_on_one_line() {
    let (mut p, surface) = presenter(21, 6);
    p.show_now_playing("So What");
    assert_eq!(surface.texts()[0], vec!["Now playing", "So What"]);
}

#[test]
fn wide_name_wraps_onto_two_fitting_lines_at_a_word_boundary() {
    let (mut p, surface) = presenter(21, 6);
    let name = "John Coltrane - Giant Steps Take Two";
    p.show_now_playing(name);

    let texts = surface.texts();
    let lines = &texts[0][1..];
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.chars().count() <= 21));
    assert_eq!(format!("{} {}", lines[0], lines[1]), name);
}

#[test]
fn cramped_surface_drops_the_rule_but_keeps_both_lines() {
    let (mut p, surface) = presenter(12, 3);
    p.show_now_playing("Kind of Blue Sessions");
    let frames = surface.frames.borrow();
    assert_eq!(frames[0].rows.len(), 3);
    assert!(!frames[0].rows.contains(&Row::Rule));
}

#[test]
fn goodbye_and_clear() {
    let (mut p, surface) = presenter(21, 6);
    p.show_goodbye();
    p.clear();
    let frames = surface.frames.borrow();
    assert_eq!(frames[0].text_lines(), vec!["Goodbye!"]);
    assert!(frames[1].rows.is_empty());
    assert_eq!(p.last_screen(), Some(&Screen::Clear));
}

#[test]
fn render_failure_is_reported_and_keeps_last_screen() {
    let (mut p, surface) = presenter(21, 6);
    assert!(p.show_idle_prompt());
    *surface.failing.borrow_mut() = true;
    assert!(!p.show_now_playing("Anything"));
    assert_eq!(p.last_screen(), Some(&Screen::Idle));
    assert_eq!(surface.frames.borrow().len(), 1);
}

#[test]
fn release_happens_once() {
    let (mut p, surface) = presenter(21, 6);
    p.release();
    p.release();
    assert_eq!(*surface.releases.borrow(), 1);
}

#[test]
fn unavailable_names_the_track_that_failed() {
    let (mut p, surface) = presenter(21, 6);
    p.show_now_playing("A");
    p.show_unavailable("Blue in Green");
    assert_eq!(
        surface.texts()[1],
        vec!["Could not play".to_string(), "Blue in Green".to_string()]
    );
    assert_eq!(p.last_screen(), Some(&Screen::Unavailable("Blue in Green".into())));
}
