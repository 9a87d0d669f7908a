use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    ui::{render_empty, render_playing, render_recap},
    view_model::ViewModel,
    App,
};

/// A UI Screen boundary: renders one shape of the view model
pub trait Screen {
    fn render(&self, app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer);
}

/// Source word, countdown and (once revealed) the translation
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
        render_playing(app, vm, area, buf);
    }
}

/// Table of every pair of a finished session
pub struct RecapScreen;

impl Screen for RecapScreen {
    fn render(&self, app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
        render_recap(app, vm, area, buf);
    }
}

/// Shown instead of driving the clock when no word matched the settings
pub struct EmptyScreen;

impl Screen for EmptyScreen {
    fn render(&self, app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
        render_empty(app, vm, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current view model
pub fn current_screen(vm: &ViewModel<'_>) -> Box<dyn Screen> {
    if vm.nothing_to_play() {
        Box::new(EmptyScreen)
    } else if vm.finished {
        Box::new(RecapScreen)
    } else {
        Box::new(PlayingScreen)
    }
}

