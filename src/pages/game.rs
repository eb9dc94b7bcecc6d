use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*};

use super::{Page, PageId};
use crate::{
    action::{Action, GameAction},
    components::{
        overlay::Overlay,
        playfield::{fit_playfield, Playfield},
        scorebar::{Scorebar, SCOREBAR_HEIGHT},
    },
    game::{GameSession, ScoreStore},
};

pub struct GamePage {
    session: GameSession<Box<dyn ScoreStore>>,
    // Logical frames per tick.
    dt: f32,
}

impl GamePage {
    pub fn new(session: GameSession<Box<dyn ScoreStore>>, dt: f32) -> Self {
        GamePage { session, dt }
    }

    pub fn session(&self) -> &GameSession<Box<dyn ScoreStore>> {
        &self.session
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Ok(Some(Action::Game(GameAction::Flap))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.session.advance_frame(self.dt),
            Action::Game(GameAction::Flap) => self.session.flap(),
            Action::Game(GameAction::Restart) => self.session.restart(),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let state = self.session.render_state();

        let [field_area, bar_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(SCOREBAR_HEIGHT)]).areas(area);
        let field_area = fit_playfield(field_area, state.width, state.height);
        let bar_area = Rect { x: field_area.x, width: field_area.width, ..bar_area };

        f.render_widget(Clear, area);
        f.render_widget(Playfield::new(&state), field_area);
        f.render_widget(Scorebar::new(state.score, state.best), bar_area);
        if let Some(overlay) = Overlay::for_state(&state) {
            f.render_widget(overlay, field_area);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::game::{score::MemoryScoreStore, GameSettings, Phase};

    fn new_page() -> GamePage {
        let store: Box<dyn ScoreStore> = Box::new(MemoryScoreStore::default());
        let session = GameSession::new(GameSettings::default(), store, StdRng::seed_from_u64(1)).unwrap();
        GamePage::new(session, 1.0)
    }

    fn click(kind: MouseEventKind) -> MouseEvent {
        MouseEvent { kind, column: 3, row: 3, modifiers: KeyModifiers::empty() }
    }

    #[test]
    fn test_flap_and_tick() -> Result<()> {
        let mut page = new_page();
        page.update(Action::Tick)?;
        assert_eq!(page.session().phase(), Phase::Start);

        page.update(Action::Game(GameAction::Flap))?;
        assert_eq!(page.session().phase(), Phase::Running);
        let y = page.session().bird().y();
        page.update(Action::Tick)?;
        assert!(page.session().bird().y() < y);
        Ok(())
    }

    #[test]
    fn test_restart_after_death() -> Result<()> {
        let mut page = new_page();
        page.update(Action::Game(GameAction::Flap))?;
        for _ in 0..200 {
            page.update(Action::Tick)?;
        }
        assert_eq!(page.session().phase(), Phase::Dead);
        page.update(Action::Game(GameAction::Flap))?;
        assert_eq!(page.session().phase(), Phase::Dead);
        page.update(Action::Game(GameAction::Restart))?;
        assert_eq!(page.session().phase(), Phase::Running);
        Ok(())
    }

    #[test]
    fn test_left_click_flaps() -> Result<()> {
        let mut page = new_page();
        assert_eq!(
            page.handle_mouse_events(click(MouseEventKind::Down(MouseButton::Left)))?,
            Some(Action::Game(GameAction::Flap))
        );
        assert_eq!(page.handle_mouse_events(click(MouseEventKind::Down(MouseButton::Right)))?, None);
        assert_eq!(page.handle_mouse_events(click(MouseEventKind::Moved))?, None);
        Ok(())
    }

    #[test]
    fn test_draw_every_phase() -> Result<()> {
        let mut page = new_page();
        let mut terminal = Terminal::new(TestBackend::new(80, 40))?;

        terminal.draw(|f| page.draw(f, f.area()).unwrap())?;
        page.update(Action::Game(GameAction::Flap))?;
        terminal.draw(|f| page.draw(f, f.area()).unwrap())?;
        for _ in 0..200 {
            page.update(Action::Tick)?;
        }
        terminal.draw(|f| page.draw(f, f.area()).unwrap())?;

        let content: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("GAME OVER"));
        Ok(())
    }

    #[test]
    fn test_draw_tiny_terminal() -> Result<()> {
        let mut page = new_page();
        let mut terminal = Terminal::new(TestBackend::new(3, 2))?;
        terminal.draw(|f| page.draw(f, f.area()).unwrap())?;
        Ok(())
    }
}
