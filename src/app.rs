use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    cli::Cli,
    components::help::Help,
    config::Config,
    constants::game::LOGICAL_FRAME_RATE,
    game::{FileScoreStore, GameSession, ScoreStore},
    pages::{game::GamePage, Page},
    tui::{self, Frame},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    page: Box<dyn Page>,
}

impl App {
    pub fn new(args: &Cli) -> Result<Self> {
        let config = Config::new()?;

        let rng = match args.seed {
            Some(seed) => {
                log::info!("Seeding pipes with {seed}");
                StdRng::seed_from_u64(seed)
            },
            None => StdRng::from_entropy(),
        };
        let store: Box<dyn ScoreStore> = Box::new(FileScoreStore::in_data_dir());
        let session = GameSession::new(config.game.clone(), store, rng)?;
        let dt = (LOGICAL_FRAME_RATE / args.tick_rate) as f32;

        Ok(Self {
            tick_rate: args.tick_rate,
            frame_rate: args.frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            page: Box::new(GamePage::new(session, dt)),
        })
    }

    // Not entered yet: the caller enters once any previous `Tui` is gone.
    fn new_tui(&self) -> Result<tui::Tui> {
        let mut tui = tui::Tui::new()?.mouse(true);
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        Ok(tui)
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.new_tui()?;
        tui.enter()?;

        self.page.register_action_handler(action_tx.clone())?;
        self.page.register_config_handler(self.config.clone())?;
        self.page.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(Action::Quit)?,
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = self.config.keybindings.lookup(&self.page.id(), &key) {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                if let Some(action) = self.page.handle_events(Some(e))? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::ToggleShowHelp => self.show_help = !self.show_help,
                    Action::Error(message) => log::error!("{message}"),
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Render => self.render(&mut tui, &action_tx)?,
                    _ => {},
                }
                // The game holds still while the help is up.
                if !self.show_help {
                    if let Some(action) = self.page.update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = self.new_tui()?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        let mut errors = Vec::new();
        tui.draw(|f| {
            let area = f.area();
            if let Err(e) = self.page.draw(f, area) {
                errors.push(format!("Failed to draw: {e:?}"));
            }
            if self.show_help {
                self.draw_help(f, area);
            }
        })?;

        for error in errors {
            action_tx.send(Action::Error(error))?;
        }
        Ok(())
    }

    fn draw_help(&self, f: &mut Frame<'_>, area: Rect) {
        let page_id = self.page.id();
        let mut groups = vec![("System".to_string(), self.config.keybindings.global.clone())];
        if let Some(bindings) = self.config.keybindings.pages.get(&page_id) {
            groups.push((page_id.to_string(), bindings.clone()));
        }
        f.render_widget(Help::new(groups), area);
    }
}
