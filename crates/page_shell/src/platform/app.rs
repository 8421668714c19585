use std::io::{self, BufRead, Stdout};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use page_core::{
    update_chat, update_sidebar, ChatMsg, ChatState, Sidebar, SidebarEffect, SidebarMsg,
};
use page_logging::{page_debug, page_info, page_warn};

use super::config::{self, ShellConfig};
use super::console::{parse_line, Console, ShellInput};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};

/// Upper bound on how long the loop blocks for input before polling the engine.
const IDLE_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> Result<()> {
    let config_path = config::config_path_from_args(std::env::args().skip(1));
    let shell_config = ShellConfig::load(&config_path)?;
    logging::initialize(if shell_config.log_to_terminal {
        LogDestination::Both
    } else {
        LogDestination::File
    });
    page_info!("page_shell starting with config {:?}", config_path);

    let chat_config = shell_config.chat_config()?;
    let runner = EffectRunner::new(
        config::endpoint_for(&chat_config),
        shell_config.delivery_settings(),
    )?;
    let sidebar = Sidebar::new(shell_config.sidebar_config(), shell_config.viewport_width);

    let mut shell = Shell {
        chat: ChatState::new(&chat_config),
        sidebar,
        runner,
        console: Console::new(io::stdout()),
    };
    shell.run(spawn_input_reader())
}

struct Shell {
    chat: ChatState,
    sidebar: Sidebar,
    runner: EffectRunner,
    console: Console<Stdout>,
}

impl Shell {
    fn run(&mut self, input_rx: mpsc::Receiver<String>) -> Result<()> {
        let initial = self.sidebar.initial_effects();
        self.apply_sidebar_effects(initial)?;

        let mut input_open = true;
        loop {
            let wait = self.next_wait(Instant::now());
            if input_open {
                match input_rx.recv_timeout(wait) {
                    Ok(line) => {
                        if !self.handle_input(parse_line(&line))? {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        page_info!(
                            "Input closed; waiting for {} pending request(s)",
                            self.chat.pending_requests()
                        );
                        input_open = false;
                    }
                }
            } else {
                thread::sleep(wait);
            }

            for msg in self.runner.poll() {
                self.dispatch_chat(msg)?;
            }
            self.dispatch_sidebar(SidebarMsg::Tick {
                now: Instant::now(),
            })?;

            if !input_open && self.chat.pending_requests() == 0 {
                break;
            }
        }

        page_info!("page_shell exiting");
        Ok(())
    }

    /// Wakes up for the pending resize deadline if it comes before the idle poll.
    fn next_wait(&self, now: Instant) -> Duration {
        self.sidebar
            .settle_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(IDLE_POLL, |until| until.min(IDLE_POLL))
    }

    /// Returns false when the user asked to quit.
    fn handle_input(&mut self, input: ShellInput) -> Result<bool> {
        match input {
            ShellInput::Chat(text) => {
                self.dispatch_chat(ChatMsg::InputChanged(text))?;
                let was_enabled = self.chat.is_submit_enabled();
                self.dispatch_chat(ChatMsg::Submitted)?;
                if !was_enabled {
                    self.console.notice("still waiting for the previous reply")?;
                }
            }
            ShellInput::Toggle => self.dispatch_sidebar(SidebarMsg::TogglePressed)?,
            ShellInput::Close => self.dispatch_sidebar(SidebarMsg::ClosePressed)?,
            ShellInput::Backdrop => self.dispatch_sidebar(SidebarMsg::BackdropClicked)?,
            ShellInput::Key(key) => self.dispatch_sidebar(SidebarMsg::KeyPressed(key))?,
            ShellInput::Resize(width) => self.dispatch_sidebar(SidebarMsg::Resized {
                width,
                at: Instant::now(),
            })?,
            ShellInput::Quit => return Ok(false),
            ShellInput::Unknown(line) => {
                page_debug!("Unknown command {:?}", line);
                self.console.notice(
                    "commands: /toggle /close /backdrop /key <name> /resize <px> /quit",
                )?;
            }
        }
        Ok(true)
    }

    fn dispatch_chat(&mut self, msg: ChatMsg) -> Result<()> {
        let state = std::mem::take(&mut self.chat);
        let (state, effects) = update_chat(state, msg);
        self.chat = state;
        self.chat.consume_dirty();

        if self.runner.enqueue(effects) {
            self.console.scroll_to_bottom(self.chat.thread())?;
        }
        Ok(())
    }

    fn dispatch_sidebar(&mut self, msg: SidebarMsg) -> Result<()> {
        let (sidebar, effects) = update_sidebar(self.sidebar.clone(), msg);
        self.sidebar = sidebar;
        self.apply_sidebar_effects(effects)
    }

    fn apply_sidebar_effects(&mut self, effects: Vec<SidebarEffect>) -> Result<()> {
        for effect in effects {
            match effect {
                SidebarEffect::Apply(view) => self.console.show_sidebar(view)?,
                SidebarEffect::ScheduleSettle { deadline } => {
                    page_debug!(
                        "Resize to {}px settles in {:?}",
                        self.sidebar.viewport_width(),
                        deadline.saturating_duration_since(Instant::now())
                    );
                }
            }
        }
        self.sidebar.consume_dirty();
        Ok(())
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    page_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
