//! Event loop - owns the controller and turns its effects into tasks.
//!
//! The controller is only ever touched by the task running [`EventLoop::run`].
//! Image reads and toast timers run as spawned tasks whose output is the
//! follow-up command, fed back into the same loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use postboard_core::ports::{ImageReader, Surface};
use postboard_core::{Command, Effect, ViewController};

pub struct EventLoop<U: Surface> {
    controller: ViewController<U>,
    reader: Arc<dyn ImageReader>,
    inbox: mpsc::UnboundedReceiver<Command>,
    tasks: JoinSet<Command>,
}

impl<U: Surface> EventLoop<U> {
    /// Create the loop and the sender that user events are posted through.
    /// The loop finishes once every sender is dropped and no effect is
    /// still pending.
    pub fn new(
        controller: ViewController<U>,
        reader: Arc<dyn ImageReader>,
    ) -> (Self, mpsc::UnboundedSender<Command>) {
        let (sender, inbox) = mpsc::unbounded_channel();
        let event_loop = Self {
            controller,
            reader,
            inbox,
            tasks: JoinSet::new(),
        };
        (event_loop, sender)
    }

    pub fn controller(&self) -> &ViewController<U> {
        &self.controller
    }

    /// Initialize the controller. Must be called from within a runtime.
    pub fn start(&mut self) {
        let effects = self.controller.start();
        self.spawn_all(effects);
    }

    /// Handle one command immediately.
    pub fn dispatch(&mut self, command: Command) {
        let effects = self.controller.dispatch(command);
        self.spawn_all(effects);
    }

    /// Process commands until the inbox is closed and every effect has
    /// reported back. `observe` runs after each command.
    pub async fn run<F>(mut self, mut observe: F) -> ViewController<U>
    where
        F: FnMut(&'static str, &ViewController<U>),
    {
        let mut inbox_open = true;

        loop {
            let command = tokio::select! {
                received = self.inbox.recv(), if inbox_open => match received {
                    Some(command) => command,
                    None => {
                        tracing::debug!("Command inbox closed");
                        inbox_open = false;
                        continue;
                    }
                },
                Some(joined) = self.tasks.join_next() => match joined {
                    Ok(command) => command,
                    Err(e) => {
                        tracing::error!(error = %e, "Effect task failed");
                        continue;
                    }
                },
                else => break,
            };

            let name = command.name();
            self.dispatch(command);
            observe(name, &self.controller);
        }

        tracing::info!("Event loop finished");
        self.controller
    }

    fn spawn_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        match effect {
            Effect::ReadImage { form, file } => {
                let reader = self.reader.clone();
                self.tasks.spawn(async move {
                    match reader.read_data_url(&file).await {
                        Ok(data_url) => Command::ImageLoaded {
                            form,
                            data_url,
                            file_name: file.name,
                        },
                        Err(e) => Command::ImageFailed {
                            form,
                            reason: e.to_string(),
                        },
                    }
                });
            }
            Effect::DismissToast { ticket, after } => {
                self.tasks.spawn(async move {
                    tokio::time::sleep(after).await;
                    Command::DismissToast { ticket }
                });
            }
        }
    }
}
