//! The tick driver: one task owns the session.
//!
//! A single select loop interleaves frame ticks with user commands, so
//! every mutation of game state happens on one task in a deterministic
//! order — the cooperative single-mutator model, with the channel as the
//! only way in.

use std::time::Duration;

use crumbs_core::{Decimal, GameView, LayerId};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::RuntimeConfig;
use crate::session::GameSession;

/// Commands accepted by a running driver.
#[derive(Debug)]
pub enum Command {
    PurchaseUpgrade { layer: LayerId, index: usize },
    TriggerConversion { layer: LayerId },
    TriggerReset { layer: LayerId },
    /// Convert-then-reset, as the layer's reset button does.
    PressResetButton { layer: LayerId },
    SetDevSpeed(Decimal),
    SetPaused(bool),
    Snapshot { reply: oneshot::Sender<GameView> },
    Shutdown,
}

/// Cheap handle for talking to the driver task.
#[derive(Clone)]
pub struct DriverHandle {
    tx: mpsc::Sender<Command>,
}

impl DriverHandle {
    pub async fn send(&self, command: Command) -> bool {
        self.tx.send(command).await.is_ok()
    }

    /// Snapshot of the running game, or `None` once the driver is gone.
    pub async fn snapshot(&self) -> Option<GameView> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Snapshot { reply }).await.is_err() {
            return None;
        }
        rx.await.ok()
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown).await;
    }
}

/// Drives a session at the configured tick rate until shut down.
pub struct TickDriver {
    session: GameSession,
    interval: Duration,
    commands: mpsc::Receiver<Command>,
    handle_tx: Option<mpsc::Sender<Command>>,
}

impl TickDriver {
    pub fn new(session: GameSession, config: &RuntimeConfig) -> Self {
        let (handle_tx, commands) = mpsc::channel(64);
        Self {
            session,
            interval: Duration::from_millis(config.tick_interval_ms),
            commands,
            handle_tx: Some(handle_tx),
        }
    }

    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            tx: self
                .handle_tx
                .clone()
                .expect("handle() before run()"),
        }
    }

    /// Runs until [`Command::Shutdown`] or until every handle is dropped.
    /// Returns the session so callers can save on the way out.
    pub async fn run(mut self) -> GameSession {
        // Only external handles keep the channel open from here on.
        self.handle_tx.take();

        let mut ticker = tokio::time::interval(self.interval);
        // A stalled frame should not replay a burst of ticks; elapsed
        // time is measured, so one late tick already carries it.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "driver started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let delta = Decimal::try_from((now - last).as_secs_f64())
                        .unwrap_or_default();
                    last = now;
                    if let Err(error) = self.session.on_tick(delta) {
                        // Per-tick errors never reach the user.
                        tracing::warn!(%error, "tick failed");
                    }
                }
                command = self.commands.recv() => {
                    match command {
                        Some(command) => {
                            if self.apply(command) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        tracing::info!("driver stopped");
        self.session
    }

    /// Applies one command; returns true on shutdown.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::PurchaseUpgrade { layer, index } => {
                let _ = self.session.purchase_upgrade(layer, index);
            }
            Command::TriggerConversion { layer } => {
                if let Err(error) = self.session.trigger_conversion(layer) {
                    tracing::warn!(%layer, %error, "conversion failed");
                }
            }
            Command::TriggerReset { layer } => {
                if let Err(error) = self.session.trigger_reset(layer) {
                    tracing::warn!(%layer, %error, "reset failed");
                }
            }
            Command::PressResetButton { layer } => {
                if let Err(error) = self.session.press_reset_button(layer) {
                    tracing::warn!(%layer, %error, "reset button failed");
                }
            }
            Command::SetDevSpeed(dev_speed) => self.session.set_dev_speed(dev_speed),
            Command::SetPaused(paused) => self.session.set_paused(paused),
            Command::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
            Command::Shutdown => return true,
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbs_core::{Content, GameConfig, LayerDef, TreeDef};
    use rust_decimal_macros::dec;

    const MAIN: LayerId = LayerId(0);

    fn session() -> GameSession {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.starting_value = dec!(10);
        main.base_rate = dec!(5);
        let content =
            Content::new(vec![main], TreeDef::default(), GameConfig::default()).unwrap();
        GameSession::new(content)
    }

    #[tokio::test(start_paused = true)]
    async fn driver_ticks_and_answers_snapshots() {
        let config = RuntimeConfig {
            tick_interval_ms: 10,
            ..RuntimeConfig::default()
        };
        let driver = TickDriver::new(session(), &config);
        let handle = driver.handle();
        let task = tokio::spawn(driver.run());

        tokio::time::advance(Duration::from_millis(100)).await;
        let view = handle.snapshot().await.unwrap();
        let main = view.layer("main").unwrap();
        assert!(main.value > dec!(10));

        handle.shutdown().await;
        let session = task.await.unwrap();
        assert!(session.state().clock.ticks > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_sessions_do_not_gain() {
        let config = RuntimeConfig {
            tick_interval_ms: 10,
            ..RuntimeConfig::default()
        };
        let driver = TickDriver::new(session(), &config);
        let handle = driver.handle();
        let task = tokio::spawn(driver.run());

        handle.send(Command::SetPaused(true)).await;
        tokio::time::advance(Duration::from_millis(100)).await;
        let view = handle.snapshot().await.unwrap();
        assert_eq!(view.layer("main").unwrap().value, dec!(10));

        handle.shutdown().await;
        task.await.unwrap();
    }
}
