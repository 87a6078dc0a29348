//! WeatherView runtime: owns the state, runs the reducer, executes effects.
//!
//! Everything is driven from one loop. User input, fetch completions and timer
//! expiries all arrive as [`Action`]s on a single channel and are reduced in
//! order, so state is never touched concurrently.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{Config, Timings, WeatherApiClient};

use super::action::Action;
use super::effect::Effect;
use super::reducer::reducer;
use super::render::{Screen, render};
use super::state::ViewState;
use super::timer::ScopedTimer;

pub struct WeatherView<C> {
    client: Arc<C>,
    state: ViewState,
    timings: Timings,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    shake_timer: ScopedTimer<Action>,
    error_timer: ScopedTimer<Action>,
}

impl<C> WeatherView<C>
where
    C: WeatherApiClient + 'static,
{
    /// Create a view for `config.default_place`. Nothing is fetched until [`start`](Self::start).
    pub fn new(client: C, config: &Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            state: ViewState::new(config.default_place.clone(), config.ordering),
            timings: config.timings,
            shake_timer: ScopedTimer::new("shake", action_tx.clone()),
            error_timer: ScopedTimer::new("error", action_tx.clone()),
            action_tx,
            action_rx,
        }
    }

    /// Issue the startup fetch for the initial query.
    pub fn start(&mut self) -> bool {
        self.dispatch(Action::QueryReconcile)
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Action::QueryInput(text.into()))
    }

    pub fn submit(&mut self) -> bool {
        self.dispatch(Action::QuerySubmit)
    }

    /// Reduce one action and run its effects. Returns whether state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(action = %action.summary(), "dispatch");
        let result = reducer(&mut self.state, action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.changed
    }

    /// Wait for the next queued action (fetch completion, timer expiry or
    /// anything sent through [`sender`](Self::sender)) and dispatch it.
    pub async fn step(&mut self) -> bool {
        match self.action_rx.recv().await {
            Some(action) => self.dispatch(action),
            // unreachable while `self.action_tx` is alive
            None => false,
        }
    }

    /// Handle for other event sources (e.g. a terminal input thread).
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self, today: NaiveDate) -> Screen {
        render(&self.state, today)
    }

    /// Screen for the current UTC calendar date.
    pub fn screen_now(&self) -> Screen {
        self.screen(Utc::now().date_naive())
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchConditions { request, place } => {
                let client = Arc::clone(&self.client);
                let tx = self.action_tx.clone();
                let reveal_delay = self.timings.reveal_delay();
                // Fire-and-forget: a superseded fetch still runs to completion.
                tokio::spawn(async move {
                    let action = match client.fetch_current_conditions(&place).await {
                        Ok(snapshot) => {
                            tokio::time::sleep(reveal_delay).await;
                            Action::WeatherDidLoad { request, snapshot }
                        }
                        Err(error) => Action::WeatherDidError { request, error },
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::StartShakeTimer { generation } => {
                self.shake_timer.restart(self.timings.shake(), Action::ShakeDidExpire(generation));
            }
            Effect::StartErrorTimer { generation } => {
                self.error_timer
                    .restart(self.timings.error_ttl(), Action::ErrorDidExpire(generation));
            }
        }
    }
}
