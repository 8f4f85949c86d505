//! The decision-controller contract and the controllers that ship with the engine.
//!
//! A controller answers for one seat. Every call either returns
//! [`Decision::Ready`] or [`Decision::Busy`]; busy is not an error, the
//! engine leaves its state untouched and the driver simply steps again.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::warn;

use crate::deck::Deck;
use crate::player::{Player, PlayerAction};
use crate::present::Snapshot;

/// A controller's answer for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<T> {
    Ready(T),
    Busy,
}

impl<T> Decision<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Decision::Ready(_))
    }
}

pub trait Controller {
    fn name(&self) -> &str {
        "player"
    }

    /// Picks a betting action for `player`, whose turn it is.
    fn bet(&mut self, table: &Snapshot, player: &Player) -> Decision<PlayerAction>;

    /// Marks the cards of `hand` to exchange. Marks are only applied once
    /// the answer is ready.
    fn discard(&mut self, table: &Snapshot, hand: &mut Deck) -> Decision<()>;

    /// Marks the cards of `hand` to show down with. Shows the whole hand by default.
    fn show(&mut self, _table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        hand.mark_all();
        Decision::Ready(())
    }
}

fn mark_indices(hand: &mut Deck, indices: &[usize]) {
    for &i in indices {
        hand.mark(i, true);
    }
}

/// Plays back prepared decisions in order.
///
/// Once a queue runs dry the controller reports busy, unless a fallback
/// action was given, in which case it keeps betting that action and never
/// discards.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    bets: VecDeque<PlayerAction>,
    discards: VecDeque<Vec<usize>>,
    shows: VecDeque<Vec<usize>>,
    fallback: Option<PlayerAction>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller that answers `action` to every betting question.
    pub fn always(action: PlayerAction) -> Self {
        Self {
            fallback: Some(action),
            ..Self::default()
        }
    }

    pub fn bets<I: IntoIterator<Item = PlayerAction>>(mut self, bets: I) -> Self {
        self.bets.extend(bets);
        self
    }

    /// Queues discard selections, one list of hand indices per discard turn.
    pub fn discards<I: IntoIterator<Item = Vec<usize>>>(mut self, discards: I) -> Self {
        self.discards.extend(discards);
        self
    }

    /// Queues showdown selections; once exhausted the whole hand is shown.
    pub fn shows<I: IntoIterator<Item = Vec<usize>>>(mut self, shows: I) -> Self {
        self.shows.extend(shows);
        self
    }

    pub fn then(mut self, fallback: PlayerAction) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn remaining_bets(&self) -> usize {
        self.bets.len()
    }
}

impl Controller for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn bet(&mut self, _table: &Snapshot, _player: &Player) -> Decision<PlayerAction> {
        match self.bets.pop_front().or(self.fallback) {
            Some(a) => Decision::Ready(a),
            None => Decision::Busy,
        }
    }

    fn discard(&mut self, _table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        match self.discards.pop_front() {
            Some(indices) => {
                mark_indices(hand, &indices);
                Decision::Ready(())
            }
            None if self.fallback.is_some() => Decision::Ready(()),
            None => Decision::Busy,
        }
    }

    fn show(&mut self, _table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        match self.shows.pop_front() {
            Some(indices) => mark_indices(hand, &indices),
            None => hand.mark_all(),
        }
        Decision::Ready(())
    }
}

/// A decision posted to a [`Channel`] controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bet(PlayerAction),
    /// Hand indices to exchange.
    Discard(Vec<usize>),
    /// Hand indices to show; `None` shows the whole hand.
    Show(Option<Vec<usize>>),
}

/// A controller fed from elsewhere through an mpsc channel.
///
/// Busy until a command of the requested kind has been posted. Commands of
/// the wrong kind are dropped with a warning.
#[derive(Debug)]
pub struct Channel {
    name: String,
    rx: Receiver<Command>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> (Sender<Command>, Self) {
        let (tx, rx) = mpsc::channel();
        (
            tx,
            Self {
                name: name.into(),
                rx,
            },
        )
    }

    fn receive<T>(&mut self, want: &str, pick: impl Fn(Command) -> Result<T, Command>) -> Option<T> {
        loop {
            match self.rx.try_recv() {
                Ok(cmd) => match pick(cmd) {
                    Ok(v) => return Some(v),
                    Err(other) => warn!(controller = %self.name, ?other, want, "dropping unexpected command"),
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl Controller for Channel {
    fn name(&self) -> &str {
        &self.name
    }

    fn bet(&mut self, _table: &Snapshot, _player: &Player) -> Decision<PlayerAction> {
        match self.receive("bet", |c| match c {
            Command::Bet(a) => Ok(a),
            other => Err(other),
        }) {
            Some(a) => Decision::Ready(a),
            None => Decision::Busy,
        }
    }

    fn discard(&mut self, _table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        match self.receive("discard", |c| match c {
            Command::Discard(ix) => Ok(ix),
            other => Err(other),
        }) {
            Some(ix) => {
                mark_indices(hand, &ix);
                Decision::Ready(())
            }
            None => Decision::Busy,
        }
    }

    fn show(&mut self, _table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        match self.receive("show", |c| match c {
            Command::Show(ix) => Ok(ix),
            other => Err(other),
        }) {
            Some(Some(ix)) => {
                mark_indices(hand, &ix);
                Decision::Ready(())
            }
            Some(None) => {
                hand.mark_all();
                Decision::Ready(())
            }
            None => Decision::Busy,
        }
    }
}
