//! Cancelable deferred actions
//!
//! Timers are counted in ticks of simulation time. Each scheduled action is
//! identified by a slot and a generation; the generation changes whenever the
//! slot fires or is cancelled, so a stale token can never touch a newer task.

use crate::components::Side;

/// Handle to a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    slot: u32,
    generation: u32,
}

/// Work a timer performs when it comes due
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerAction {
    /// Deactivate the power-up holding this timer's token
    ExpirePowerUp,
    /// Give a hidden paddle its height back
    RestorePaddle { side: Side, height: f32 },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: u64,
    action: TimerAction,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    pending: Option<Pending>,
}

/// Slot table of pending actions
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay` ticks from now
    pub fn schedule(&mut self, delay: u64, action: TimerAction) -> TimerToken {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let entry = &mut self.slots[slot as usize];
        entry.pending = Some(Pending {
            due: self.now + delay,
            action,
        });
        TimerToken {
            slot,
            generation: entry.generation,
        }
    }

    /// Cancel a pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        if !self.is_pending(token) {
            return false;
        }
        self.release(token.slot);
        true
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.slots
            .get(token.slot as usize)
            .is_some_and(|s| s.generation == token.generation && s.pending.is_some())
    }

    /// Advance one tick and return every action now due, earliest deadline first
    pub fn advance(&mut self) -> Vec<(TimerToken, TimerAction)> {
        self.now += 1;

        let mut due: Vec<(u64, TimerToken, TimerAction)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                s.pending.filter(|p| p.due <= self.now).map(|p| {
                    let token = TimerToken {
                        slot: i as u32,
                        generation: s.generation,
                    };
                    (p.due, token, p.action)
                })
            })
            .collect();
        due.sort_by_key(|(at, token, _)| (*at, token.slot));

        for (_, token, _) in &due {
            self.release(token.slot);
        }
        due.into_iter().map(|(_, t, a)| (t, a)).collect()
    }

    /// Drop every pending action
    pub fn cancel_all(&mut self) {
        for slot in 0..self.slots.len() as u32 {
            if self.slots[slot as usize].pending.is_some() {
                self.release(slot);
            }
        }
    }

    /// Number of actions still waiting
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.pending.is_some()).count()
    }

    fn release(&mut self, slot: u32) {
        let entry = &mut self.slots[slot as usize];
        entry.pending = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = Scheduler::new();
        let token = timers.schedule(3, TimerAction::ExpirePowerUp);

        assert!(timers.advance().is_empty());
        assert!(timers.advance().is_empty());
        let fired = timers.advance();
        assert_eq!(fired, vec![(token, TimerAction::ExpirePowerUp)]);
        assert!(!timers.is_pending(token));
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timers = Scheduler::new();
        let token = timers.schedule(1, TimerAction::ExpirePowerUp);

        assert!(timers.cancel(token));
        assert!(!timers.cancel(token), "Second cancel is a no-op");
        assert!(timers.advance().is_empty());
    }

    #[test]
    fn test_stale_token_cannot_cancel_reused_slot() {
        let mut timers = Scheduler::new();
        let old = timers.schedule(1, TimerAction::ExpirePowerUp);
        timers.advance();

        // Slot is recycled with a new generation
        let restore = TimerAction::RestorePaddle {
            side: Side::Right,
            height: 100.0,
        };
        let new = timers.schedule(5, restore);
        assert_ne!(old, new);
        assert!(!timers.cancel(old));
        assert!(timers.is_pending(new));
    }

    #[test]
    fn test_due_actions_in_deadline_order() {
        let mut timers = Scheduler::new();
        let late = timers.schedule(2, TimerAction::ExpirePowerUp);
        let early = timers.schedule(
            1,
            TimerAction::RestorePaddle {
                side: Side::Left,
                height: 100.0,
            },
        );

        let first = timers.advance();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].0, early);
        let second = timers.advance();
        assert_eq!(second[0].0, late);
    }

    #[test]
    fn test_zero_delay_fires_next_tick() {
        let mut timers = Scheduler::new();
        timers.schedule(0, TimerAction::ExpirePowerUp);
        assert_eq!(timers.advance().len(), 1);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Scheduler::new();
        let a = timers.schedule(10, TimerAction::ExpirePowerUp);
        let b = timers.schedule(20, TimerAction::ExpirePowerUp);
        assert_eq!(timers.pending(), 2);

        timers.cancel_all();
        assert_eq!(timers.pending(), 0);
        assert!(!timers.is_pending(a));
        assert!(!timers.is_pending(b));
        for _ in 0..30 {
            assert!(timers.advance().is_empty());
        }
    }
}
