use crate::usecase::ports::remote::FetchError;

/// Identifies one dispatched request. Only the most recently issued ticket of
/// a [`RequestTracker`] is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn dispatch(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Makes every outstanding ticket stale without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Idle
    }
}

/// View state of one independently fetched panel, ticketed so only the latest
/// dispatched fetch is applied.
#[derive(Debug)]
pub struct FetchPanel<T> {
    state: PanelState<T>,
    tracker: RequestTracker,
}

impl<T> Default for FetchPanel<T> {
    fn default() -> Self {
        Self {
            state: PanelState::Idle,
            tracker: RequestTracker::default(),
        }
    }
}

impl<T> FetchPanel<T> {
    pub fn begin(&mut self) -> Ticket {
        self.state = PanelState::Loading;
        self.tracker.dispatch()
    }

    /// Returns `false` when `ticket` was superseded and the result dropped.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, FetchError>) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }
        self.state = match result {
            Ok(value) => PanelState::Ready(value),
            Err(err) => PanelState::Failed(err),
        };
        true
    }

    pub fn clear(&mut self) {
        self.tracker.invalidate();
        self.state = PanelState::Idle;
    }

    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.dispatch();
        let second = tracker.dispatch();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn panel_drops_superseded_results() {
        let mut panel = FetchPanel::<u32>::default();
        let old = panel.begin();
        let new = panel.begin();

        assert!(panel.settle(new, Ok(2)));
        assert!(!panel.settle(old, Ok(1)));
        assert_eq!(panel.value(), Some(&2));

        panel.clear();
        assert_eq!(panel.state(), &PanelState::Idle);
    }
}
