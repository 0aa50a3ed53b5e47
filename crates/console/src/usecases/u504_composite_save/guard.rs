use std::sync::atomic::{AtomicBool, Ordering};

/// Не даёт запустить второе сохранение, пока первое не завершилось
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Занять форму; `None`, если сохранение уже идёт
    pub fn try_begin(&self) -> Option<SubmitTicket<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Освобождает форму при выходе из области видимости
pub struct SubmitTicket<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submit_rejected_until_release() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin();
        assert!(ticket.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());

        drop(ticket);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }
}
