use std::sync::Mutex;

/// Уведомления пользователя о результате операции
///
/// На каждое завершение операции приходится ровно один вызов.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Уведомления через лог
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "notify", "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Накапливает уведомления в памяти (для CLI-вывода и тестов)
#[derive(Default)]
pub struct CollectingNotifier {
    items: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.items.lock().unwrap())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.items.lock().unwrap().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn success(&self, message: &str) {
        self.items
            .lock()
            .unwrap()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.items
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }
}
