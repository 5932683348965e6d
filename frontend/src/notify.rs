/// Blocking user-facing notification, used for provider errors and
/// analyze alerts. Everything else is only logged.
pub trait Notifier {
    fn notify(&self, message: &str);
}

pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                if window.alert_with_message(message).is_err() {
                    tracing::warn!("Could not show alert: {}", message);
                }
            }
            None => tracing::warn!("No window to alert: {}", message),
        }
    }
}
