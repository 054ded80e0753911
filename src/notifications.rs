/// Cross-platform notification support.
/// macOS uses osascript, Linux uses notify-send; other platforms only log.
use std::io::Write;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::Command;

/// Sink for "task requires attention" events
pub trait Notifier {
    /// Show a desktop notification
    fn notify(&self, title: &str, body: &str);

    /// Ask the host to bring the application window to the front
    fn request_focus(&self);
}

/// Notifications through the desktop's notification service
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");

        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            let _ = Command::new("osascript")
                .arg("-e")
                .arg(&script)
                .output();
        }

        #[cfg(target_os = "linux")]
        {
            let _ = Command::new("notify-send")
                .arg("--app-name=timebox")
                .arg(title)
                .arg(body)
                .output();
        }
    }

    /// Terminal emulators surface the bell as an urgency hint on the window
    fn request_focus(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// Notification when a running task reaches its required time
pub fn notify_budget_reached(notifier: &dyn Notifier, task_title: &str) {
    notifier.notify("Timebox - Budget Reached", &format!("⏰ {}", task_title));
    notifier.request_focus();
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn test_budget_reached_notifies_and_requests_focus() {
        let notifier = RecordingNotifier::default();
        notify_budget_reached(&notifier, "Read");

        let sent = notifier.notifications.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Timebox - Budget Reached");
        assert!(sent[0].1.contains("Read"));
        assert_eq!(*notifier.focus_requests.borrow(), 1);
    }
}
