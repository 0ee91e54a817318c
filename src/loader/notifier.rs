//! User-facing failure notifications.

use std::sync::Arc;

/// Blocking alert shown when a load fails.
///
/// `None` means the backend gave no message; implementations must render it
/// as an empty message rather than fail.
pub trait Notifier {
    fn alert(&self, message: Option<&str>);
}

/// Writes alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: Option<&str>) {
        eprintln!("alert: {}", message.unwrap_or_default());
    }
}

/// Emits alerts as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: Option<&str>) {
        tracing::warn!(alert = message.unwrap_or_default(), "Load failed");
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: Option<&str>) {
        (**self).alert(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn alert(&self, message: Option<&str>) {
        (**self).alert(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn alert(&self, message: Option<&str>) {
        (**self).alert(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Notifier for Recorder {
        fn alert(&self, message: Option<&str>) {
            self.0.lock().unwrap().push(message.unwrap_or_default().to_string());
        }
    }

    #[test]
    fn test_wrappers_forward() {
        let recorder = Arc::new(Recorder::default());

        recorder.alert(Some("direct"));
        (&recorder).alert(None);
        let boxed: Box<dyn Notifier> = Box::new(recorder.clone());
        boxed.alert(Some("boxed"));

        assert_eq!(*recorder.0.lock().unwrap(), vec!["direct", "", "boxed"]);
    }

    #[test]
    fn test_builtin_notifiers_accept_missing_message() {
        let notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(StderrNotifier), Box::new(TracingNotifier)];
        for notifier in &notifiers {
            notifier.alert(None);
            notifier.alert(Some("bad creds"));
        }
    }
}
