use taskwatch_core::{AppViewModel, Notification};

/// Incremental line rendering: given how much of the view was already shown,
/// produce the lines to append now. Notifications are append-only, so a
/// count is enough to diff against.
pub fn render(view: &AppViewModel, rendered_notifications: usize, busy_shown: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if view.busy && !busy_shown {
        lines.push("[busy] background tasks running...".to_string());
    }

    for notification in view.notifications.iter().skip(rendered_notifications) {
        lines.push(format_notification(notification));
    }

    if !view.busy && busy_shown {
        lines.push("[idle] background tasks drained".to_string());
    }

    lines
}

fn format_notification(notification: &Notification) -> String {
    match &notification.link {
        Some(link) => format!(
            "[{}] {} ({}: {})",
            notification.class, notification.text, link.label, link.href
        ),
        None => format!("[{}] {}", notification.class, notification.text),
    }
}

/// Prints render output with a timestamp prefix and remembers what has been
/// shown so each view diff appends cleanly.
#[derive(Default)]
pub struct LinePrinter {
    rendered_notifications: usize,
    busy_shown: bool,
}

impl LinePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, view: &AppViewModel) {
        for line in render(view, self.rendered_notifications, self.busy_shown) {
            println!("{} {}", chrono::Local::now().format("%H:%M:%S"), line);
        }
        self.rendered_notifications = view.notifications.len();
        self.busy_shown = view.busy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskwatch_core::NotificationLink;

    fn notification(class: &str, text: &str, link: Option<(&str, &str)>) -> Notification {
        Notification {
            class: class.to_string(),
            text: text.to_string(),
            link: link.map(|(label, href)| NotificationLink {
                label: label.to_string(),
                href: href.to_string(),
            }),
        }
    }

    #[test]
    fn renders_only_new_notifications() {
        let view = AppViewModel {
            notifications: vec![
                notification("error", "Failed", None),
                notification("success", "Done", Some(("Review here", "http://x"))),
            ],
            ..AppViewModel::default()
        };

        let lines = render(&view, 1, false);
        assert_eq!(lines, vec!["[success] Done (Review here: http://x)"]);
    }

    #[test]
    fn busy_transitions_bracket_the_notifications() {
        let busy_view = AppViewModel {
            busy: true,
            notifications: vec![notification("info", "Rebuild queued", None)],
            ..AppViewModel::default()
        };
        assert_eq!(
            render(&busy_view, 0, false),
            vec![
                "[busy] background tasks running...",
                "[info] Rebuild queued"
            ]
        );

        let idle_view = AppViewModel::default();
        assert_eq!(
            render(&idle_view, 1, true),
            vec!["[idle] background tasks drained"]
        );
    }

    #[test]
    fn unchanged_view_renders_nothing() {
        let view = AppViewModel {
            notifications: vec![notification("warning", "Slate stale", None)],
            ..AppViewModel::default()
        };
        assert!(render(&view, 1, false).is_empty());
    }
}
