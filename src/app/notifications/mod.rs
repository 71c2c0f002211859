use crate::app::tool_window::ToolWindowWarning;
use egui::Color32;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const TOAST_WIDTH: f32 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationType {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: String,
    /// Insertion order, assigned by [`NotificationManager::add_notification`]
    pub sequence: u64,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub expires_at: Option<Instant>,
    pub dismissible: bool,
    pub source: String, // e.g., window name, "Configuration"
}

impl Notification {
    fn build(
        id: String,
        title: String,
        message: String,
        notification_type: NotificationType,
        lifetime: Option<Duration>,
        source: String,
    ) -> Self {
        let created_at = Instant::now();
        Self {
            id,
            sequence: 0,
            title,
            message,
            notification_type,
            created_at,
            expires_at: lifetime.map(|lifetime| created_at + lifetime),
            dismissible: true,
            source,
        }
    }

    pub fn new_error(id: String, title: String, message: String, source: String) -> Self {
        // Errors stay until dismissed
        Self::build(id, title, message, NotificationType::Error, None, source)
    }

    pub fn new_warning(id: String, title: String, message: String, source: String) -> Self {
        Self::build(
            id,
            title,
            message,
            NotificationType::Warning,
            Some(Duration::from_secs(30)),
            source,
        )
    }

    pub fn new_info(id: String, title: String, message: String, source: String) -> Self {
        Self::build(
            id,
            title,
            message,
            NotificationType::Info,
            Some(Duration::from_secs(10)),
            source,
        )
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| Instant::now() > expires_at)
            .unwrap_or(false)
    }

    pub fn get_color(&self) -> Color32 {
        match self.notification_type {
            NotificationType::Error => Color32::from_rgb(220, 50, 50),
            NotificationType::Warning => Color32::from_rgb(255, 150, 0),
            NotificationType::Info => Color32::from_rgb(70, 130, 200),
        }
    }

    pub fn get_icon(&self) -> &'static str {
        match self.notification_type {
            NotificationType::Error => "✗",
            NotificationType::Warning => "⚠",
            NotificationType::Info => "ℹ",
        }
    }
}

#[derive(Default)]
pub struct NotificationManager {
    notifications: HashMap<String, Notification>,
    next_id: u64,
    next_sequence: u64,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(&mut self, mut notification: Notification) {
        self.next_sequence += 1;
        notification.sequence = self.next_sequence;
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    fn next_id(&mut self, source: &str) -> String {
        self.next_id += 1;
        format!("{}_{}", source, self.next_id)
    }

    /// Surface a tool window warning as a toast attributed to `window_name`
    pub fn add_tool_window_warning(&mut self, window_name: &str, warning: &ToolWindowWarning) {
        let id = self.next_id(window_name);
        self.add_notification(Notification::new_warning(
            id,
            warning.title().to_string(),
            warning.to_string(),
            window_name.to_string(),
        ));
    }

    pub fn add_info(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id(source);
        self.add_notification(Notification::new_info(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn add_error(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id(source);
        self.add_notification(Notification::new_error(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn dismiss_notification(&mut self, id: &str) {
        self.notifications.remove(id);
    }

    pub fn clear_expired(&mut self) {
        self.notifications
            .retain(|_, notification| !notification.is_expired());
    }

    /// Newest first
    pub fn get_active_notifications(&self) -> Vec<&Notification> {
        let mut notifications: Vec<&Notification> = self.notifications.values().collect();
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.sequence.cmp(&a.sequence))
        });
        notifications
    }

    pub fn get_error_count(&self) -> usize {
        self.count(NotificationType::Error)
    }

    pub fn get_warning_count(&self) -> usize {
        self.count(NotificationType::Warning)
    }

    fn count(&self, notification_type: NotificationType) -> usize {
        self.notifications
            .values()
            .filter(|n| n.notification_type == notification_type)
            .count()
    }

    pub fn render_status_bar_indicator(&mut self, ui: &mut egui::Ui) {
        self.clear_expired();

        let error_count = self.get_error_count();
        let warning_count = self.get_warning_count();
        if error_count == 0 && warning_count == 0 {
            return;
        }

        ui.separator();
        if error_count > 0 {
            let text = if error_count == 1 {
                "1 error".to_string()
            } else {
                format!("{} errors", error_count)
            };
            ui.colored_label(Color32::from_rgb(220, 50, 50), format!("✗ {}", text));
        }
        if warning_count > 0 {
            let text = if warning_count == 1 {
                "1 warning".to_string()
            } else {
                format!("{} warnings", warning_count)
            };
            ui.colored_label(Color32::from_rgb(255, 150, 0), format!("⚠ {}", text));
        }
    }

    /// Stack the active notifications in the bottom right corner
    pub fn show_toasts(&mut self, ctx: &egui::Context) {
        self.clear_expired();
        if self.notifications.is_empty() {
            return;
        }

        let mut dismissed = Vec::new();
        egui::Area::new(egui::Id::new("notification_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(TOAST_WIDTH);
                for notification in self.get_active_notifications() {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(notification.get_color(), notification.get_icon());
                            ui.strong(notification.title.as_str());
                            if notification.dismissible && ui.small_button("✕").clicked() {
                                dismissed.push(notification.id.clone());
                            }
                        });
                        ui.label(notification.message.as_str());
                        ui.weak(notification.source.as_str());
                    });
                }
            });

        for id in dismissed {
            self.dismiss_notification(&id);
        }

        // Wake up again to expire toasts without user input
        ctx.request_repaint_after(Duration::from_secs(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_from_tool_window() {
        let mut manager = NotificationManager::new();
        manager.add_tool_window_warning(
            "Lazy Tools",
            &ToolWindowWarning::UnknownTab {
                requested: "Nope".to_string(),
                fallback: Some("Git".to_string()),
            },
        );

        let active = manager.get_active_notifications();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].source, "Lazy Tools");
        assert_eq!(active[0].message, "Tab 'Nope' not found, defaulting to 'Git'");
        assert_eq!(manager.get_warning_count(), 1);
        assert_eq!(manager.get_error_count(), 0);
    }

    #[test]
    fn test_ids_are_unique_per_notification() {
        let mut manager = NotificationManager::new();
        manager.add_info("Config", "Saved", "first");
        manager.add_info("Config", "Saved", "second");
        assert_eq!(manager.get_active_notifications().len(), 2);
    }

    #[test]
    fn test_dismiss_and_expiry() {
        let mut manager = NotificationManager::new();
        manager.add_error("Git", "Failed", "boom");
        let id = manager.get_active_notifications()[0].id.clone();

        let mut expired =
            Notification::new_info("old".to_string(), "t".to_string(), "m".to_string(), "s".to_string());
        expired.expires_at = Some(Instant::now() - Duration::from_secs(1));
        manager.add_notification(expired);

        manager.clear_expired();
        assert_eq!(manager.get_active_notifications().len(), 1);
        assert_eq!(manager.get_error_count(), 1);

        manager.dismiss_notification(&id);
        assert!(manager.get_active_notifications().is_empty());
    }

    #[test]
    fn test_active_notifications_newest_first_past_ten() {
        let mut manager = NotificationManager::new();
        let created_at = Instant::now();
        for n in 1..=12 {
            let mut notification = Notification::new_info(
                format!("n{}", n),
                "t".to_string(),
                n.to_string(),
                "s".to_string(),
            );
            notification.created_at = created_at;
            manager.add_notification(notification);
        }

        let order: Vec<&str> = manager
            .get_active_notifications()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["12", "11", "10", "9", "8", "7", "6", "5", "4", "3", "2", "1"]
        );
    }
}
