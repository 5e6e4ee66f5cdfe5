use crate::domain::ApartmentStatus;
use maud::{html, Markup};

const BASE_CLASSES: &str = "inline-flex items-center rounded-full font-medium";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeSize {
    Compact,
    #[default]
    Normal,
}

impl BadgeSize {
    /// `compact` or `normal`; anything else is the default size.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("compact") => BadgeSize::Compact,
            _ => BadgeSize::Normal,
        }
    }

    pub fn classes(self) -> &'static str {
        match self {
            BadgeSize::Compact => "px-2 py-0.5 text-xs",
            BadgeSize::Normal => "px-3 py-1 text-sm",
        }
    }
}

/// Everything needed to draw a badge, before it becomes markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    pub label: &'static str,
    pub color_classes: &'static str,
    pub size_classes: &'static str,
}

impl BadgeStyle {
    pub fn class_attr(&self) -> String {
        format!("{BASE_CLASSES} {} {}", self.color_classes, self.size_classes)
    }

    pub fn aria_label(&self) -> String {
        format!("Status: {}", self.label)
    }
}

pub fn badge_style(status: ApartmentStatus, size: BadgeSize) -> BadgeStyle {
    let color_classes = match status {
        ApartmentStatus::Available => "bg-green-100 text-green-800",
        ApartmentStatus::Reserved => "bg-yellow-100 text-yellow-800",
        ApartmentStatus::Sold => "bg-red-100 text-red-800",
    };

    BadgeStyle {
        label: status.label(),
        color_classes,
        size_classes: size.classes(),
    }
}

pub fn status_badge(status: ApartmentStatus, size: BadgeSize) -> Markup {
    let style = badge_style(status, size);
    html! {
        span class=(style.class_attr()) aria-label=(style.aria_label()) {
            (style.label)
        }
    }
}
