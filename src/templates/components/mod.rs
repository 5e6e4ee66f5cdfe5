use maud::{html, Markup};

pub mod error;
pub mod status_badge;

pub use error::html_error_response;
pub use status_badge::{badge_style, status_badge, BadgeSize, BadgeStyle};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
