use crate::domain::{Apartment, ApartmentStatus};
use crate::templates::components::{card, status_badge, BadgeSize};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ApartmentVm {
    pub apartment: Apartment,
    pub can_edit: bool,
    pub signed_in_as: Option<String>,
}

pub fn apartment_page(vm: &ApartmentVm) -> Markup {
    let apt = &vm.apartment;
    let title = format!("Floor {} · {}", apt.floor, apt.unit);

    desktop_layout(
        &title,
        vm.signed_in_as.as_deref(),
        html! {
            main class="container" {
                h1 { (title) " " (status_badge(apt.status, BadgeSize::Normal)) }

                (card("Details", html! {
                    dl {
                        dt { "Size" } dd { (format!("{:.1}", apt.size_sqm)) " m²" }
                        dt { "Notes" }
                        dd {
                            @match &apt.notes {
                                Some(notes) => (notes),
                                None => span style="color: #6b7280;" { "None" },
                            }
                        }
                        dt { "Last updated" }
                        dd {
                            (apt.updated_at.format("%Y-%m-%d %H:%M UTC").to_string())
                            @if let Some(by) = &apt.updated_by {
                                " by " (by)
                            }
                        }
                    }
                }))

                @if vm.can_edit {
                    (edit_form(apt))
                }
            }
        },
    )
}

fn edit_form(apt: &Apartment) -> Markup {
    html! {
        form
            action=(format!("/apartments/{}", apt.id))
            method="post"
            class="card"
            id="edit-apartment"
            style="display: flex; flex-direction: column; gap: 10px;"
        {
            h3 { "Update" }
            label for="status" { "Status" }
            select name="status" id="status" required {
                @for status in ApartmentStatus::ALL {
                    option value=(status.as_str()) selected[status == apt.status] { (status.label()) }
                }
            }
            label for="notes" { "Notes" }
            textarea name="notes" id="notes" rows="3" {
                (apt.notes.as_deref().unwrap_or(""))
            }
            button type="submit" class="primary" { "Save" }
        }
    }
}
