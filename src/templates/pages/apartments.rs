use crate::db::StatusCounts;
use crate::domain::{Apartment, ApartmentStatus};
use crate::templates::components::{status_badge, BadgeSize};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ApartmentsVm {
    pub apartments: Vec<Apartment>,
    pub counts: StatusCounts,
    pub signed_in_as: Option<String>,
}

pub fn apartments_page(vm: &ApartmentsVm) -> Markup {
    desktop_layout(
        "Apartments",
        vm.signed_in_as.as_deref(),
        html! {
            main class="container" {
                h1 { "Apartments" }

                section class="card" id="status-summary" {
                    h3 { "Summary" }
                    ul class="summary" {
                        @for status in ApartmentStatus::ALL {
                            li {
                                (status_badge(status, BadgeSize::Normal))
                                " "
                                strong { (vm.counts.get(status)) }
                            }
                        }
                    }
                    p { "Total: " (vm.counts.total()) }
                }

                section class="card" {
                    @if vm.apartments.is_empty() {
                        p { "No apartments yet." }
                    } @else {
                        table style="width: 100%; border-collapse: collapse;" {
                            thead {
                                tr {
                                    th style="padding: 8px; text-align: left;" { "Floor" }
                                    th style="padding: 8px; text-align: left;" { "Unit" }
                                    th style="padding: 8px; text-align: left;" { "Size (m²)" }
                                    th style="padding: 8px; text-align: left;" { "Status" }
                                    th style="padding: 8px; text-align: left;" { "Updated" }
                                }
                            }
                            tbody {
                                @for apt in &vm.apartments {
                                    tr {
                                        td style="padding: 8px;" { (apt.floor) }
                                        td style="padding: 8px;" {
                                            a href=(format!("/apartments/{}", apt.id)) { (apt.unit) }
                                        }
                                        td style="padding: 8px;" { (format!("{:.1}", apt.size_sqm)) }
                                        td style="padding: 8px;" { (status_badge(apt.status, BadgeSize::Compact)) }
                                        td style="padding: 8px; color: #6b7280; font-size: 0.9em;" {
                                            (apt.updated_at.format("%Y-%m-%d %H:%M").to_string())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
